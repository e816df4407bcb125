//! Notes REST API.
//!
//! Thin glue over [`NoteStore`](crate::notes::NoteStore): each handler runs one
//! store operation and turns the result into a status code with a short
//! plain-text body. Only the listing endpoint returns JSON.

use actix_multipart::Multipart;
use actix_web::{
    error::InternalError,
    guard::{self, GuardContext},
    http::header,
    web, HttpResponse, Responder,
};
use futures_util::StreamExt;
use serde::Deserialize;

use crate::notes::NoteError;
use crate::AppState;

/// Largest accepted note body (form field or PUT payload)
const MAX_NOTE_SIZE: usize = 1024 * 1024;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Map a store error to its HTTP response
fn error_response(err: NoteError) -> HttpResponse {
    match err {
        NoteError::AlreadyExists { .. } | NoteError::InvalidName { .. } => {
            HttpResponse::BadRequest()
                .content_type(TEXT_PLAIN)
                .body(err.to_string())
        }
        NoteError::NotFound { .. } => HttpResponse::NotFound()
            .content_type(TEXT_PLAIN)
            .body(err.to_string()),
        NoteError::RootMissing { .. } | NoteError::Storage { .. } => {
            log::error!("[NOTES] {}", err);
            HttpResponse::InternalServerError()
                .content_type(TEXT_PLAIN)
                .body("Internal server error")
        }
    }
}

fn bad_request(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type(TEXT_PLAIN)
        .body(msg.into())
}

// --- List notes ---

/// All notes as a JSON array of `{name, text}`
async fn list_notes(data: web::Data<AppState>) -> impl Responder {
    match data.notes.list_all().await {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => error_response(e),
    }
}

// --- Create note ---

#[derive(Debug, Deserialize)]
struct WriteNoteForm {
    note_name: String,
    #[serde(default)]
    note: String,
}

async fn create_note(data: &AppState, form: WriteNoteForm) -> HttpResponse {
    match data.notes.create(&form.note_name, &form.note).await {
        Ok(()) => HttpResponse::Created()
            .content_type(TEXT_PLAIN)
            .body(format!("Note '{}' created", form.note_name)),
        Err(e) => error_response(e),
    }
}

/// Create a note from an urlencoded form
async fn write_note_form(
    data: web::Data<AppState>,
    form: web::Form<WriteNoteForm>,
) -> impl Responder {
    create_note(&data, form.into_inner()).await
}

/// Create a note from a multipart form (what the upload page submits)
async fn write_note_multipart(data: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    let mut note_name: Option<String> = None;
    let mut note: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => return bad_request(format!("Failed to read form data: {}", e)),
        };

        let field_name = field.content_disposition().get_name().map(str::to_string);

        let mut value: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => {
                    if value.len() + bytes.len() > MAX_NOTE_SIZE {
                        return HttpResponse::PayloadTooLarge()
                            .content_type(TEXT_PLAIN)
                            .body(format!("Form field exceeds {} bytes", MAX_NOTE_SIZE));
                    }
                    value.extend_from_slice(&bytes);
                }
                Err(e) => return bad_request(format!("Failed to read form data: {}", e)),
            }
        }

        let slot = match field_name.as_deref() {
            Some("note_name") => &mut note_name,
            Some("note") => &mut note,
            _ => continue,
        };
        match String::from_utf8(value) {
            Ok(text) => *slot = Some(text),
            Err(_) => return bad_request("Form fields must be UTF-8 text"),
        }
    }

    let Some(note_name) = note_name else {
        return bad_request("Missing form field: note_name");
    };

    let form = WriteNoteForm {
        note_name,
        note: note.unwrap_or_default(),
    };
    create_note(&data, form).await
}

fn is_multipart(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

// --- Single note ---

/// Note content as plain text
async fn read_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    match data.notes.read(&name).await {
        Ok(text) => HttpResponse::Ok().content_type(TEXT_PLAIN).body(text),
        Err(e) => error_response(e),
    }
}

/// Replace a note's content with the request body
async fn update_note(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: String,
) -> impl Responder {
    let name = path.into_inner();
    match data.notes.update(&name, &body).await {
        Ok(()) => HttpResponse::Ok()
            .content_type(TEXT_PLAIN)
            .body(format!("Note '{}' updated", name)),
        Err(e) => error_response(e),
    }
}

async fn delete_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    match data.notes.delete(&name).await {
        Ok(()) => HttpResponse::Ok()
            .content_type(TEXT_PLAIN)
            .body(format!("Note '{}' deleted", name)),
        Err(e) => error_response(e),
    }
}

fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(MAX_NOTE_SIZE)
        .error_handler(|err, _req| {
            let resp = bad_request(format!("Invalid form: {}", err));
            InternalError::from_response(err, resp).into()
        })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .app_data(web::PayloadConfig::new(MAX_NOTE_SIZE))
        .service(web::resource("/notes").route(web::get().to(list_notes)))
        .service(
            web::resource("/write")
                .route(
                    web::post()
                        .guard(guard::fn_guard(is_multipart))
                        .to(write_note_multipart),
                )
                .route(web::post().to(write_note_form)),
        )
        .service(
            web::resource("/notes/{name}")
                .route(web::get().to(read_note))
                .route(web::put().to(update_note))
                .route(web::delete().to(delete_note)),
        );
}
