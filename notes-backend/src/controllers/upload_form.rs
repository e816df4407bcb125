//! Static HTML page for creating notes from a browser.
//!
//! The page is compiled into the binary so it is served no matter where
//! the executable runs from.

use actix_web::{web, HttpResponse, Responder};

use crate::config::defaults;

const UPLOAD_FORM_HTML: &str = include_str!("../../static/UploadForm.html");

async fn upload_form() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(UPLOAD_FORM_HTML)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        &format!("/{}", defaults::UPLOAD_FORM),
        web::get().to(upload_form),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_serves_upload_form() {
        let app = test::init_service(App::new().configure(config)).await;

        let req = test::TestRequest::get().uri("/UploadForm.html").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let content_type = resp
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let body = test::read_body(resp).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("name=\"note_name\""));
        assert!(html.contains("name=\"note\""));
        assert!(html.contains("action=\"/write\""));
    }
}
