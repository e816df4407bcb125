//! Notes system: flat directory of plain-text notes, one `<name>.txt` file each.
//!
//! The HTTP controllers only talk to [`NoteStore`]; the store applies the
//! existence gates and delegates raw storage to a [`backend::NoteBackend`].

pub mod backend;
pub mod error;
pub mod file_ops;
pub mod memory;
pub mod name;
pub mod store;

pub use error::NoteError;
pub use store::NoteStore;
