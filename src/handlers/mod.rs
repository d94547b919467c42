//! HTTP handlers for table CRUD.

pub mod explorer;
pub use explorer::*;
