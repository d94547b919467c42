//! DB Explorer: generic REST CRUD over any MySQL schema, discovered at startup.

pub mod catalog;
pub mod decode;
pub mod entry;
pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;

pub use catalog::{Catalog, ColumnMetadata, TableMetadata};
pub use entry::{Entry, FieldValue, Summary};
pub use error::{ConfigError, ExplorerError};
pub use request::{Pagination, RequestDescriptor};
pub use routes::{explorer_routes, system_routes};
pub use service::{CrudService, RequestValidator};
pub use settings::Settings;
pub use state::AppState;
