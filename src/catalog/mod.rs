//! Schema catalog: tables and columns discovered once at startup.

mod introspect;
mod metadata;

pub use metadata::*;
