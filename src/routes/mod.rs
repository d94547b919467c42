pub mod explorer;
pub mod system;

pub use explorer::explorer_routes;
pub use system::system_routes;
