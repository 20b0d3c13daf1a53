//! HTTP API for the Artistly backend

pub mod artists;
pub mod health;
pub mod placeholder;
pub mod ui;
pub mod upload;

pub use artists::artist_routes;
pub use health::status_routes;
pub use ui::ui_routes;
pub use upload::upload_routes;
