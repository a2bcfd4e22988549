// Presentation layer - HTTP API serving the dashboard resources
pub mod app_state;
pub mod handlers;
pub mod router;
