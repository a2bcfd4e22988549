// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod headless_charts;
pub mod http_transport;
pub mod memory_document;
