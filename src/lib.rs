// Analytics dashboard: view/state synchronization core plus the API it consumes
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
