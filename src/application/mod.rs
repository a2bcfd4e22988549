// Application layer - dashboard components and the seams they depend on
pub mod chart_backend;
pub mod chart_registry;
pub mod dashboard_controller;
pub mod dashboard_service;
pub mod data_loader;
pub mod error;
pub mod feedback;
pub mod navigation;
pub mod render_pipeline;
pub mod resource_transport;
pub mod toggle_group;
pub mod ui_binding;
