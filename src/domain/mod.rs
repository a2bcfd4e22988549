// Domain layer - Dashboard concepts independent of UI and transport
pub mod chart;
pub mod payload;
pub mod series;
pub mod view;
