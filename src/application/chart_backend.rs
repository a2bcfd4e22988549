// Chart backend - contract with the charting library
use crate::domain::chart::{ChartData, ChartSpec};

/// A live chart drawn on a canvas.
pub trait ChartHandle: Send {
    /// Redraw with the given labels and datasets
    fn draw(&mut self, data: &ChartData);

    /// Release the chart's resources
    fn destroy(&mut self);
}

pub trait ChartBackend {
    /// Build a chart on an existing canvas and draw its initial data
    fn construct(&mut self, canvas_id: &str, spec: &ChartSpec) -> Box<dyn ChartHandle>;
}
