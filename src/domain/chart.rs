// Chart domain models
use super::series::{palette_color, SeriesKey, PALETTE};

/// Logical names of the charts the dashboard owns.
pub const OVERVIEW_BAR: &str = "overview_bar";
pub const OVERVIEW_SHARE: &str = "overview_share";
pub const TIMESERIES: &str = "timeseries";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Doughnut,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    Hidden,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub border_color: Option<String>,
    pub background_colors: Vec<String>,
    pub border_width: u32,
    pub point_radius: Option<u32>,
    pub tension: Option<f64>,
}

impl Dataset {
    /// Single dataset of a category chart, one palette colour per category.
    pub fn categories(values: Vec<f64>, label: Option<String>, border_width: u32) -> Self {
        Self {
            label,
            data: values,
            border_color: None,
            background_colors: PALETTE.iter().map(|c| c.to_string()).collect(),
            border_width,
            point_radius: None,
            tension: None,
        }
    }

    /// Line for one series, coloured by its position in the rendered set.
    pub fn series_line(key: SeriesKey, position: usize, data: Vec<f64>) -> Self {
        let color = palette_color(position).to_string();
        Self {
            label: Some(key.label()),
            data,
            border_color: Some(color.clone()),
            background_colors: vec![color],
            border_width: 2,
            point_radius: Some(0),
            tension: Some(0.0),
        }
    }

    pub fn color(&self) -> Option<&str> {
        self.border_color
            .as_deref()
            .or_else(|| self.background_colors.first().map(String::as_str))
    }
}

/// What a chart currently displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn new(labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self { labels, datasets }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub aspect_ratio: f64,
    pub legend: LegendPosition,
    pub cutout_percent: Option<u8>,
    pub x_grid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, data: ChartData, options: ChartOptions) -> Self {
        Self {
            kind,
            data,
            options,
        }
    }

    pub fn overview_bar() -> Self {
        Self::new(
            ChartKind::Bar,
            ChartData::new(
                vec!["A".into(), "B".into(), "C".into()],
                vec![overview_bar_dataset(vec![0.0; 3])],
            ),
            ChartOptions {
                aspect_ratio: 1.8,
                legend: LegendPosition::Hidden,
                cutout_percent: None,
                x_grid: true,
            },
        )
    }

    pub fn overview_share() -> Self {
        Self::new(
            ChartKind::Doughnut,
            ChartData::new(
                vec!["Category 1".into(), "Category 2".into(), "Category 3".into()],
                vec![overview_share_dataset(vec![33.3; 3])],
            ),
            ChartOptions {
                aspect_ratio: 1.8,
                legend: LegendPosition::Bottom,
                cutout_percent: Some(70),
                x_grid: true,
            },
        )
    }

    pub fn timeseries() -> Self {
        Self::new(
            ChartKind::Line,
            ChartData::default(),
            ChartOptions {
                aspect_ratio: 2.0,
                legend: LegendPosition::Bottom,
                cutout_percent: None,
                x_grid: false,
            },
        )
    }
}

pub fn overview_bar_dataset(values: Vec<f64>) -> Dataset {
    Dataset::categories(values, Some("Dataset 1".to_string()), 1)
}

pub fn overview_share_dataset(values: Vec<f64>) -> Dataset {
    Dataset::categories(values, None, 0)
}
