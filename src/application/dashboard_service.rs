// Dashboard service - payloads served by the dashboard API
use crate::domain::payload::{
    CategoryData, DetailItem, DetailsPayload, DisplayValue, Metrics, OverviewPayload,
    TimeseriesPayload,
};
use crate::domain::series::SeriesKey;

/// Serves template data; swap these builders for real data sources.
#[derive(Debug, Clone)]
pub struct DashboardService {
    rounds: usize,
}

impl DashboardService {
    pub fn new(rounds: usize) -> Self {
        Self { rounds }
    }

    #[allow(clippy::approx_constant)]
    pub fn overview(&self) -> OverviewPayload {
        OverviewPayload {
            metrics: Metrics::new(vec![
                ("metric_1".to_string(), DisplayValue::Integer(42)),
                ("metric_2".to_string(), DisplayValue::Float(3.14)),
                ("metric_3".to_string(), DisplayValue::Integer(100)),
                ("metric_4".to_string(), DisplayValue::Float(7.5)),
            ]),
            chart_data: Some(CategoryData {
                labels: vec![
                    "Category A".to_string(),
                    "Category B".to_string(),
                    "Category C".to_string(),
                ],
                values: vec![30.0, 50.0, 20.0],
            }),
        }
    }

    pub fn timeseries(&self) -> TimeseriesPayload {
        let mut payload = TimeseriesPayload {
            rounds: (0..self.rounds)
                .map(|i| DisplayValue::Integer(i as i64))
                .collect(),
            ..TimeseriesPayload::default()
        };

        for key in SeriesKey::ALL {
            let slope = series_slope(key);
            payload.set_series(key, (0..self.rounds).map(|i| i as f64 * slope).collect());
        }

        payload
    }

    pub fn details(&self) -> DetailsPayload {
        let items = [("Item 1", 100, 0.85), ("Item 2", 200, 0.92), ("Item 3", 150, 0.78)]
            .into_iter()
            .map(|(name, value, metric)| DetailItem {
                name: name.to_string(),
                value: DisplayValue::Integer(value),
                metric: Some(metric),
            })
            .collect();

        DetailsPayload { items }
    }
}

fn series_slope(key: SeriesKey) -> f64 {
    match key {
        SeriesKey::Series1 => 1.2,
        SeriesKey::Series2 => 0.8,
        SeriesKey::Series3 => 1.5,
    }
}
