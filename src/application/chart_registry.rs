// Chart registry - owns every chart handle by logical name
use crate::application::chart_backend::{ChartBackend, ChartHandle};
use crate::application::error::MissingElement;
use crate::application::ui_binding::UiBinding;
use crate::domain::chart::{ChartData, ChartKind, ChartSpec, Dataset};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no canvas for chart: {0}")]
    MissingCanvas(#[from] MissingElement),

    #[error("chart `{0}` is already registered")]
    AlreadyRegistered(String),
}

struct RegisteredChart {
    kind: ChartKind,
    data: ChartData,
    handle: Box<dyn ChartHandle>,
}

/// Charts are created once and then only updated in place.
#[derive(Default)]
pub struct ChartRegistry {
    charts: BTreeMap<String, RegisteredChart>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create<U, B>(
        &mut self,
        ui: &U,
        backend: &mut B,
        name: &str,
        canvas_id: &str,
        spec: ChartSpec,
    ) -> Result<(), ChartError>
    where
        U: UiBinding + ?Sized,
        B: ChartBackend + ?Sized,
    {
        if self.charts.contains_key(name) {
            return Err(ChartError::AlreadyRegistered(name.to_string()));
        }
        if !ui.contains(canvas_id) {
            return Err(MissingElement::new(canvas_id).into());
        }

        let handle = backend.construct(canvas_id, &spec);
        tracing::debug!(chart = name, canvas = canvas_id, kind = ?spec.kind, "chart created");

        self.charts.insert(
            name.to_string(),
            RegisteredChart {
                kind: spec.kind,
                data: spec.data,
                handle,
            },
        );
        Ok(())
    }

    /// Replace a chart's labels and datasets wholesale and redraw it.
    ///
    /// Returns false when no chart is registered under `name`.
    pub fn update(&mut self, name: &str, labels: Vec<String>, datasets: Vec<Dataset>) -> bool {
        match self.charts.get_mut(name) {
            Some(chart) => {
                chart.data = ChartData::new(labels, datasets);
                chart.handle.draw(&chart.data);
                true
            }
            None => {
                tracing::debug!(chart = name, "update skipped, chart not registered");
                false
            }
        }
    }

    pub fn data(&self, name: &str) -> Option<&ChartData> {
        self.charts.get(name).map(|chart| &chart.data)
    }

    pub fn kind(&self, name: &str) -> Option<ChartKind> {
        self.charts.get(name).map(|chart| chart.kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.charts.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.charts.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Release every handle. Returns how many were released.
    pub fn destroy_all(&mut self) -> usize {
        let charts = std::mem::take(&mut self.charts);
        let released = charts.len();
        for (name, mut chart) in charts {
            chart.handle.destroy();
            tracing::debug!(chart = %name, "chart destroyed");
        }
        released
    }
}
