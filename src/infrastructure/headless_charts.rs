// Headless chart backend - keeps the last drawn frame of every chart
use crate::application::chart_backend::{ChartBackend, ChartHandle};
use crate::domain::chart::{ChartData, ChartSpec};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything the backend was asked to do, keyed by canvas id.
#[derive(Debug, Clone, Default)]
pub struct ChartLog {
    pub constructed: Vec<String>,
    pub destroyed: Vec<String>,
    draw_counts: HashMap<String, usize>,
    frames: HashMap<String, ChartData>,
}

impl ChartLog {
    pub fn draws(&self, canvas_id: &str) -> usize {
        self.draw_counts.get(canvas_id).copied().unwrap_or(0)
    }

    pub fn last(&self, canvas_id: &str) -> Option<&ChartData> {
        self.frames.get(canvas_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessCharts {
    log: Arc<Mutex<ChartLog>>,
}

impl HeadlessCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ChartLog {
        lock(&self.log).clone()
    }
}

impl ChartBackend for HeadlessCharts {
    fn construct(&mut self, canvas_id: &str, spec: &ChartSpec) -> Box<dyn ChartHandle> {
        {
            let mut log = lock(&self.log);
            log.constructed.push(canvas_id.to_string());
            log.frames.insert(canvas_id.to_string(), spec.data.clone());
        }
        Box::new(HeadlessChart {
            canvas_id: canvas_id.to_string(),
            log: self.log.clone(),
            released: false,
        })
    }
}

struct HeadlessChart {
    canvas_id: String,
    log: Arc<Mutex<ChartLog>>,
    released: bool,
}

impl ChartHandle for HeadlessChart {
    fn draw(&mut self, data: &ChartData) {
        if self.released {
            return;
        }
        let mut log = lock(&self.log);
        *log.draw_counts.entry(self.canvas_id.clone()).or_default() += 1;
        log.frames.insert(self.canvas_id.clone(), data.clone());
    }

    fn destroy(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        lock(&self.log).destroyed.push(self.canvas_id.clone());
    }
}

// A panic while holding the log leaves it usable; it is only a record
fn lock(log: &Mutex<ChartLog>) -> MutexGuard<'_, ChartLog> {
    log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
