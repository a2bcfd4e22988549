// Toggle group - which series the timeseries chart shows
use crate::domain::series::{label_for, SeriesKey};
use std::collections::BTreeSet;

/// Multi-select series toggles. An empty selection means "show everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleGroup {
    active: BTreeSet<SeriesKey>,
}

impl ToggleGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(keys: impl IntoIterator<Item = SeriesKey>) -> Self {
        Self {
            active: keys.into_iter().collect(),
        }
    }

    /// Flip `key` and return the series to render, in canonical order.
    pub fn toggle(&mut self, key: SeriesKey) -> Vec<SeriesKey> {
        if !self.active.remove(&key) {
            self.active.insert(key);
        }
        self.effective()
    }

    pub fn is_active(&self, key: SeriesKey) -> bool {
        self.active.contains(&key)
    }

    pub fn effective(&self) -> Vec<SeriesKey> {
        if self.active.is_empty() {
            SeriesKey::ALL.to_vec()
        } else {
            self.active.iter().copied().collect()
        }
    }

    pub fn label_for(key: SeriesKey) -> String {
        label_for(key.as_str())
    }
}
