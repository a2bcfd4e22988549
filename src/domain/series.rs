// Series domain model
use std::fmt;
use std::str::FromStr;

/// Cyclic palette; colour is picked by a series' position in the rendered set.
pub const PALETTE: [&str; 3] = ["#E63946", "#1D3557", "#457B9D"];

pub fn palette_color(position: usize) -> &'static str {
    PALETTE[position % PALETTE.len()]
}

/// One of the three series carried by the timeseries resource.
///
/// Variants are declared in canonical order, so the derived `Ord` keeps
/// rendered sets stable regardless of click order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesKey {
    Series1,
    Series2,
    Series3,
}

impl SeriesKey {
    pub const ALL: [SeriesKey; 3] = [SeriesKey::Series1, SeriesKey::Series2, SeriesKey::Series3];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKey::Series1 => "series_1",
            SeriesKey::Series2 => "series_2",
            SeriesKey::Series3 => "series_3",
        }
    }

    pub fn label(&self) -> String {
        label_for(self.as_str())
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown series `{0}`")]
pub struct UnknownSeries(pub String);

impl FromStr for SeriesKey {
    type Err = UnknownSeries;

    /// Accepts both `series_1` and the compact `series1` used on toggle buttons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_key(s);
        SeriesKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| UnknownSeries(s.to_string()))
    }
}

// Insert an underscore before the first digit when one is missing: "series1" -> "series_1"
fn normalize_key(raw: &str) -> String {
    match raw.find(|c: char| c.is_ascii_digit()) {
        Some(idx) if idx > 0 && !raw[..idx].ends_with('_') => {
            format!("{}_{}", &raw[..idx], &raw[idx..])
        }
        _ => raw.to_string(),
    }
}

/// Human readable label: underscores become spaces and every word is capitalized.
pub fn label_for(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut word_start = true;
    for c in key.chars() {
        if c == '_' {
            label.push(' ');
            word_start = true;
        } else if c.is_alphanumeric() {
            if word_start {
                label.extend(c.to_uppercase());
            } else {
                label.push(c);
            }
            word_start = false;
        } else {
            label.push(c);
            word_start = true;
        }
    }
    label
}
