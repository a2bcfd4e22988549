// Payload domain models for the three dashboard resources
use super::series::SeriesKey;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A JSON value shown as text, printed the way a browser prints scalars.
///
/// Objects and arrays land in `Other` and print as compact JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Null,
    Other(serde_json::Value),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Integer(v) => write!(f, "{}", v),
            DisplayValue::Float(v) => write!(f, "{}", v),
            DisplayValue::Text(v) => f.write_str(v),
            DisplayValue::Bool(v) => write!(f, "{}", v),
            DisplayValue::Null => Ok(()),
            DisplayValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        DisplayValue::Integer(value)
    }
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        DisplayValue::Float(value)
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        DisplayValue::Text(value.to_string())
    }
}

/// Metric name to value, in document order.
///
/// Display slots are filled by position, so the order of the JSON object is
/// significant and must survive deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics(Vec<(String, DisplayValue)>);

impl Metrics {
    pub fn new(entries: Vec<(String, DisplayValue)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DisplayValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Metrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Metrics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetricsVisitor;

        impl<'de> Visitor<'de> for MetricsVisitor {
            type Value = Metrics;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of metric values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Metrics, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, DisplayValue>()? {
                    // Later duplicates overwrite in place, keeping the first position
                    match entries.iter_mut().find(|(existing, _)| *existing == name) {
                        Some((_, slot)) => *slot = value,
                        None => entries.push((name, value)),
                    }
                }
                Ok(Metrics(entries))
            }
        }

        deserializer.deserialize_map(MetricsVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewPayload {
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<CategoryData>,
}

impl OverviewPayload {
    pub fn validate(&self) -> Result<(), String> {
        match &self.chart_data {
            Some(data) if data.labels.len() != data.values.len() => Err(format!(
                "chart_data has {} labels but {} values",
                data.labels.len(),
                data.values.len()
            )),
            _ => Ok(()),
        }
    }
}

/// Round labels plus the three known series; any other member is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesPayload {
    #[serde(default)]
    pub rounds: Vec<DisplayValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_1: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_2: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_3: Option<Vec<f64>>,
}

impl TimeseriesPayload {
    fn series(&self, key: SeriesKey) -> Option<&Vec<f64>> {
        match key {
            SeriesKey::Series1 => self.series_1.as_ref(),
            SeriesKey::Series2 => self.series_2.as_ref(),
            SeriesKey::Series3 => self.series_3.as_ref(),
        }
    }

    pub fn set_series(&mut self, key: SeriesKey, values: Vec<f64>) {
        let slot = match key {
            SeriesKey::Series1 => &mut self.series_1,
            SeriesKey::Series2 => &mut self.series_2,
            SeriesKey::Series3 => &mut self.series_3,
        };
        *slot = Some(values);
    }

    /// Samples for a series; a series absent from the payload is empty.
    pub fn values(&self, key: SeriesKey) -> &[f64] {
        self.series(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn round_labels(&self) -> Vec<String> {
        self.rounds.iter().map(ToString::to_string).collect()
    }

    /// Every series must have exactly one sample per round.
    pub fn validate(&self) -> Result<(), String> {
        for key in SeriesKey::ALL {
            let Some(values) = self.series(key) else {
                continue;
            };
            if values.len() != self.rounds.len() {
                return Err(format!(
                    "{} has {} samples but there are {} rounds",
                    key.as_str(),
                    values.len(),
                    self.rounds.len()
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    pub name: String,
    pub value: DisplayValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<f64>,
}

impl DetailItem {
    pub fn metric_text(&self) -> String {
        match self.metric {
            Some(metric) => format!("{:.2}", metric),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailsPayload {
    #[serde(default)]
    pub items: Vec<DetailItem>,
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_keep_document_order() {
        let payload: OverviewPayload =
            serde_json::from_str(r#"{"metrics": {"Total": 10, "Active": 3, "Avg": 2.5}}"#).unwrap();

        let names: Vec<&str> = payload.metrics.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Total", "Active", "Avg"]);
        assert!(payload.chart_data.is_none());
    }

    #[test]
    fn test_metrics_serialize_in_order() {
        let metrics = Metrics::new(vec![
            ("zeta".to_string(), DisplayValue::from(1_i64)),
            ("alpha".to_string(), DisplayValue::from(2_i64)),
        ]);
        assert_eq!(serde_json::to_string(&metrics).unwrap(), r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_display_values_print_like_a_browser() {
        let values: Vec<DisplayValue> =
            serde_json::from_str(r#"[42, 3.14, 100.0, "ok", true, null]"#).unwrap();
        let printed: Vec<String> = values.iter().map(ToString::to_string).collect();
        assert_eq!(printed, vec!["42", "3.14", "100", "ok", "true", ""]);
    }

    #[test]
    fn test_timeseries_length_mismatch_is_rejected() {
        let payload: TimeseriesPayload =
            serde_json::from_str(r#"{"rounds": [0, 1, 2], "series_1": [1.0, 2.0, 3.0], "series_2": [1.0]}"#)
                .unwrap();
        let err = payload.validate().unwrap_err();
        assert!(err.contains("series_2"));
    }

    #[test]
    fn test_timeseries_missing_series_is_empty() {
        let payload: TimeseriesPayload =
            serde_json::from_str(r#"{"rounds": ["a", "b"], "series_1": [1.0, 2.0]}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.values(SeriesKey::Series1), &[1.0, 2.0]);
        assert!(payload.values(SeriesKey::Series3).is_empty());
        assert_eq!(payload.round_labels(), vec!["a", "b"]);
    }

    #[test]
    fn test_timeseries_ignores_unknown_members() {
        let payload: TimeseriesPayload = serde_json::from_str(
            r#"{"rounds": [0, 1], "series_1": [1, 2], "series_2": [1, 2], "series_3": [1, 2], "unit": "ms"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.values(SeriesKey::Series2), &[1.0, 2.0]);
    }

    #[test]
    fn test_timeseries_extra_series_is_not_validated() {
        let payload: TimeseriesPayload = serde_json::from_str(
            r#"{"rounds": [0, 1], "series_1": [1.0, 2.0], "extra_series": [9.0]}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"rounds":[0,1],"series_1":[1.0,2.0]}"#
        );
    }

    #[test]
    fn test_structured_values_render_as_json_text() {
        let payload: DetailsPayload = serde_json::from_str(
            r#"{"items": [{"name": "A", "value": {"p50": 3}}, {"name": "B", "value": [1, 2]}]}"#,
        )
        .unwrap();
        assert_eq!(payload.items[0].value.to_string(), r#"{"p50":3}"#);
        assert_eq!(payload.items[1].value.to_string(), "[1,2]");

        let overview: OverviewPayload =
            serde_json::from_str(r#"{"metrics": {"Total": 10, "Tags": ["a"]}}"#).unwrap();
        assert_eq!(overview.metrics.len(), 2);
        assert!(matches!(overview.metrics.iter().nth(1), Some((_, DisplayValue::Other(_)))));
    }

    #[test]
    fn test_detail_metric_text() {
        let payload: DetailsPayload = serde_json::from_str(
            r#"{"items": [{"name": "A", "value": 5, "metric": 3.14159}, {"name": "B", "value": "x"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.items[0].metric_text(), "3.14");
        assert_eq!(payload.items[1].metric_text(), "N/A");
    }

    #[test]
    fn test_details_without_items_is_empty() {
        let payload: DetailsPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.items.is_empty());
    }

    #[test]
    fn test_chart_data_length_mismatch_is_rejected() {
        let payload: OverviewPayload = serde_json::from_str(
            r#"{"metrics": {}, "chart_data": {"labels": ["A", "B"], "values": [1]}}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
