// Render pipeline - pushes fetched payloads into charts and page elements
use crate::application::chart_registry::ChartRegistry;
use crate::application::error::skip_missing;
use crate::application::ui_binding::{ids, TableCell, TableRow, UiBinding};
use crate::domain::chart::{
    overview_bar_dataset, overview_share_dataset, Dataset, OVERVIEW_BAR, OVERVIEW_SHARE, TIMESERIES,
};
use crate::domain::payload::{DetailsPayload, OverviewPayload, TimeseriesPayload};
use crate::domain::series::SeriesKey;

pub const EMPTY_TABLE_TEXT: &str = "No data available";
const DETAIL_COLUMNS: u32 = 3;

/// Fill metric slots by position and refresh both overview charts.
///
/// The n-th metric of the payload goes to `metric-{n}` whatever its name.
/// Returns the number of slots written.
pub fn render_overview<U: UiBinding + ?Sized>(
    ui: &mut U,
    charts: &mut ChartRegistry,
    payload: &OverviewPayload,
) -> usize {
    let mut written = 0;
    for (idx, (_, value)) in payload.metrics.iter().enumerate() {
        if skip_missing(ui.set_text(&ids::metric_slot(idx + 1), &value.to_string())).is_some() {
            written += 1;
        }
    }

    if let Some(chart_data) = &payload.chart_data {
        charts.update(
            OVERVIEW_BAR,
            chart_data.labels.clone(),
            vec![overview_bar_dataset(chart_data.values.clone())],
        );
        charts.update(
            OVERVIEW_SHARE,
            chart_data.labels.clone(),
            vec![overview_share_dataset(chart_data.values.clone())],
        );
    }

    written
}

/// One line per selected series, coloured by position within `keys`.
pub fn timeseries_datasets(payload: &TimeseriesPayload, keys: &[SeriesKey]) -> Vec<Dataset> {
    keys.iter()
        .enumerate()
        .map(|(position, key)| Dataset::series_line(*key, position, payload.values(*key).to_vec()))
        .collect()
}

pub fn render_timeseries(
    charts: &mut ChartRegistry,
    payload: &TimeseriesPayload,
    keys: &[SeriesKey],
) -> bool {
    charts.update(
        TIMESERIES,
        payload.round_labels(),
        timeseries_datasets(payload, keys),
    )
}

pub fn details_rows(payload: &DetailsPayload) -> Vec<TableRow> {
    if payload.items.is_empty() {
        return vec![TableRow::new(vec![TableCell::spanning(EMPTY_TABLE_TEXT, DETAIL_COLUMNS)])];
    }

    payload
        .items
        .iter()
        .map(|item| {
            TableRow::new(vec![
                TableCell::new(item.name.as_str()),
                TableCell::new(item.value.to_string()),
                TableCell::new(item.metric_text()),
            ])
        })
        .collect()
}

/// Replace the details table body. Returns false if the table is absent.
pub fn render_details<U: UiBinding + ?Sized>(ui: &mut U, payload: &DetailsPayload) -> bool {
    skip_missing(ui.set_table_rows(ids::DETAILS_TABLE_BODY, details_rows(payload))).is_some()
}
