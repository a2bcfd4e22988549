// UI binding - the only view of the page the dashboard core relies on
use crate::application::error::MissingElement;
use crate::domain::series::SeriesKey;

/// Element identifiers, attributes and classes the dashboard binds to.
pub mod ids {
    pub const PAGE_TITLE: &str = "page-title";
    pub const REFRESH_BUTTON: &str = "refresh-btn";
    pub const DETAILS_TABLE_BODY: &str = "details-table-body";
    pub const LOADING_INDICATOR: &str = "loading-indicator";
    pub const LOADING_TEXT: &str = "loading-text";
    pub const MESSAGES: &str = "messages";

    pub const CANVAS_OVERVIEW_BAR: &str = "chart-1";
    pub const CANVAS_OVERVIEW_SHARE: &str = "chart-2";
    pub const CANVAS_TIMESERIES: &str = "timeseries-chart";

    pub const ATTR_VIEW: &str = "data-view";
    pub const ATTR_SERIES: &str = "data-series";

    pub const CLASS_ACTIVE: &str = "active";
    pub const CLASS_HIDDEN: &str = "hidden";

    /// Metric slots are numbered from 1
    pub fn metric_slot(position: usize) -> String {
        format!("metric-{}", position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(pub u64);

/// What a bound listener does when its element is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    SelectView(String),
    Refresh,
    ToggleSeries { element_id: String, key: SeriesKey },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub colspan: u32,
}

impl TableCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            colspan: 1,
        }
    }

    pub fn spanning(text: impl Into<String>, colspan: u32) -> Self {
        Self {
            text: text.into(),
            colspan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

/// Lookups and mutations the dashboard performs on its page.
///
/// Every mutation reports a [`MissingElement`] instead of panicking so the
/// caller can degrade just the affected feature.
pub trait UiBinding {
    fn contains(&self, id: &str) -> bool;

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), MissingElement>;

    fn set_class(&mut self, id: &str, class: &str, enabled: bool) -> Result<(), MissingElement>;

    fn has_class(&self, id: &str, class: &str) -> bool;

    /// `(element id, attribute value)` for every element carrying `attribute`, in document order
    fn query_attribute(&self, attribute: &str) -> Vec<(String, String)>;

    /// Replace all rows of a table body
    fn set_table_rows(&mut self, id: &str, rows: Vec<TableRow>) -> Result<(), MissingElement>;

    fn append_toast(&mut self, container_id: &str, toast: Toast) -> Result<ToastId, MissingElement>;

    /// Returns false when the toast is already gone
    fn remove_toast(&mut self, container_id: &str, toast: ToastId) -> bool;

    fn add_listener(&mut self, id: &str, action: UiAction) -> Result<ListenerId, MissingElement>;

    /// Returns false when the listener was already removed
    fn remove_listener(&mut self, listener: ListenerId) -> bool;

    /// Actions of every listener currently bound to an element
    fn listeners_on(&self, id: &str) -> Vec<UiAction>;
}
