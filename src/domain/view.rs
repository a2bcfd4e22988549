// View domain model
use std::fmt;
use std::str::FromStr;

/// Title shown when the selected view is not one we know about.
pub const DEFAULT_TITLE: &str = "Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Overview,
    Analytics,
    Data,
    Settings,
}

impl ViewId {
    pub const ALL: [ViewId; 4] = [
        ViewId::Overview,
        ViewId::Analytics,
        ViewId::Data,
        ViewId::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Overview => "overview",
            ViewId::Analytics => "analytics",
            ViewId::Data => "data",
            ViewId::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Overview => "Dashboard Overview",
            ViewId::Analytics => "Analytics",
            ViewId::Data => "Data View",
            ViewId::Settings => "Settings",
        }
    }

    /// Element id of the container holding this view, e.g. `overview-view`
    pub fn container_id(&self) -> String {
        format!("{}-view", self.as_str())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view `{0}`")]
pub struct UnknownView(pub String);

impl FromStr for ViewId {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Title for a raw view identifier, falling back to [`DEFAULT_TITLE`].
pub fn title_for(view_id: &str) -> &'static str {
    view_id
        .parse::<ViewId>()
        .map(|view| view.title())
        .unwrap_or(DEFAULT_TITLE)
}
