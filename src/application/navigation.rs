// Navigation controller - which view is visible and what the page is titled
use crate::application::error::skip_missing;
use crate::application::ui_binding::{ids, UiBinding};
use crate::domain::view::{title_for, ViewId};

#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    active: Option<ViewId>,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<ViewId> {
        self.active
    }

    /// Pick up the view the page was rendered with, i.e. the nav item already marked active.
    pub fn adopt_active<U: UiBinding + ?Sized>(&mut self, ui: &U) -> Option<ViewId> {
        self.active = ui
            .query_attribute(ids::ATTR_VIEW)
            .into_iter()
            .find(|(element_id, _)| ui.has_class(element_id, ids::CLASS_ACTIVE))
            .and_then(|(_, view)| view.parse().ok());
        self.active
    }

    /// Show the container of `view_id`, hide every other view and retitle the page.
    ///
    /// Unknown ids hide every view and fall back to the default title.
    pub fn select_view<U: UiBinding + ?Sized>(&mut self, ui: &mut U, view_id: &str) -> Option<ViewId> {
        let target = view_id.parse::<ViewId>().ok();
        if target.is_none() {
            tracing::debug!(view = view_id, "selected unknown view");
        }

        for (element_id, view) in ui.query_attribute(ids::ATTR_VIEW) {
            skip_missing(ui.set_class(&element_id, ids::CLASS_ACTIVE, view == view_id));
        }

        for view in ViewId::ALL {
            skip_missing(ui.set_class(&view.container_id(), ids::CLASS_HIDDEN, Some(view) != target));
        }

        skip_missing(ui.set_text(ids::PAGE_TITLE, title_for(view_id)));

        self.active = target;
        target
    }
}
