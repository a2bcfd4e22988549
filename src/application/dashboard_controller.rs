// Dashboard controller - binds the page and drives the load/render cycle
use crate::application::chart_backend::ChartBackend;
use crate::application::chart_registry::ChartRegistry;
use crate::application::data_loader::{DataLoader, Resource};
use crate::application::error::{skip_missing, LoadError};
use crate::application::feedback::FeedbackChannel;
use crate::application::navigation::NavigationController;
use crate::application::render_pipeline::{render_details, render_overview, render_timeseries};
use crate::application::toggle_group::ToggleGroup;
use crate::application::ui_binding::{ids, ListenerId, ToastKind, UiAction, UiBinding};
use crate::domain::chart::{ChartSpec, OVERVIEW_BAR, OVERVIEW_SHARE, TIMESERIES};
use crate::domain::payload::TimeseriesPayload;
use crate::domain::series::SeriesKey;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub const LOADING_MESSAGE: &str = "Loading dashboard data...";
pub const SUCCESS_MESSAGE: &str = "Dashboard data updated";
pub const ERROR_MESSAGE: &str = "Failed to load dashboard data";

/// What a call to [`DashboardController::destroy`] released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Teardown {
    pub listeners: usize,
    pub charts: usize,
}

pub struct DashboardController<U, B> {
    ui: U,
    backend: B,
    loader: DataLoader,
    navigation: NavigationController,
    charts: ChartRegistry,
    toggles: ToggleGroup,
    feedback: FeedbackChannel,
    timeseries: Option<TimeseriesPayload>,
    listeners: Vec<ListenerId>,
    lifetime: CancellationToken,
    initialized: bool,
    destroyed: bool,
}

impl<U: UiBinding, B: ChartBackend> DashboardController<U, B> {
    pub fn new(ui: U, backend: B, loader: DataLoader) -> Self {
        Self {
            ui,
            backend,
            loader,
            navigation: NavigationController::new(),
            charts: ChartRegistry::new(),
            toggles: ToggleGroup::new(),
            feedback: FeedbackChannel::new(),
            timeseries: None,
            listeners: Vec::new(),
            lifetime: CancellationToken::new(),
            initialized: false,
            destroyed: false,
        }
    }

    /// Initialize navigation, charts and listeners. Runs once per controller.
    pub fn initialize(&mut self) {
        if self.destroyed {
            tracing::warn!("dashboard destroyed, not initializing");
            return;
        }
        if self.initialized {
            tracing::warn!("dashboard already initialized, skipping");
            return;
        }
        self.initialized = true;

        self.navigation.adopt_active(&self.ui);
        self.init_charts();
        self.bind_events();

        tracing::info!(
            charts = self.charts.len(),
            listeners = self.listeners.len(),
            "dashboard initialized"
        );
    }

    /// Initialize and run the first load cycle.
    pub async fn start(&mut self) -> Result<(), LoadError> {
        self.initialize();
        self.refresh().await
    }

    fn init_charts(&mut self) {
        let charts = [
            (OVERVIEW_BAR, ids::CANVAS_OVERVIEW_BAR, ChartSpec::overview_bar()),
            (OVERVIEW_SHARE, ids::CANVAS_OVERVIEW_SHARE, ChartSpec::overview_share()),
            (TIMESERIES, ids::CANVAS_TIMESERIES, ChartSpec::timeseries()),
        ];

        for (name, canvas_id, spec) in charts {
            if let Err(e) = self.charts.create(&self.ui, &mut self.backend, name, canvas_id, spec) {
                tracing::debug!(chart = name, error = %e, "chart not created");
            }
        }
    }

    fn bind_events(&mut self) {
        for (element_id, view) in self.ui.query_attribute(ids::ATTR_VIEW) {
            self.listen(&element_id, UiAction::SelectView(view));
        }

        if self.ui.contains(ids::REFRESH_BUTTON) {
            self.listen(ids::REFRESH_BUTTON, UiAction::Refresh);
        }

        let mut active = Vec::new();
        for (element_id, raw_key) in self.ui.query_attribute(ids::ATTR_SERIES) {
            let key = match raw_key.parse::<SeriesKey>() {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!(element = %element_id, error = %e, "ignoring toggle button");
                    continue;
                }
            };
            if self.ui.has_class(&element_id, ids::CLASS_ACTIVE) {
                active.push(key);
            }
            self.listen(&element_id, UiAction::ToggleSeries { element_id: element_id.clone(), key });
        }
        self.toggles = ToggleGroup::with_active(active);
    }

    fn listen(&mut self, element_id: &str, action: UiAction) {
        if let Some(listener) = skip_missing(self.ui.add_listener(element_id, action)) {
            self.listeners.push(listener);
        }
    }

    /// Run the full load cycle: fetch everything, render each resource as it
    /// arrives and report the outcome with a single toast.
    ///
    /// The loading indicator is hidden whatever the outcome.
    pub async fn refresh(&mut self) -> Result<(), LoadError> {
        if self.destroyed {
            return Err(LoadError::Cancelled);
        }

        self.feedback.show_loading(&mut self.ui, Some(LOADING_MESSAGE));
        let token = self.lifetime.child_token();
        let outcome = self.load_and_render(&token).await;

        match &outcome {
            Ok(()) => {
                tracing::info!("dashboard data loaded");
                self.feedback.notify(&mut self.ui, SUCCESS_MESSAGE, ToastKind::Success);
            }
            Err(LoadError::Cancelled) => {
                tracing::info!("dashboard load cancelled");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load dashboard data");
                self.feedback.notify(&mut self.ui, ERROR_MESSAGE, ToastKind::Error);
            }
        }

        self.feedback.hide_loading(&mut self.ui);
        outcome
    }

    async fn load_and_render(&mut self, token: &CancellationToken) -> Result<(), LoadError> {
        let mut pending = self.loader.load_each(token);

        while let Some(resource) = pending.next().await {
            match resource? {
                Resource::Overview(payload) => {
                    let slots = render_overview(&mut self.ui, &mut self.charts, &payload);
                    tracing::debug!(slots, "overview rendered");
                }
                Resource::Timeseries(payload) => {
                    render_timeseries(&mut self.charts, &payload, &self.toggles.effective());
                    self.timeseries = Some(payload);
                    tracing::debug!("timeseries rendered");
                }
                Resource::Details(payload) => {
                    render_details(&mut self.ui, &payload);
                    tracing::debug!(items = payload.items.len(), "details rendered");
                }
            }
        }

        Ok(())
    }

    pub async fn handle(&mut self, action: UiAction) {
        if self.destroyed {
            tracing::debug!(?action, "ignoring action on destroyed dashboard");
            return;
        }

        match action {
            UiAction::SelectView(view) => {
                self.navigation.select_view(&mut self.ui, &view);
            }
            UiAction::Refresh => {
                // Outcome is already reported through the feedback channel
                let _ = self.refresh().await;
            }
            UiAction::ToggleSeries { element_id, key } => {
                self.toggle_series(&element_id, key);
            }
        }
    }

    /// Dispatch a click to every listener bound on `element_id`.
    /// Returns the number of actions handled.
    pub async fn click(&mut self, element_id: &str) -> usize {
        let actions = self.ui.listeners_on(element_id);
        let handled = actions.len();
        for action in actions {
            self.handle(action).await;
        }
        handled
    }

    /// Flip a series toggle and re-render from the cached timeseries, without fetching.
    pub fn toggle_series(&mut self, element_id: &str, key: SeriesKey) -> Vec<SeriesKey> {
        let keys = self.toggles.toggle(key);
        skip_missing(self.ui.set_class(element_id, ids::CLASS_ACTIVE, self.toggles.is_active(key)));

        match &self.timeseries {
            Some(payload) => {
                render_timeseries(&mut self.charts, payload, &keys);
            }
            None => tracing::debug!("no timeseries cached yet, toggle only recorded"),
        }
        keys
    }

    /// Remove toasts whose lifetime has elapsed.
    pub fn expire_toasts(&mut self) -> usize {
        self.feedback.expire(&mut self.ui)
    }

    pub fn next_toast_expiry(&self) -> Option<Instant> {
        self.feedback.next_expiry()
    }

    /// Wait out every pending toast, removing each as its lifetime elapses.
    pub async fn settle_toasts(&mut self) -> usize {
        let mut removed = 0;
        while let Some(deadline) = self.next_toast_expiry() {
            tokio::time::sleep_until(deadline).await;
            removed += self.expire_toasts();
        }
        removed
    }

    /// Event loop: dispatch `actions` and remove toasts when they expire.
    /// Returns once the channel closes or the dashboard is torn down.
    pub async fn run(&mut self, mut actions: mpsc::Receiver<UiAction>) {
        let lifetime = self.lifetime.clone();
        loop {
            let deadline = self.next_toast_expiry();
            tokio::select! {
                biased;
                _ = lifetime.cancelled() => break,
                action = actions.recv() => match action {
                    Some(action) => self.handle(action).await,
                    None => break,
                },
                _ = wait_until(deadline) => {
                    let removed = self.expire_toasts();
                    tracing::debug!(removed, "toasts expired");
                }
            }
        }
        tracing::debug!("dashboard event loop stopped");
    }

    /// Unbind every listener, release every chart and cancel loads in flight.
    /// Later calls release nothing.
    pub fn destroy(&mut self) -> Teardown {
        if self.destroyed {
            return Teardown::default();
        }
        self.destroyed = true;
        self.lifetime.cancel();

        let mut listeners = 0;
        for listener in self.listeners.drain(..) {
            if self.ui.remove_listener(listener) {
                listeners += 1;
            }
        }
        let charts = self.charts.destroy_all();

        tracing::info!(listeners, charts, "dashboard destroyed");
        Teardown { listeners, charts }
    }

    /// Token cancelled on teardown; cancelling it aborts the current load.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn toggles(&self) -> &ToggleGroup {
        &self.toggles
    }

    pub fn feedback(&self) -> &FeedbackChannel {
        &self.feedback
    }

    pub fn cached_timeseries(&self) -> Option<&TimeseriesPayload> {
        self.timeseries.as_ref()
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::data_loader::tests::StubTransport;
    use crate::application::data_loader::{DETAILS_PATH, TIMESERIES_PATH};
    use crate::application::feedback::TOAST_LIFETIME;
    use crate::application::ui_binding::Toast;
    use crate::infrastructure::headless_charts::HeadlessCharts;
    use crate::infrastructure::memory_document::{MemoryDocument, Mutation};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;
    use crate::domain::series::SeriesKey::*;

    type TestController = DashboardController<MemoryDocument, HeadlessCharts>;

    fn controller_with(doc: MemoryDocument, transport: Arc<StubTransport>) -> TestController {
        DashboardController::new(doc, HeadlessCharts::new(), DataLoader::new(transport))
    }

    fn controller(transport: StubTransport) -> TestController {
        controller_with(MemoryDocument::standard_layout(), Arc::new(transport))
    }

    fn loading_hidden_count(doc: &MemoryDocument) -> usize {
        doc.journal()
            .iter()
            .filter(|m| {
                matches!(m, Mutation::Class { id, class, enabled: true }
                    if id == ids::LOADING_INDICATOR && class == ids::CLASS_HIDDEN)
            })
            .count()
    }

    fn timeseries_labels(controller: &TestController) -> Vec<String> {
        controller
            .charts()
            .data(TIMESERIES)
            .unwrap()
            .datasets
            .iter()
            .filter_map(|d| d.label.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_start_renders_every_resource() {
        let mut controller = controller(StubTransport::healthy());

        controller.start().await.unwrap();

        let doc = controller.ui();
        assert_eq!(doc.text("metric-1"), Some("10"));
        assert_eq!(doc.text("metric-2"), Some("3"));
        assert_eq!(doc.rows(ids::DETAILS_TABLE_BODY)[0].texts(), vec!["A", "5", "3.14"]);
        assert_eq!(controller.charts().data(OVERVIEW_BAR).unwrap().labels, vec!["A", "B", "C"]);
        assert_eq!(timeseries_labels(&controller), vec!["Series 1", "Series 2", "Series 3"]);
        assert_eq!(
            doc.toasts(ids::MESSAGES),
            vec![Toast::new(ToastKind::Success, SUCCESS_MESSAGE)]
        );
        assert!(doc.has_class(ids::LOADING_INDICATOR, ids::CLASS_HIDDEN));
        assert!(controller.cached_timeseries().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_reports_one_error_and_hides_loading_once() {
        // Details fails only after overview and timeseries have rendered
        let transport = StubTransport::healthy()
            .respond(DETAILS_PATH, 500, "")
            .delay(DETAILS_PATH, Duration::from_secs(1));
        let mut controller = controller(transport);

        let err = controller.start().await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(controller.cached_timeseries().is_some());
        let doc = controller.ui();
        assert_eq!(doc.text("metric-1"), Some("10"));
        assert_eq!(doc.toasts(ids::MESSAGES), vec![Toast::new(ToastKind::Error, ERROR_MESSAGE)]);
        assert_eq!(loading_hidden_count(doc), 1);
        assert!(!controller.feedback().is_loading());
    }

    #[tokio::test]
    async fn test_toggles_rerender_from_cache_without_fetching() {
        let transport = Arc::new(StubTransport::healthy());
        let mut controller = controller_with(MemoryDocument::standard_layout(), transport.clone());
        controller.start().await.unwrap();
        assert_eq!(transport.requests.load(Ordering::SeqCst), 3);

        assert_eq!(controller.click("toggle-series1").await, 1);
        assert!(!controller.ui().has_class("toggle-series1", ids::CLASS_ACTIVE));
        assert_eq!(timeseries_labels(&controller), vec!["Series 2", "Series 3"]);
        let colors: Vec<Option<String>> = controller
            .charts()
            .data(TIMESERIES)
            .unwrap()
            .datasets
            .iter()
            .map(|d| d.color().map(str::to_string))
            .collect();
        assert_eq!(colors, vec![Some("#E63946".to_string()), Some("#1D3557".to_string())]);

        controller.click("toggle-series2").await;
        assert_eq!(timeseries_labels(&controller), vec!["Series 3"]);

        // Deselecting the last series falls back to all three
        controller.click("toggle-series3").await;
        assert_eq!(timeseries_labels(&controller), vec!["Series 1", "Series 2", "Series 3"]);
        assert_eq!(controller.toggles().effective(), SeriesKey::ALL.to_vec());

        assert_eq!(transport.requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_toggle_before_data_only_records_selection() {
        let mut controller = controller(StubTransport::healthy());
        controller.initialize();

        assert_eq!(controller.toggle_series("toggle-series3", Series3), vec![Series1, Series2]);
        assert!(controller.charts().data(TIMESERIES).unwrap().datasets.is_empty());
    }

    #[tokio::test]
    async fn test_nav_click_selects_view() {
        let mut controller = controller(StubTransport::healthy());
        controller.initialize();

        assert_eq!(controller.click("nav-data").await, 1);

        let doc = controller.ui();
        assert!(!doc.has_class("data-view", ids::CLASS_HIDDEN));
        assert!(doc.has_class("overview-view", ids::CLASS_HIDDEN));
        assert_eq!(doc.text(ids::PAGE_TITLE), Some("Data View"));
        assert_eq!(controller.navigation().active(), Some(crate::domain::view::ViewId::Data));
    }

    #[tokio::test]
    async fn test_refresh_button_refetches() {
        let transport = Arc::new(StubTransport::healthy());
        let mut controller = controller_with(MemoryDocument::standard_layout(), transport.clone());
        controller.start().await.unwrap();

        controller.click(ids::REFRESH_BUTTON).await;

        assert_eq!(transport.requests.load(Ordering::SeqCst), 6);
        assert_eq!(controller.ui().toasts(ids::MESSAGES).len(), 2);
    }

    #[tokio::test]
    async fn test_missing_elements_degrade_only_their_feature() {
        let doc = MemoryDocument::standard_layout()
            .without(ids::CANVAS_OVERVIEW_SHARE)
            .without(ids::REFRESH_BUTTON)
            .without("metric-1");
        let mut controller = controller_with(doc, Arc::new(StubTransport::healthy()));

        controller.start().await.unwrap();

        assert_eq!(controller.charts().names(), vec![OVERVIEW_BAR, TIMESERIES]);
        assert_eq!(controller.ui().text("metric-2"), Some("3"));
        assert_eq!(controller.click(ids::REFRESH_BUTTON).await, 0);
    }

    #[tokio::test]
    async fn test_initialize_twice_does_not_duplicate_listeners() {
        let mut controller = controller(StubTransport::healthy());
        controller.initialize();
        let listeners = controller.ui().listener_count();

        controller.initialize();

        assert_eq!(controller.ui().listener_count(), listeners);
        assert_eq!(controller.backend().snapshot().constructed.len(), 3);
    }

    #[tokio::test]
    async fn test_initialize_after_destroy_binds_nothing() {
        let mut controller = controller(StubTransport::healthy());
        controller.destroy();

        controller.initialize();

        assert_eq!(controller.ui().listener_count(), 0);
        assert!(controller.charts().is_empty());
        assert!(controller.backend().snapshot().constructed.is_empty());
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let mut controller = controller(StubTransport::healthy());
        controller.start().await.unwrap();

        let first = controller.destroy();
        let second = controller.destroy();

        // 4 nav items, the refresh button and 3 toggles
        assert_eq!(first, Teardown { listeners: 8, charts: 3 });
        assert_eq!(second, Teardown::default());
        assert_eq!(controller.ui().listener_count(), 0);
        assert_eq!(controller.backend().snapshot().destroyed.len(), 3);
        assert!(controller.cancellation_token().is_cancelled());

        assert_eq!(controller.click("nav-data").await, 0);
        assert!(matches!(controller.refresh().await, Err(LoadError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_load_shows_no_toast() {
        let transport = StubTransport::healthy().delay(TIMESERIES_PATH, Duration::from_secs(30));
        let mut controller = controller(transport);
        controller.initialize();

        let token = controller.cancellation_token();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            token.cancel();
        });

        let err = controller.refresh().await.unwrap_err();

        assert!(matches!(err, LoadError::Cancelled));
        assert!(controller.ui().toasts(ids::MESSAGES).is_empty());
        assert_eq!(loading_hidden_count(controller.ui()), 1);
    }

    fn toast_mutations(doc: &MemoryDocument) -> (usize, usize) {
        doc.journal().iter().fold((0, 0), |(added, removed), m| match m {
            Mutation::ToastAdded { .. } => (added + 1, removed),
            Mutation::ToastRemoved { .. } => (added, removed + 1),
            _ => (added, removed),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_toasts_waits_out_the_lifetime() {
        let mut controller = controller(StubTransport::healthy());
        controller.start().await.unwrap();
        let started = Instant::now();

        assert_eq!(controller.settle_toasts().await, 1);

        assert!(started.elapsed() >= TOAST_LIFETIME);
        assert!(controller.ui().toasts(ids::MESSAGES).is_empty());
        assert!(controller.next_toast_expiry().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_loop_dispatches_actions_and_expires_toasts() {
        let mut controller = controller(StubTransport::healthy());
        controller.initialize();
        let (tx, rx) = mpsc::channel(4);
        tx.send(UiAction::Refresh).await.unwrap();
        tx.send(UiAction::SelectView("analytics".to_string())).await.unwrap();

        let close = async move {
            tokio::time::sleep(TOAST_LIFETIME + Duration::from_secs(1)).await;
            drop(tx);
        };
        tokio::join!(controller.run(rx), close);

        let doc = controller.ui();
        assert_eq!(toast_mutations(doc), (1, 1));
        assert!(doc.toasts(ids::MESSAGES).is_empty());
        assert_eq!(doc.text(ids::PAGE_TITLE), Some("Analytics"));
        assert!(controller.cached_timeseries().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_loop_stops_on_teardown() {
        let mut controller = controller(StubTransport::healthy());
        controller.initialize();
        let (_tx, rx) = mpsc::channel(1);

        let token = controller.cancellation_token();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            token.cancel();
        });

        controller.run(rx).await;

        assert!(controller.ui().toasts(ids::MESSAGES).is_empty());
    }
}
