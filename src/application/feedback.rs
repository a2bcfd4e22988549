// Feedback channel - loading indicator and auto-dismissing toasts
use crate::application::error::skip_missing;
use crate::application::ui_binding::{ids, Toast, ToastId, ToastKind, UiBinding};
use std::time::Duration;
use tokio::time::Instant;

/// How long a toast stays up before it is removed.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
pub struct FeedbackChannel {
    expiries: Vec<(ToastId, Instant)>,
    loading: bool,
}

impl FeedbackChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show_loading<U: UiBinding + ?Sized>(&mut self, ui: &mut U, message: Option<&str>) {
        if let Some(message) = message {
            skip_missing(ui.set_text(ids::LOADING_TEXT, message));
        }
        skip_missing(ui.set_class(ids::LOADING_INDICATOR, ids::CLASS_HIDDEN, false));
        self.loading = true;
    }

    pub fn hide_loading<U: UiBinding + ?Sized>(&mut self, ui: &mut U) {
        skip_missing(ui.set_class(ids::LOADING_INDICATOR, ids::CLASS_HIDDEN, true));
        self.loading = false;
    }

    /// Append a toast and schedule its removal after [`TOAST_LIFETIME`].
    pub fn notify<U: UiBinding + ?Sized>(
        &mut self,
        ui: &mut U,
        message: &str,
        kind: ToastKind,
    ) -> Option<ToastId> {
        let id = skip_missing(ui.append_toast(ids::MESSAGES, Toast::new(kind, message)))?;
        self.expiries.push((id, Instant::now() + TOAST_LIFETIME));
        Some(id)
    }

    /// Remove every toast whose lifetime has elapsed. Toasts the user already
    /// dismissed are skipped silently. Returns how many were removed.
    pub fn expire<U: UiBinding + ?Sized>(&mut self, ui: &mut U) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.expiries.retain(|(id, deadline)| {
            if *deadline > now {
                return true;
            }
            if ui.remove_toast(ids::MESSAGES, *id) {
                removed += 1;
            }
            false
        });
        removed
    }

    /// Earliest pending removal, for driving [`FeedbackChannel::expire`] from a timer.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.expiries.iter().map(|(_, deadline)| *deadline).min()
    }

    pub fn pending(&self) -> usize {
        self.expiries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_document::MemoryDocument;

    #[test]
    fn test_loading_indicator_toggles() {
        let mut doc = MemoryDocument::standard_layout();
        let mut feedback = FeedbackChannel::new();

        feedback.show_loading(&mut doc, Some("Loading..."));
        assert!(!doc.has_class(ids::LOADING_INDICATOR, ids::CLASS_HIDDEN));
        assert_eq!(doc.text(ids::LOADING_TEXT), Some("Loading..."));
        assert!(feedback.is_loading());

        feedback.hide_loading(&mut doc);
        assert!(doc.has_class(ids::LOADING_INDICATOR, ids::CLASS_HIDDEN));
        assert!(!feedback.is_loading());
    }

    #[test]
    fn test_loading_without_message_keeps_text() {
        let mut doc = MemoryDocument::standard_layout();
        let mut feedback = FeedbackChannel::new();
        feedback.show_loading(&mut doc, Some("first"));
        feedback.show_loading(&mut doc, None);
        assert_eq!(doc.text(ids::LOADING_TEXT), Some("first"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_expire_after_lifetime() {
        let mut doc = MemoryDocument::standard_layout();
        let mut feedback = FeedbackChannel::new();

        feedback.notify(&mut doc, "saved", ToastKind::Success);
        tokio::time::advance(Duration::from_secs(2)).await;
        feedback.notify(&mut doc, "broken", ToastKind::Error);
        assert_eq!(doc.toasts(ids::MESSAGES).len(), 2);

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(feedback.expire(&mut doc), 1);
        assert_eq!(doc.toasts(ids::MESSAGES), vec![Toast::new(ToastKind::Error, "broken")]);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(feedback.expire(&mut doc), 1);
        assert!(doc.toasts(ids::MESSAGES).is_empty());
        assert_eq!(feedback.next_expiry(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_of_dismissed_toast_is_a_no_op() {
        let mut doc = MemoryDocument::standard_layout();
        let mut feedback = FeedbackChannel::new();

        let id = feedback.notify(&mut doc, "saved", ToastKind::Success).unwrap();
        assert!(doc.dismiss_toast(ids::MESSAGES, id));

        tokio::time::advance(TOAST_LIFETIME).await;
        assert_eq!(feedback.expire(&mut doc), 0);
        assert_eq!(feedback.pending(), 0);
    }

    #[test]
    fn test_notify_without_container_is_soft() {
        let mut doc = MemoryDocument::standard_layout().without(ids::MESSAGES);
        let mut feedback = FeedbackChannel::new();
        assert_eq!(feedback.notify(&mut doc, "lost", ToastKind::Error), None);
        assert_eq!(feedback.pending(), 0);
    }
}
