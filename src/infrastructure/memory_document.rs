// In-memory UI binding: a flat element tree with a click dispatcher and a mutation journal
use crate::application::error::MissingElement;
use crate::application::ui_binding::{
    ids, ListenerId, TableRow, Toast, ToastId, UiAction, UiBinding,
};
use crate::domain::series::SeriesKey;
use crate::domain::view::ViewId;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub id: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub text: String,
    pub rows: Vec<TableRow>,
    pub toasts: Vec<(ToastId, Toast)>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// One write performed through [`UiBinding`], in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Text { id: String, text: String },
    Class { id: String, class: String, enabled: bool },
    Rows { id: String, count: usize },
    ToastAdded { container: String, toast: ToastId },
    ToastRemoved { container: String, toast: ToastId },
    ListenerAdded { id: String, listener: ListenerId },
    ListenerRemoved { listener: ListenerId },
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    order: Vec<String>,
    elements: BTreeMap<String, Element>,
    listeners: BTreeMap<ListenerId, (String, UiAction)>,
    next_listener: u64,
    next_toast: u64,
    journal: Vec<Mutation>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The markup the dashboard page ships with: overview view selected,
    /// every series toggle active, loading indicator hidden.
    pub fn standard_layout() -> Self {
        let mut doc = Self::new();

        for view in ViewId::ALL {
            let mut nav = Element::new(format!("nav-{}", view)).with_attribute(ids::ATTR_VIEW, view.as_str());
            let mut container = Element::new(view.container_id());
            if view == ViewId::Overview {
                nav = nav.with_class(ids::CLASS_ACTIVE);
            } else {
                container = container.with_class(ids::CLASS_HIDDEN);
            }
            doc.insert(nav);
            doc.insert(container);
        }
        doc.insert(Element::new(ids::PAGE_TITLE).with_text(ViewId::Overview.title()));

        for slot in 1..=4 {
            doc.insert(Element::new(ids::metric_slot(slot)).with_text("-"));
        }

        doc.insert(Element::new(ids::CANVAS_OVERVIEW_BAR));
        doc.insert(Element::new(ids::CANVAS_OVERVIEW_SHARE));
        doc.insert(Element::new(ids::CANVAS_TIMESERIES));
        doc.insert(Element::new(ids::REFRESH_BUTTON));

        for key in SeriesKey::ALL {
            // Buttons carry the compact key form, e.g. `series1`
            let compact = key.as_str().replace('_', "");
            doc.insert(
                Element::new(format!("toggle-{}", compact))
                    .with_attribute(ids::ATTR_SERIES, &compact)
                    .with_class(ids::CLASS_ACTIVE),
            );
        }

        doc.insert(Element::new(ids::DETAILS_TABLE_BODY));
        doc.insert(Element::new(ids::LOADING_INDICATOR).with_class(ids::CLASS_HIDDEN));
        doc.insert(Element::new(ids::LOADING_TEXT));
        doc.insert(Element::new(ids::MESSAGES));
        doc
    }

    pub fn insert(&mut self, element: Element) {
        if !self.elements.contains_key(&element.id) {
            self.order.push(element.id.clone());
        }
        self.elements.insert(element.id.clone(), element);
    }

    pub fn with(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        self.order.retain(|existing| existing != id);
        self.elements.remove(id)
    }

    pub fn without(mut self, id: &str) -> Self {
        self.remove(id);
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text.as_str())
    }

    pub fn rows(&self, id: &str) -> &[TableRow] {
        self.elements
            .get(id)
            .map(|e| e.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn toasts(&self, container_id: &str) -> Vec<Toast> {
        self.elements
            .get(container_id)
            .map(|e| e.toasts.iter().map(|(_, toast)| toast.clone()).collect())
            .unwrap_or_default()
    }

    /// The user closing a toast by hand
    pub fn dismiss_toast(&mut self, container_id: &str, toast: ToastId) -> bool {
        self.remove_toast(container_id, toast)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut Element, MissingElement> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| MissingElement::new(id))
    }
}

impl UiBinding for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), MissingElement> {
        self.element_mut(id)?.text = text.to_string();
        self.journal.push(Mutation::Text {
            id: id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn set_class(&mut self, id: &str, class: &str, enabled: bool) -> Result<(), MissingElement> {
        let element = self.element_mut(id)?;
        if enabled {
            element.classes.insert(class.to_string());
        } else {
            element.classes.remove(class);
        }
        self.journal.push(Mutation::Class {
            id: id.to_string(),
            class: class.to_string(),
            enabled,
        });
        Ok(())
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .map(|e| e.classes.contains(class))
            .unwrap_or(false)
    }

    fn query_attribute(&self, attribute: &str) -> Vec<(String, String)> {
        self.order
            .iter()
            .filter_map(|id| self.elements.get(id))
            .filter_map(|e| e.attribute(attribute).map(|value| (e.id.clone(), value.to_string())))
            .collect()
    }

    fn set_table_rows(&mut self, id: &str, rows: Vec<TableRow>) -> Result<(), MissingElement> {
        let count = rows.len();
        self.element_mut(id)?.rows = rows;
        self.journal.push(Mutation::Rows {
            id: id.to_string(),
            count,
        });
        Ok(())
    }

    fn append_toast(&mut self, container_id: &str, toast: Toast) -> Result<ToastId, MissingElement> {
        let id = ToastId(self.next_toast);
        self.element_mut(container_id)?.toasts.push((id, toast));
        self.next_toast += 1;
        self.journal.push(Mutation::ToastAdded {
            container: container_id.to_string(),
            toast: id,
        });
        Ok(id)
    }

    fn remove_toast(&mut self, container_id: &str, toast: ToastId) -> bool {
        let Some(container) = self.elements.get_mut(container_id) else {
            return false;
        };
        let before = container.toasts.len();
        container.toasts.retain(|(id, _)| *id != toast);
        if container.toasts.len() == before {
            return false;
        }
        self.journal.push(Mutation::ToastRemoved {
            container: container_id.to_string(),
            toast,
        });
        true
    }

    fn add_listener(&mut self, id: &str, action: UiAction) -> Result<ListenerId, MissingElement> {
        if !self.contains(id) {
            return Err(MissingElement::new(id));
        }
        let listener = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(listener, (id.to_string(), action));
        self.journal.push(Mutation::ListenerAdded {
            id: id.to_string(),
            listener,
        });
        Ok(listener)
    }

    fn remove_listener(&mut self, listener: ListenerId) -> bool {
        if self.listeners.remove(&listener).is_none() {
            return false;
        }
        self.journal.push(Mutation::ListenerRemoved { listener });
        true
    }

    fn listeners_on(&self, id: &str) -> Vec<UiAction> {
        self.listeners
            .values()
            .filter(|(element_id, _)| element_id == id)
            .map(|(_, action)| action.clone())
            .collect()
    }
}
