//! # Guest slip store — local cart for unauthenticated betting
//!
//! Source of truth for the bet slip only while no session exists. Every
//! mutation re-serializes the full ordered entry list to the fixed
//! [`keys::GUEST_SLIP`](crate::storage::keys::GUEST_SLIP) key before
//! returning, so readers always see an immediately durable view.
//!
//! Invariants:
//! - at most one entry per event identifier;
//! - within an entry, at most one selection per market category;
//! - an entry whose selection set becomes empty is deleted.

use std::sync::{Arc, Mutex};

use crate::models::{EventRef, GuestSelection, GuestSlipEntry, SelectionsByCategory};
use crate::storage::{keys, load_json, save_json, LocalStore};

type Subscriber = Box<dyn Fn(&[GuestSlipEntry]) + Send>;

/// Local cart holding an unauthenticated visitor's selected wagers.
#[derive(Clone)]
pub struct GuestSlipStore<S: LocalStore> {
    store: S,
    items: Arc<Mutex<Vec<GuestSlipEntry>>>,
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl<S: LocalStore> GuestSlipStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            items: Arc::new(Mutex::new(Vec::new())),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Load the persisted slip at startup. A missing or corrupt value reads
    /// as an empty slip.
    pub async fn restore(&self) {
        let items: Vec<GuestSlipEntry> =
            load_json(&self.store, keys::GUEST_SLIP).await.unwrap_or_default();
        *self.items.lock().unwrap() = items;
        self.notify();
    }

    /// Replace the entry for `event` with one built from `selections`.
    ///
    /// The entry's selection set is derived entirely from the given mapping
    /// each call; callers wanting to retain a category must include it. An
    /// empty mapping removes the event's entry.
    pub async fn add_selection(&self, event: &EventRef, selections: &SelectionsByCategory) {
        {
            let mut items = self.items.lock().unwrap();
            items.retain(|item| item.event_id != event.id);

            if !selections.is_empty() {
                items.push(GuestSlipEntry {
                    event_id: event.id.clone(),
                    event_description: event.description.clone(),
                    home_team: event.home_team.clone(),
                    away_team: event.away_team.clone(),
                    selections: selections
                        .iter()
                        .map(|(category, choice)| GuestSelection {
                            category: category.clone(),
                            odd_key: choice.outcome.clone(),
                            odd_value: choice.value.clone(),
                            label: choice.label.clone(),
                            odd_id: choice.odd_id.clone(),
                        })
                        .collect(),
                });
            }
        }
        self.persist().await;
    }

    /// Remove the selection with `outcome_key` from the entry for
    /// `event_id`, deleting the entry when no selections remain. No-op when
    /// the event is not on the slip.
    pub async fn remove_selection(&self, event_id: &str, outcome_key: &str) {
        {
            let mut items = self.items.lock().unwrap();
            for item in items.iter_mut() {
                if item.event_id == event_id {
                    item.selections.retain(|sel| sel.odd_key != outcome_key);
                }
            }
            items.retain(|item| !item.selections.is_empty());
        }
        self.persist().await;
    }

    /// Empty the entire slip.
    pub async fn clear(&self) {
        self.items.lock().unwrap().clear();
        self.persist().await;
    }

    pub fn entries(&self) -> Vec<GuestSlipEntry> {
        self.items.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }

    /// Register a callback invoked after every slip change.
    pub fn subscribe(&self, callback: impl Fn(&[GuestSlipEntry]) + Send + 'static) {
        self.subscribers.lock().unwrap().push(Box::new(callback));
    }

    async fn persist(&self) {
        let items = self.entries();
        save_json(&self.store, keys::GUEST_SLIP, &items).await;
        self.notify();
    }

    fn notify(&self) {
        let items = self.entries();
        for subscriber in self.subscribers.lock().unwrap().iter() {
            subscriber(&items);
        }
    }
}
