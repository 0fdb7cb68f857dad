//! The store: current state, reducer dispatch and the persistence hook.
//!
//! # Invariants
//! - The reducer is the only writer of state.
//! - After every reduce except rehydration, each changed slice is persisted
//!   once. Write failures are logged and never returned to the dispatcher.
//! - Listeners run only when the state actually changed.

use crate::model::state::AppState;
use crate::repo::kv_repo::KeyValueStore;
use crate::store::action::Action;
use crate::store::persistence::PersistenceAdapter;
use crate::store::reducer::reduce;
use crate::store::slice::changed_slices;
use chrono::NaiveDate;
use log::{debug, error};

/// Handle returned by [`Store::subscribe`].
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&AppState) + Send>;

/// Owner of the single [`AppState`].
pub struct Store<S: KeyValueStore> {
    state: AppState,
    persistence: PersistenceAdapter<S>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
}

impl<S: KeyValueStore> Store<S> {
    /// Creates a store holding startup defaults, without reading storage.
    pub fn new(storage: S, today: NaiveDate) -> Self {
        Self {
            state: AppState::new(today),
            persistence: PersistenceAdapter::new(storage),
            listeners: Vec::new(),
            next_listener_id: 1,
        }
    }

    /// Creates a store and immediately rehydrates it from `storage`.
    pub fn open(storage: S, today: NaiveDate) -> Self {
        let mut store = Self::new(storage, today);
        store.rehydrate();
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    /// Replaces persisted slices with what storage currently holds.
    pub fn rehydrate(&mut self) -> &AppState {
        let persisted = self.persistence.rehydrate();
        self.dispatch(Action::Rehydrate(persisted))
    }

    /// Reduces `action` into the current state.
    pub fn dispatch(&mut self, action: Action) -> &AppState {
        let name = action.name();
        let mirror = !matches!(action, Action::Rehydrate(_));
        let next = reduce(&self.state, action);

        if next == self.state {
            debug!("event=dispatch module=store status=unchanged action={name}");
            return &self.state;
        }

        if mirror {
            for slice in changed_slices(&self.state, &next) {
                match self.persistence.persist(slice, &next) {
                    Ok(()) => debug!(
                        "event=persist_slice module=store status=ok action={name} key={}",
                        slice.storage_key()
                    ),
                    Err(err) => error!(
                        "event=persist_slice module=store status=error action={name} key={} error={err}",
                        slice.storage_key()
                    ),
                }
            }
        }

        self.state = next;
        debug!("event=dispatch module=store status=ok action={name}");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
        &self.state
    }

    /// Decodes and dispatches a JSON envelope.
    ///
    /// Returns `false` (and leaves state untouched) when the envelope does
    /// not name a known action with a valid payload.
    pub fn dispatch_json(&mut self, raw: &str) -> bool {
        match Action::decode(raw) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Registers a callback run after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + Send + 'static) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}
