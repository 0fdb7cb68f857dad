//! Notifications panel and inbox operations.

use crate::clock::Clock;
use crate::model::inbox::{Message, Notification, NotificationKind};
use crate::model::state::AppState;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::next_id;
use crate::store::{Action, Store};
use log::warn;

pub struct InboxService<'a, S: KeyValueStore, C: Clock> {
    store: &'a mut Store<S>,
    clock: C,
}

impl<'a, S: KeyValueStore, C: Clock> InboxService<'a, S, C> {
    pub fn new(store: &'a mut Store<S>, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Prepends an unread notification and returns its id.
    ///
    /// Returns `None` without changing state when no id is free.
    pub fn push_notification(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Option<i64> {
        let now = self.clock.now();
        let current = &self.store.state().notifications;
        let Some(id) = next_id(current.iter().map(|item| item.id), now.timestamp_millis()) else {
            warn!("event=notification_push module=service status=skipped reason=no_free_id");
            return None;
        };

        let mut items = Vec::with_capacity(current.len() + 1);
        items.push(Notification {
            id,
            title: title.into(),
            message: message.into(),
            kind,
            read: false,
            date: now,
        });
        items.extend(current.iter().cloned());
        self.store.dispatch(Action::SetNotifications(items));
        Some(id)
    }

    /// Marks one notification read. Unknown ids change nothing.
    pub fn mark_notification_read(&mut self, id: i64) {
        let items = self
            .store
            .state()
            .notifications
            .iter()
            .map(|item| Notification {
                read: item.read || item.id == id,
                ..item.clone()
            })
            .collect();
        self.store.dispatch(Action::SetNotifications(items));
    }

    pub fn mark_all_notifications_read(&mut self) {
        let items = self
            .store
            .state()
            .notifications
            .iter()
            .map(|item| Notification {
                read: true,
                ..item.clone()
            })
            .collect();
        self.store.dispatch(Action::SetNotifications(items));
    }

    pub fn clear_notifications(&mut self) {
        self.store.dispatch(Action::SetNotifications(Vec::new()));
    }

    pub fn toggle_notifications_panel(&mut self) {
        let open = self.store.state().ui.show_notifications_panel;
        self.store.dispatch(Action::SetShowNotificationsPanel(!open));
    }

    pub fn mark_message_read(&mut self, id: i64) {
        let items = self
            .store
            .state()
            .messages
            .iter()
            .map(|item| Message {
                read: item.read || item.id == id,
                ..item.clone()
            })
            .collect();
        self.store.dispatch(Action::SetMessages(items));
    }

    pub fn open_inbox(&mut self) {
        self.store.dispatch(Action::SetShowInboxModal(true));
    }

    pub fn close_inbox(&mut self) {
        self.store.dispatch(Action::SetShowInboxModal(false));
    }
}
