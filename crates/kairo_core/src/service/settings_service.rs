//! Settings modal and header toggles.
//!
//! # Invariants
//! - Every change replaces the whole settings value through `SET_SETTINGS`.
//! - Logos are accepted only as inline base64 image data URIs.

use crate::model::settings::{NotificationPrefs, Settings, Theme};
use crate::model::state::AppState;
use crate::repo::kv_repo::KeyValueStore;
use crate::store::{Action, Store};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static LOGO_DATA_URI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/(png|jpe?g|gif|svg\+xml|webp);base64,[A-Za-z0-9+/]+=*$")
        .expect("valid logo regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// Logo is not a `data:image/...;base64,` URI.
    InvalidLogo,
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogo => write!(f, "logo must be an inline base64 image data URI"),
        }
    }
}

impl Error for SettingsError {}

pub fn is_valid_logo(data_uri: &str) -> bool {
    LOGO_DATA_URI_RE.is_match(data_uri.trim())
}

pub struct SettingsService<'a, S: KeyValueStore> {
    store: &'a mut Store<S>,
}

impl<'a, S: KeyValueStore> SettingsService<'a, S> {
    pub fn new(store: &'a mut Store<S>) -> Self {
        Self { store }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn open(&mut self) {
        self.store.dispatch(Action::SetShowSettingsModal(true));
    }

    pub fn close(&mut self) {
        self.store.dispatch(Action::SetShowSettingsModal(false));
    }

    /// Saves the profile form and closes the modal. A blank name keeps the
    /// current one.
    pub fn update_profile(&mut self, user_name: &str, notifications: NotificationPrefs) {
        let user_name = user_name.trim();
        self.update(|settings| {
            if !user_name.is_empty() {
                settings.user_name = user_name.to_string();
            }
            settings.notifications = notifications;
        });
        self.close();
    }

    pub fn select_theme(&mut self, theme: Theme) {
        self.update(|settings| settings.theme = theme);
    }

    pub fn set_logo(&mut self, data_uri: &str) -> Result<(), SettingsError> {
        if !is_valid_logo(data_uri) {
            warn!("event=settings_logo module=service status=rejected");
            return Err(SettingsError::InvalidLogo);
        }
        let logo = data_uri.trim().to_string();
        self.update(|settings| settings.logo = Some(logo));
        info!("event=settings_logo module=service status=ok");
        Ok(())
    }

    pub fn clear_logo(&mut self) {
        self.update(|settings| settings.logo = None);
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.update(|settings| settings.dark_mode = !settings.dark_mode);
        self.store.state().settings.dark_mode
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.update(|settings| settings.sidebar_collapsed = !settings.sidebar_collapsed);
        self.store.state().settings.sidebar_collapsed
    }

    fn update(&mut self, edit: impl FnOnce(&mut Settings)) {
        let mut settings = self.store.state().settings.as_ref().clone();
        edit(&mut settings);
        self.store.dispatch(Action::SetSettings(settings));
    }
}
