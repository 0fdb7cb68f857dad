//! Installation-wide settings singleton.

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_NAME: &str = "Your Name";

/// Named color palette. Unknown names decode to `Blue`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Theme {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Self::Blue,
        Self::Purple,
        Self::Green,
        Self::Orange,
        Self::Pink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Pink => "pink",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

/// Independent reminder toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPrefs {
    pub overdue: bool,
    pub upcoming: bool,
    pub updates: bool,
    pub payments: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            overdue: true,
            upcoming: true,
            updates: true,
            payments: true,
        }
    }
}

/// User-facing preferences. Missing fields decode to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub user_name: String,
    /// Inline `data:image/...` URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub theme: Theme,
    pub dark_mode: bool,
    pub sidebar_collapsed: bool,
    pub notifications: NotificationPrefs,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: DEFAULT_USER_NAME.to_string(),
            logo: None,
            theme: Theme::Blue,
            dark_mode: false,
            sidebar_collapsed: false,
            notifications: NotificationPrefs::default(),
        }
    }
}
