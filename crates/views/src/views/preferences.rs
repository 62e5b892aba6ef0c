//! The user preferences form.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Values of the preferences form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: String,
    pub language: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub timezone: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            language: "en".to_string(),
            email_notifications: false,
            sms_notifications: false,
            timezone: "UTC".to_string(),
        }
    }
}

impl Preferences {
    /// Fills the form from a server document.
    ///
    /// Missing, null, empty or mistyped fields take their defaults.
    pub fn from_document(document: &Value) -> Self {
        let defaults = Self::default();
        let text = |field: &str, default: String| {
            document
                .get(field)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(default)
        };
        let flag = |field: &str| document.get(field).and_then(Value::as_bool).unwrap_or(false);

        Self {
            theme: text("theme", defaults.theme),
            language: text("language", defaults.language),
            email_notifications: flag("email_notifications"),
            sms_notifications: flag("sms_notifications"),
            timezone: text("timezone", defaults.timezone),
        }
    }

    /// The body sent when saving.
    pub fn to_payload(&self) -> Value {
        json!({
            "theme": self.theme,
            "language": self.language,
            "email_notifications": self.email_notifications,
            "sms_notifications": self.sms_notifications,
            "timezone": self.timezone,
        })
    }
}
