//! Alert system for displaying success, informational, warning and error
//! messages to users.

use maud::{Markup, html};

/// A message shown to the user after an action, styled by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action completed.
    Success { message: String, details: String },
    /// Something the user should know, but nothing went wrong.
    Info { message: String, details: String },
    /// The action could not be performed with the current data.
    Warning { message: String, details: String },
    /// The action failed.
    Error { message: String, details: String },
}

impl Alert {
    /// Create a success alert without details.
    pub fn success(message: &str) -> Self {
        Alert::Success {
            message: message.to_owned(),
            details: String::new(),
        }
    }

    /// Create an informational alert without details.
    pub fn info(message: &str) -> Self {
        Alert::Info {
            message: message.to_owned(),
            details: String::new(),
        }
    }

    /// Create a warning alert without details.
    pub fn warning(message: &str) -> Self {
        Alert::Warning {
            message: message.to_owned(),
            details: String::new(),
        }
    }

    /// Create an error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Alert::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as a `div` with an ARIA role matching its kind.
    pub fn into_html(self) -> Markup {
        let (style, role, message, details) = match self {
            Alert::Success { message, details } => (
                "text-green-800 bg-green-50 border-green-300 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                "status",
                message,
                details,
            ),
            Alert::Info { message, details } => (
                "text-blue-800 bg-blue-50 border-blue-300 \
                dark:bg-gray-800 dark:text-blue-400 dark:border-blue-800",
                "status",
                message,
                details,
            ),
            Alert::Warning { message, details } => (
                "text-yellow-800 bg-yellow-50 border-yellow-300 \
                dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800",
                "alert",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "text-red-800 bg-red-50 border-red-300 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                "alert",
                message,
                details,
            ),
        };

        html! {
            div
                class={"alert flex flex-col p-4 mb-4 text-sm border rounded-lg " (style)}
                role=(role)
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    p class="mt-1" { (details) }
                }
            }
        }
    }
}
