// src/interaction.rs

//! User confirmation and notification capabilities.
//!
//! Dashboard flows ask before destructive actions and report outcomes
//! through these traits, so the front end decides how to prompt and how to
//! show messages.

use std::fmt;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Info => write!(f, "{}", self.message),
            Level::Error => write!(f, "Error: {}", self.message),
        }
    }
}

/// Asks the user to confirm an action.
pub trait Confirm {
    /// `true` to proceed.
    fn confirm(&self, message: &str) -> bool;
}

/// Shows a message to the user.
pub trait Notify {
    fn notify(&self, notification: Notification);
}

/// Answers every confirmation the same way.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, message: &str) -> bool {
        log::debug!("Auto-answering {:?} with {}", message, self.0);
        self.0
    }
}

/// Sends notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Info => log::info!("{}", notification.message),
            Level::Error => log::error!("{}", notification.message),
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::cell::RefCell;

    use super::*;

    /// Remembers every prompt and notification.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub answer: bool,
        pub prompts: RefCell<Vec<String>>,
        pub notifications: RefCell<Vec<Notification>>,
    }

    impl Recorder {
        pub fn answering(answer: bool) -> Self {
            Self {
                answer,
                ..Self::default()
            }
        }

        pub fn last(&self) -> Option<Notification> {
            self.notifications.borrow().last().cloned()
        }
    }

    impl Confirm for Recorder {
        fn confirm(&self, message: &str) -> bool {
            self.prompts.borrow_mut().push(message.to_string());
            self.answer
        }
    }

    impl Notify for Recorder {
        fn notify(&self, notification: Notification) {
            self.notifications.borrow_mut().push(notification);
        }
    }
}
