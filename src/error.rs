// File: ./src/error.rs
//! User-facing error taxonomy and the alert ("notice") model shown by every frontend.
//!
//! Controllers never crash on a failed action: each failure is returned as an
//! [`AppError`] which frontends turn into a [`Notice`] via [`AppError::to_notice`].
use thiserror::Error;

/// Follow-up button offered alongside a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    Dismiss,
    /// Offered when saving to the gallery is impossible on this build.
    ShareInstead,
}

impl NoticeAction {
    pub fn label(self) -> &'static str {
        match self {
            NoticeAction::Dismiss => "OK",
            NoticeAction::ShareInstead => "Share Instead",
        }
    }
}

/// A user-visible alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub actions: Vec<NoticeAction>,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            actions: vec![NoticeAction::Dismiss],
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new("Success", message)
    }

    pub fn with_action(mut self, action: NoticeAction) -> Self {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A required input was blank. State is left unchanged.
    #[error("{message}")]
    Validation {
        title: &'static str,
        message: &'static str,
    },

    #[error("{message}")]
    Permission { message: &'static str },

    /// A platform capability (capture, copy, share, gallery, decode) failed.
    #[error("{}", join_cause(context, cause))]
    Capability {
        title: &'static str,
        context: &'static str,
        cause: String,
    },

    /// The running build lacks a capability entirely.
    #[error("{message}")]
    Unavailable {
        title: &'static str,
        message: &'static str,
        fallback: Option<NoticeAction>,
    },

    /// The action was invoked without the state it needs (e.g. sharing before generating).
    #[error("{0}")]
    Precondition(&'static str),

    #[error("cannot {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

fn join_cause(context: &str, cause: &str) -> String {
    if context.is_empty() {
        cause.to_string()
    } else {
        format!("{}: {}", context, cause)
    }
}

impl AppError {
    /// Wraps an underlying capability failure, keeping its message for the user.
    pub fn capability(title: &'static str, context: &'static str, err: &anyhow::Error) -> Self {
        let cause = err.to_string();
        AppError::Capability {
            title,
            context,
            cause: if cause.is_empty() {
                "Unknown error occurred".to_string()
            } else {
                cause
            },
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppError::Validation { title, .. } => *title,
            AppError::Permission { .. } => "Permission Required",
            AppError::Capability { title, .. } => *title,
            AppError::Unavailable { title, .. } => *title,
            AppError::Precondition(_) => "Nothing To Export",
            AppError::InvalidTransition { .. } => "Error",
        }
    }

    pub fn to_notice(&self) -> Notice {
        let notice = Notice::new(self.title(), self.to_string());
        match self {
            AppError::Unavailable {
                fallback: Some(action),
                ..
            } => notice.with_action(*action),
            _ => notice,
        }
    }
}
