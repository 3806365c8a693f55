//! One-shot user notifications ("toasts").
//!
//! At most one toast is on screen. It stays fully visible for
//! [`VISIBLE_FOR`], fades out over [`FADE_OUT`] and is then removed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const VISIBLE_FOR: Duration = Duration::from_millis(3000);
pub const FADE_OUT: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    /// Background colour as a CSS hex string.
    pub fn background(&self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Error => "#ef4444",
            Self::Info => "#4f46e5",
        }
    }

    /// Background colour as RGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Success => (0x10, 0xb9, 0x81),
            Self::Error => (0xef, 0x44, 0x44),
            Self::Info => (0x4f, 0x46, 0xe5),
        }
    }
}

/// Where a toast is in its on-screen life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    FadingOut,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    /// Phase of a toast that has been on screen for `elapsed`.
    pub fn phase_at(elapsed: Duration) -> ToastPhase {
        if elapsed < VISIBLE_FOR {
            ToastPhase::Visible
        } else if elapsed < VISIBLE_FOR + FADE_OUT {
            ToastPhase::FadingOut
        } else {
            ToastPhase::Removed
        }
    }
}

/// Holder for the single toast on screen.
#[derive(Debug, Default)]
pub struct ToastSlot {
    current: Option<Notification>,
}

impl ToastSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `notification`, returning the toast it replaced, if any.
    pub fn show(
        &mut self,
        notification: Notification,
    ) -> Option<Notification> {
        self.current.replace(notification)
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.current.take()
    }
}
