//! # Notifications
//!
//! Fire-and-forget toasts. `notify()` queues a notice; `tick()` ages every
//! notice and drops the ones whose auto-close has elapsed. Nothing reads a
//! notice back except the renderer.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticePosition {
    #[default]
    TopCenter,
    BottomCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeOptions {
    pub auto_close: Duration,
    pub position: NoticePosition,
}

impl NoticeOptions {
    pub fn auto_close(auto_close: Duration) -> Self {
        Self {
            auto_close,
            position: NoticePosition::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub options: NoticeOptions,
    pub age: Duration,
}

impl Notice {
    pub fn is_expired(&self) -> bool {
        self.age >= self.options.auto_close
    }
}

#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>, options: NoticeOptions) {
        let message = message.into();
        log::debug!("Notice {:?}: {}", kind, message);
        self.next_id += 1;
        self.items.push(Notice {
            id: self.next_id,
            kind,
            message,
            options,
            age: Duration::ZERO,
        });
    }

    pub fn tick(&mut self, elapsed: Duration) {
        for notice in &mut self.items {
            notice.age += elapsed;
        }
        self.items.retain(|n| !n.is_expired());
    }

    /// Live notices, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
