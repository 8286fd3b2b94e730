//! User-facing notices
//!
//! Each view keeps a queue of the messages a dashboard would toast. The CLI
//! prints and drains them after every action.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    fn push(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.items.push(Notice {
            kind,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Info, message);
    }

    pub fn last(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn all(&self) -> &[Notice] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.items)
    }
}
