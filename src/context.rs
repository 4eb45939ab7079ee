//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// What the side panel is editing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditTarget {
    /// Blank form, store assigns the id on save
    Create,
    /// Full-record edit of an existing patent
    Edit(u32),
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Informational banner message (imports, errors) - read
    pub notice: ReadSignal<Option<String>>,
    set_notice: WriteSignal<Option<String>>,
    /// Current side-panel target - read
    pub editing: ReadSignal<Option<EditTarget>>,
    set_editing: WriteSignal<Option<EditTarget>>,
}

impl AppContext {
    pub fn new(
        notice: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
        editing: (ReadSignal<Option<EditTarget>>, WriteSignal<Option<EditTarget>>),
    ) -> Self {
        Self {
            notice: notice.0,
            set_notice: notice.1,
            editing: editing.0,
            set_editing: editing.1,
        }
    }

    /// Show an informational message (replaces any previous one)
    pub fn info(&self, message: impl Into<String>) {
        self.set_notice.set(Some(message.into()));
    }

    /// Dismiss the informational message
    pub fn clear_notice(&self) {
        self.set_notice.set(None);
    }

    /// Open the side panel for creation or editing
    pub fn open_editor(&self, target: EditTarget) {
        self.set_editing.set(Some(target));
    }

    /// Close the side panel
    pub fn close_editor(&self) {
        self.set_editing.set(None);
    }
}
