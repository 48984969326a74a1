//! UI notification boundary
//!
//! The core never draws anything; it reports through this trait and the
//! host decides how to show it.

use crate::items::{Item, ItemId};

/// Fire-and-forget events for the UI layer
pub trait UiEvents {
    /// The dragged item was consumed by the drop (picked up)
    fn item_taken(&mut self, item: &Item);

    /// A new item was placed into a container
    fn item_placed(&mut self, item: &Item);

    /// User-facing notification text
    fn toast(&mut self, text: String);
}

/// Recording implementation, used by the demo and by tests
#[derive(Debug, Default)]
pub struct NotificationLog {
    pub taken: Vec<ItemId>,
    pub placed: Vec<ItemId>,
    pub toasts: Vec<String>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of toasts containing a fragment
    pub fn toast_count(&self, fragment: &str) -> usize {
        self.toasts.iter().filter(|t| t.contains(fragment)).count()
    }
}

impl UiEvents for NotificationLog {
    fn item_taken(&mut self, item: &Item) {
        self.taken.push(item.id);
    }

    fn item_placed(&mut self, item: &Item) {
        self.placed.push(item.id);
    }

    fn toast(&mut self, text: String) {
        self.toasts.push(text);
    }
}
