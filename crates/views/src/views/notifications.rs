//! The notification feed and notification rows.

use common::{Entity, EntityId};

use crate::format;
use crate::render::{Capabilities, Cell, RenderModel, RowAction, RowModel, Tone};

const EMPTY_MESSAGE: &str = "No notifications";

fn is_unread(entity: &Entity) -> bool {
    !entity.bool_field("is_read").unwrap_or(false)
}

fn received(entity: &Entity) -> String {
    entity
        .str_field("created_at")
        .map(format::date_time)
        .unwrap_or_default()
}

/// One entry of the notification dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub id: EntityId,
    pub title: String,
    pub message: String,
    /// `YYYY-MM-DD HH:MM:SS`, or the raw text if unparseable.
    pub received: String,
    pub unread: bool,
}

/// The notification dropdown: counter badge plus entries in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFeed {
    pub items: Vec<NotificationItem>,
    pub unread_count: usize,
}

impl NotificationFeed {
    pub fn from_entities(entities: &[Entity]) -> Self {
        let items: Vec<NotificationItem> = entities
            .iter()
            .map(|entity| NotificationItem {
                id: entity.id().clone(),
                title: entity.text("title").unwrap_or_default(),
                message: entity.text("message").unwrap_or_default(),
                received: received(entity),
                unread: is_unread(entity),
            })
            .collect();
        let unread_count = items.iter().filter(|item| item.unread).count();
        Self {
            items,
            unread_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Text of the counter badge; hidden when nothing is unread.
    pub fn badge_text(&self) -> Option<String> {
        (self.unread_count > 0).then(|| self.unread_count.to_string())
    }

    pub fn empty_message(&self) -> &'static str {
        EMPTY_MESSAGE
    }
}

/// Render model for the notifications collection as a list view.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationRows;

impl NotificationRows {
    pub fn new() -> Self {
        Self
    }
}

impl RenderModel for NotificationRows {
    fn name(&self) -> &'static str {
        "NotificationRows"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Title", "Message", "Received", "Status"]
    }

    fn empty_message(&self) -> &'static str {
        EMPTY_MESSAGE
    }

    fn render_row(&self, entity: &Entity, _capabilities: &Capabilities) -> RowModel {
        let unread = is_unread(entity);
        let status = if unread {
            Cell::badge("Unread", Tone::Warning)
        } else {
            Cell::badge("Read", Tone::Secondary)
        };

        let cells = vec![
            Cell::text(entity.text("title").unwrap_or_default()),
            Cell::text(entity.text("message").unwrap_or_default()),
            Cell::text(received(entity)),
            status,
        ];
        let actions = if unread {
            vec![RowAction::MarkRead]
        } else {
            Vec::new()
        };

        RowModel::new(entity.id().clone(), cells, actions)
    }
}
