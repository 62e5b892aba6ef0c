//! Book rows, shared by the catalogue and the advanced search.

use common::Entity;

use crate::render::{Capabilities, Capability, Cell, RenderModel, RowAction, RowModel, Tone};

const COLUMNS: &[&str] = &["Title", "Author", "ISBN", "Category", "Copies", "Status"];

/// Render model for book records.
#[derive(Debug, Clone, Copy)]
pub struct BookRows {
    name: &'static str,
    empty_message: &'static str,
}

impl BookRows {
    /// Rows for the catalogue listing.
    pub fn new() -> Self {
        Self {
            name: "BookRows",
            empty_message: "No books found",
        }
    }

    /// Rows for the advanced search results.
    pub fn search() -> Self {
        Self {
            name: "BookSearchRows",
            empty_message: "No books found matching your criteria",
        }
    }
}

impl Default for BookRows {
    fn default() -> Self {
        Self::new()
    }
}

/// Available copies, from whichever field the endpoint uses.
fn available_copies(entity: &Entity) -> Option<i64> {
    entity
        .i64_field("available_copies")
        .or_else(|| entity.i64_field("copies_available"))
}

fn copies_text(available: Option<i64>, total: Option<i64>) -> String {
    match (available, total) {
        (Some(available), Some(total)) => format!("{available} / {total}"),
        (Some(available), None) => available.to_string(),
        (None, Some(total)) => format!("0 / {total}"),
        (None, None) => "0".to_string(),
    }
}

impl RenderModel for BookRows {
    fn name(&self) -> &'static str {
        self.name
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn empty_message(&self) -> &'static str {
        self.empty_message
    }

    fn render_row(&self, entity: &Entity, capabilities: &Capabilities) -> RowModel {
        let available = available_copies(entity);
        let in_stock = available.unwrap_or(0) > 0;
        let category = entity
            .text("category_name")
            .or_else(|| entity.text("category"))
            .unwrap_or_else(|| "Uncategorized".to_string());

        let status = if in_stock {
            Cell::badge("Available", Tone::Success)
        } else {
            Cell::badge("Borrowed", Tone::Danger)
        };

        let cells = vec![
            Cell::text(entity.text("title").unwrap_or_default()),
            Cell::text(entity.text("author").unwrap_or_default()),
            Cell::text(entity.text("isbn").unwrap_or_default()),
            Cell::text(category),
            Cell::text(copies_text(available, entity.i64_field("total_copies"))),
            status,
        ];

        let mut actions = vec![RowAction::View];
        if in_stock && capabilities.has(Capability::Borrow) {
            actions.push(RowAction::Borrow);
        }
        if capabilities.has(Capability::ManageBooks) {
            actions.extend([RowAction::Edit, RowAction::Delete]);
        }

        RowModel::new(entity.id().clone(), cells, actions)
    }
}
