//! Borrowing rows.

use common::Entity;
use serde_json::Value;

use crate::format;
use crate::render::{Capabilities, Cell, RenderModel, RowAction, RowModel, Tone};

/// Render model for borrowings.
#[derive(Debug, Clone, Copy, Default)]
pub struct BorrowingRows;

impl BorrowingRows {
    pub fn new() -> Self {
        Self
    }
}

fn book_title(entity: &Entity) -> String {
    entity
        .object_field("book")
        .and_then(|book| book.get("title"))
        .and_then(Value::as_str)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .or_else(|| entity.text("book_title"))
        .or_else(|| entity.text("book_id"))
        .unwrap_or_default()
}

fn date_cell(entity: &Entity, field: &str) -> Cell {
    Cell::text(
        entity
            .str_field(field)
            .filter(|raw| !raw.trim().is_empty())
            .map(format::date)
            .unwrap_or_else(|| "-".to_string()),
    )
}

impl RenderModel for BorrowingRows {
    fn name(&self) -> &'static str {
        "BorrowingRows"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Book", "Borrowed", "Due", "Returned", "Status"]
    }

    fn empty_message(&self) -> &'static str {
        "No borrowings found"
    }

    fn render_row(&self, entity: &Entity, _capabilities: &Capabilities) -> RowModel {
        let returned = entity
            .str_field("return_date")
            .is_some_and(|raw| !raw.trim().is_empty());
        let overdue = entity.bool_field("is_overdue").unwrap_or(false);

        let status = entity.text("status").unwrap_or_else(|| {
            if returned {
                "returned".to_string()
            } else if overdue {
                "overdue".to_string()
            } else {
                "borrowed".to_string()
            }
        });
        let tone = match status.as_str() {
            "overdue" => Tone::Danger,
            "returned" => Tone::Secondary,
            _ if overdue && !returned => Tone::Danger,
            _ => Tone::Success,
        };

        let cells = vec![
            Cell::text(book_title(entity)),
            date_cell(entity, "borrow_date"),
            date_cell(entity, "due_date"),
            date_cell(entity, "return_date"),
            Cell::badge(status, tone),
        ];

        let mut actions = vec![RowAction::View];
        if !returned {
            actions.push(RowAction::Return);
        }

        RowModel::new(entity.id().clone(), cells, actions)
    }
}
