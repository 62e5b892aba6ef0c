//! Fine rows.

use common::Entity;

use crate::format;
use crate::render::{Capabilities, Cell, RenderModel, RowAction, RowModel, Tone};

/// Render model for fines.
#[derive(Debug, Clone, Copy, Default)]
pub struct FineRows;

impl FineRows {
    pub fn new() -> Self {
        Self
    }
}

impl RenderModel for FineRows {
    fn name(&self) -> &'static str {
        "FineRows"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["User", "Amount", "Status", "Date"]
    }

    fn empty_message(&self) -> &'static str {
        "No fines found"
    }

    fn render_row(&self, entity: &Entity, _capabilities: &Capabilities) -> RowModel {
        let amount = match entity.f64_field("amount") {
            Some(amount) => format!("{amount:.2}"),
            None => entity.text("amount").unwrap_or_default(),
        };
        let status = entity.text("status").unwrap_or_default();
        let tone = if status == "paid" {
            Tone::Success
        } else {
            Tone::Warning
        };
        let date = entity
            .str_field("date")
            .map(format::date)
            .unwrap_or_default();

        let mut actions = vec![RowAction::View];
        if status == "unpaid" {
            actions.push(RowAction::Pay);
        }

        let cells = vec![
            Cell::text(entity.text("user_name").unwrap_or_else(|| "N/A".to_string())),
            Cell::text(amount),
            Cell::badge(status, tone),
            Cell::text(date),
        ];

        RowModel::new(entity.id().clone(), cells, actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn fine(fields: Value) -> Entity {
        let fields: Map<String, Value> = serde_json::from_value(fields).unwrap();
        Entity::from_fields(fields, "id").unwrap()
    }

    #[test]
    fn unpaid_fine_can_be_paid() {
        let entity = fine(json!({
            "id": 3,
            "user_name": "ada",
            "amount": 2.5,
            "status": "unpaid",
            "date": "2024-05-02T09:15:00"
        }));
        let row = FineRows.render_row(&entity, &Capabilities::none());
        assert_eq!(row.texts(), vec!["ada", "2.50", "unpaid", "2024-05-02"]);
        assert_eq!(row.cells[2].badge.as_ref().unwrap().tone, Tone::Warning);
        assert_eq!(row.actions, vec![RowAction::View, RowAction::Pay]);
    }

    #[test]
    fn paid_fine_without_user() {
        let entity = fine(json!({"id": 4, "amount": "10", "status": "paid", "date": "soon"}));
        let row = FineRows.render_row(&entity, &Capabilities::all());
        assert_eq!(row.texts(), vec!["N/A", "10.00", "paid", "soon"]);
        assert_eq!(row.cells[2].badge.as_ref().unwrap().tone, Tone::Success);
        assert!(!row.has_action(RowAction::Pay));
    }
}
