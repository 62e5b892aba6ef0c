//! User rows.

use common::Entity;

use crate::render::{Capabilities, Capability, Cell, RenderModel, RowAction, RowModel, Tone};

/// Render model for user accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserRows;

impl UserRows {
    pub fn new() -> Self {
        Self
    }
}

impl RenderModel for UserRows {
    fn name(&self) -> &'static str {
        "UserRows"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Username", "Full name", "Email", "Role", "Status"]
    }

    fn empty_message(&self) -> &'static str {
        "No users found"
    }

    fn render_row(&self, entity: &Entity, capabilities: &Capabilities) -> RowModel {
        let status = if entity.bool_field("is_active").unwrap_or(false) {
            Cell::badge("Active", Tone::Success)
        } else {
            Cell::badge("Inactive", Tone::Secondary)
        };

        let cells = vec![
            Cell::text(entity.text("username").unwrap_or_default()),
            Cell::text(entity.text("full_name").unwrap_or_default()),
            Cell::text(entity.text("email").unwrap_or_default()),
            Cell::text(entity.text("role").unwrap_or_default()),
            status,
        ];

        let mut actions = vec![RowAction::View];
        if capabilities.has(Capability::ManageUsers) {
            actions.extend([RowAction::Edit, RowAction::Delete]);
        }

        RowModel::new(entity.id().clone(), cells, actions)
    }
}
