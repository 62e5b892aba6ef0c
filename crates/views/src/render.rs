//! Row models and the render model trait.

use std::collections::BTreeSet;
use std::str::FromStr;

use common::{Entity, EntityId};

use crate::ViewError;

/// Visual weight of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Success,
    Danger,
    Warning,
    Secondary,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Danger => "danger",
            Tone::Warning => "warning",
            Tone::Secondary => "secondary",
        }
    }
}

/// A short status label shown inside a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub tone: Tone,
}

/// One table cell: plain text, or a badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub badge: Option<Badge>,
}

impl Cell {
    /// A plain text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
        }
    }

    /// A cell holding only a badge. Its text is the badge label.
    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        let label = label.into();
        Self {
            text: label.clone(),
            badge: Some(Badge { label, tone }),
        }
    }
}

/// Something the user can do with a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    View,
    Edit,
    Delete,
    Borrow,
    Pay,
    Return,
    MarkRead,
}

impl RowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowAction::View => "view",
            RowAction::Edit => "edit",
            RowAction::Delete => "delete",
            RowAction::Borrow => "borrow",
            RowAction::Pay => "pay",
            RowAction::Return => "return",
            RowAction::MarkRead => "mark-read",
        }
    }
}

impl std::fmt::Display for RowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered row, keyed by the entity it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowModel {
    pub id: EntityId,
    pub cells: Vec<Cell>,
    pub actions: Vec<RowAction>,
}

impl RowModel {
    pub fn new(id: EntityId, cells: Vec<Cell>, actions: Vec<RowAction>) -> Self {
        Self { id, cells, actions }
    }

    /// Returns true if the row offers `action`.
    pub fn has_action(&self, action: RowAction) -> bool {
        self.actions.contains(&action)
    }

    /// Returns the text of each cell, in column order.
    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

/// The rendered body of a list: rows, or a single placeholder row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<RowModel>),
    Placeholder(String),
}

impl TableBody {
    /// Number of rows displayed, counting the placeholder as one.
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Placeholder(_) => 1,
        }
    }

    /// Returns the entity rows, or an empty slice for a placeholder.
    pub fn rows(&self) -> &[RowModel] {
        match self {
            TableBody::Rows(rows) => rows,
            TableBody::Placeholder(_) => &[],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TableBody::Placeholder(_))
    }
}

/// A permission that gates row actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    ManageBooks,
    ManageUsers,
    Borrow,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageBooks => "manage_books",
            Capability::ManageUsers => "manage_users",
            Capability::Borrow => "borrow",
        }
    }
}

impl FromStr for Capability {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "manage_books" => Ok(Capability::ManageBooks),
            "manage_users" => Ok(Capability::ManageUsers),
            "borrow" => Ok(Capability::Borrow),
            other => Err(ViewError::UnknownCapability(other.to_string())),
        }
    }
}

/// The set of capabilities held by the current user.
///
/// The server remains the authority; capabilities only decide which actions
/// are offered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    granted: BTreeSet<Capability>,
}

impl Capabilities {
    /// No capabilities: read-only rows.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every capability.
    pub fn all() -> Self {
        [
            Capability::ManageBooks,
            Capability::ManageUsers,
            Capability::Borrow,
        ]
        .into_iter()
        .collect()
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.granted.insert(capability);
        self
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    /// Parses a comma separated list such as `"manage_books, borrow"`.
    /// Blank entries are ignored.
    pub fn parse_list(list: &str) -> crate::Result<Self> {
        list.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| entry.parse::<Capability>())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.granted.iter().copied()
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
        }
    }
}

/// Maps entities of one collection to table rows.
///
/// Implementations are pure: the same entity and capabilities always give
/// the same row.
pub trait RenderModel: Send + Sync {
    /// Returns the name of this render model.
    fn name(&self) -> &'static str;

    /// Column headers, in cell order.
    fn columns(&self) -> &'static [&'static str];

    /// Text of the placeholder row shown for an empty result.
    fn empty_message(&self) -> &'static str;

    /// Renders one entity.
    fn render_row(&self, entity: &Entity, capabilities: &Capabilities) -> RowModel;

    /// Renders a whole result, replacing any previous rows.
    fn render(&self, entities: &[Entity], capabilities: &Capabilities) -> TableBody {
        if entities.is_empty() {
            return TableBody::Placeholder(self.empty_message().to_string());
        }
        TableBody::Rows(
            entities
                .iter()
                .map(|entity| self.render_row(entity, capabilities))
                .collect(),
        )
    }
}
