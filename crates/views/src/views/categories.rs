//! Category filter options.

use common::Entity;

/// Options of the category dropdown, as `(value, label)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptions {
    options: Vec<(String, String)>,
}

impl CategoryOptions {
    /// Builds the options, leading with the unfiltered choice.
    pub fn from_entities(entities: &[Entity]) -> Self {
        let options = std::iter::once((String::new(), "All Categories".to_string()))
            .chain(entities.iter().map(|category| {
                (
                    category.id().to_string(),
                    category.text("name").unwrap_or_default(),
                )
            }))
            .collect();
        Self { options }
    }

    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    /// Looks up the label of a value.
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, label)| label.as_str())
    }
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self::from_entities(&[])
    }
}
