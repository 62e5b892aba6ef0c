use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Stable identifier of an entity within a remote collection.
///
/// Servers hand out identifiers either as JSON numbers (`42`) or strings
/// (`"42"`); both normalise to the same textual form so they compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates an identifier from its textual form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extracts an identifier from a JSON value.
    ///
    /// Returns `None` for nulls, booleans, containers and blank strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.trim().to_string())),
            _ => None,
        }
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        EntityId::from_value(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid entity identifier: {value}")))
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// One record of a remote collection.
///
/// The field map is kept opaque; typed accessors interpret individual
/// fields on demand. The identifier is extracted once, at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    #[serde(skip)]
    id: EntityId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Entity {
    /// Creates an entity from an already-known identifier and its fields.
    pub fn new(id: impl Into<EntityId>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builds an entity from a JSON object, reading the identifier from
    /// `id_field`. Returns `None` when the field is absent or not a usable id.
    pub fn from_fields(fields: Map<String, Value>, id_field: &str) -> Option<Self> {
        let id = fields.get(id_field).and_then(EntityId::from_value)?;
        Some(Self { id, fields })
    }

    /// Returns the entity identifier.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Returns all fields in server order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a raw field value, treating JSON `null` as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    /// Returns a string field.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns the display text of a scalar field.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted,
    /// nulls and containers yield `None`. Empty strings yield `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Returns an integer field, accepting numeric strings.
    pub fn i64_field(&self, field: &str) -> Option<i64> {
        match self.get(field)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a floating point field, accepting numeric strings.
    pub fn f64_field(&self, field: &str) -> Option<f64> {
        match self.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a boolean field. Numbers are truthy when non-zero and the
    /// strings `"true"`/`"false"` are accepted.
    pub fn bool_field(&self, field: &str) -> Option<bool> {
        match self.get(field)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => match s.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns a nested object field.
    pub fn object_field(&self, field: &str) -> Option<&Map<String, Value>> {
        self.get(field).and_then(Value::as_object)
    }
}
