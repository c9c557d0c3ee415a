//! Declared snapshot keys
//!
//! A source lists the keys its snapshots will carry so layouts can be
//! checked before the first tick and `--list` can show what each source
//! offers. Sources whose keys are only known at run time declare none.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Numerical,
    /// Numerical, on a 0..=100 scale
    Percentage,
}

impl FieldType {
    /// Bars and graphs can only plot these.
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Numerical | FieldType::Percentage)
    }
}

/// What a panel would typically do with the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPurpose {
    Caption,
    Value,
    Unit,
    SecondaryValue,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Snapshot key
    pub id: String,
    pub name: String,
    pub field_type: FieldType,
    pub purpose: FieldPurpose,
}

impl FieldMetadata {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        field_type: FieldType,
        purpose: FieldPurpose,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            purpose,
        }
    }

    pub fn caption(id: impl Into<String>) -> Self {
        Self::new(id, "Caption", FieldType::Text, FieldPurpose::Caption)
    }

    /// Find `id` among `fields`.
    pub fn find<'a>(fields: &'a [FieldMetadata], id: &str) -> Option<&'a FieldMetadata> {
        fields.iter().find(|field| field.id == id)
    }
}

impl fmt::Display for FieldMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<16} {:<24} {:<11} {:?}",
            self.id,
            self.name,
            format!("{:?}", self.field_type).to_lowercase(),
            self.purpose
        )
    }
}
