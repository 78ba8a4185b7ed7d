//! Item record and request payloads
//!
//! `NewItem` is the body of a create, `ItemPatch` the body of an update.
//! Patch fields distinguish "absent" (keep) from `null` (clear).

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for item names
pub const MAX_NAME_LEN: usize = 256;

/// Maximum length for item descriptions
pub const MAX_DESCRIPTION_LEN: usize = 4096;

/// Stored item
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Item {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

/// Fields for a new item. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "desc")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "quantity")]
    pub quantity: Option<f64>,
}

impl NewItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("name", self.name.as_deref(), MAX_NAME_LEN)?;
        check_text("description", self.description.as_deref(), MAX_DESCRIPTION_LEN)?;
        check_quantity(self.quantity)
    }

    /// Build the stored record under an assigned id.
    pub fn into_item(self, id: Uuid) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
        }
    }
}

/// Partial update.
///
/// Outer `None` leaves the stored value alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, alias = "desc", deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_quantity")]
    pub quantity: Option<Option<f64>>,
}

impl ItemPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.as_ref().and_then(Option::as_deref);
        let description = self.description.as_ref().and_then(Option::as_deref);
        check_text("name", name, MAX_NAME_LEN)?;
        check_text("description", description, MAX_DESCRIPTION_LEN)?;
        check_quantity(self.quantity.flatten())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.quantity.is_none()
    }

    /// Apply the present fields to `item` in place.
    pub fn apply(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
    }
}

fn check_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(s) if s.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

fn check_quantity(value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(q) if !q.is_finite() => Err(ValidationError::NotFinite { field: "quantity" }),
        Some(q) if q < 0.0 => Err(ValidationError::Negative { field: "quantity" }),
        _ => Ok(()),
    }
}

/// Marks a field as present so `null` becomes `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn present_quantity<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    quantity(deserializer).map(Some)
}

/// Quantity accepts a JSON number, a numeric string, or `null`.
fn quantity<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(QuantityVisitor)
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<f64>()
            .map(Some)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}
