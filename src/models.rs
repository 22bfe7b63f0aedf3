use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use utoipa::ToSchema;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub stock: i32,
    pub category: String,
    #[schema(value_type = f64, example = 4.5)]
    pub rating: Rating,
    pub description: String,
    pub image: String,
    pub brand: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specifications: Vec<ProductSpec>,
}

/// One key-value specification row as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSpec {
    pub key: String,
    pub value: String,
}

impl ProductSpec {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A formatted specification waiting to be written at a fixed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecEntry {
    pub key: &'static str,
    pub value: String,
    pub display_order: i32,
}

impl SpecEntry {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Product rating kept as a two-place decimal.
///
/// Every constructor is total: anything that cannot be represented becomes
/// zero instead of an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(Decimal);

impl Rating {
    pub const ZERO: Rating = Rating(Decimal::ZERO);
    pub const SCALE_MAX: i64 = 5;

    pub fn from_decimal(value: Option<Decimal>) -> Self {
        value
            .map(|d| Rating(d.round_dp(2)))
            .unwrap_or_default()
    }

    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Rating::ZERO;
        }
        Rating::from_decimal(Decimal::from_f64(value))
    }

    pub fn parse(text: &str) -> Self {
        Rating::from_decimal(Decimal::from_str(text.trim()).ok())
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Ratings are on a 0 to 5 scale.
    pub fn in_range(&self) -> bool {
        self.0 >= Decimal::ZERO && self.0 <= Decimal::from(Rating::SCALE_MAX)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(Rating::from_f64(value.unwrap_or(0.0)))
    }
}

/// Display name for a joined category column.
pub fn category_display_name(name: Option<String>) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => UNCATEGORIZED.to_string(),
    }
}
