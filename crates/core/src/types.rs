use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Identifier of a dish, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishId(pub u32);

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    #[error("price must be a finite number, got {0}")]
    NotFinite(f64),
    #[error("price must not be negative, got {0}")]
    Negative(f64),
    #[error("price {0} is too large")]
    Overflow(f64),
}

/// Non-negative amount in minor currency units (pence).
///
/// Catalog sources speak in decimal major units; conversion rounds to the
/// nearest minor unit once, at the boundary.
///
/// # Examples
///
/// ```
/// use mycobrew_core::types::Price;
///
/// let price = Price::try_from(4.8).unwrap();
/// assert_eq!(price.minor_units(), 480);
/// assert_eq!(price.to_string(), "4.80");
/// assert!(Price::try_from(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    pub const fn minor_units(self) -> u64 {
        self.0
    }

    pub fn times(self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Formats with a currency symbol, e.g. `£4.50`.
    pub fn with_symbol(self, symbol: &str) -> String {
        format!("{symbol}{self}")
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite(value));
        }
        if value < 0.0 {
            return Err(PriceError::Negative(value));
        }
        let units = (value * 100.0).round();
        if units > u64::MAX as f64 {
            return Err(PriceError::Overflow(value));
        }
        Ok(Price(units as u64))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0 as f64 / 100.0
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, |acc, p| Price(acc.0.saturating_add(p.0)))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub items: Vec<Dish>,
}

/// One basket entry: a snapshot of the dish plus how many were ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub dish: Dish,
    pub quantity: u32,
}

impl LineItem {
    pub fn dish_id(&self) -> DishId {
        self.dish.id
    }

    pub fn line_total(&self) -> Price {
        self.dish.price.times(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub status: String,
    pub phase: String,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// One of `static`, `file`, `mealdb`.
    pub source: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub default_price: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: "static".to_string(),
            path: None,
            endpoint: None,
            default_price: 4.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// One of `emailjs`, `mock`.
    pub provider: String,
    pub endpoint: Option<String>,
    pub service_id: String,
    pub template_id: String,
    pub public_key_env_var: String,
    pub contact_number: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            provider: "emailjs".to_string(),
            endpoint: None,
            service_id: "service_ra3g46m".to_string(),
            template_id: "template_oe3wdmz".to_string(),
            public_key_env_var: "MYCOBREW_EMAILJS_PUBLIC_KEY".to_string(),
            contact_number: "697483".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    pub brand: String,
    pub currency_symbol: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            brand: "mycoBrew".to_string(),
            currency_symbol: "£".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub request_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_ms: 15_000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub contact: ContactConfig,
    pub shop: ShopConfig,
    pub timeouts: TimeoutConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rounds_to_minor_units() {
        assert_eq!(Price::try_from(4.5).unwrap().minor_units(), 450);
        assert_eq!(Price::try_from(4.8).unwrap().minor_units(), 480);
        assert_eq!(Price::try_from(1.999).unwrap().minor_units(), 200);
    }

    #[test]
    fn price_rejects_negative_and_nan() {
        assert_eq!(Price::try_from(-0.5), Err(PriceError::Negative(-0.5)));
        assert!(matches!(
            Price::try_from(f64::NAN),
            Err(PriceError::NotFinite(_))
        ));
    }

    #[test]
    fn price_formats_with_symbol() {
        let price = Price::from_minor_units(1375);
        assert_eq!(price.with_symbol("£"), "£13.75");
        assert_eq!(Price::from_minor_units(5).to_string(), "0.05");
    }

    #[test]
    fn dish_deserializes_decimal_price() {
        let dish: Dish = serde_json::from_str(
            r#"{"id":3,"name":"Earthy Espresso","description":"d","price":4.8,"image":"/images/iced-latte.jpg"}"#,
        )
        .expect("dish parse");
        assert_eq!(dish.id, DishId(3));
        assert_eq!(dish.price.minor_units(), 480);
    }

    #[test]
    fn dish_rejects_negative_price() {
        let err = serde_json::from_str::<Dish>(
            r#"{"id":1,"name":"x","description":"d","price":-1.0,"image":""}"#,
        )
        .expect_err("negative price must fail");
        assert!(err.to_string().contains("negative"));
    }
}
