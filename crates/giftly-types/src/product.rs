use serde::{Deserialize, Serialize};

/// A price as delivered by the product search API: either a JSON number or a
/// string such as `"1,299.00"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl Default for PriceValue {
    fn default() -> Self {
        PriceValue::Number(0.0)
    }
}

impl From<f64> for PriceValue {
    fn from(value: f64) -> Self {
        PriceValue::Number(value)
    }
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        PriceValue::Text(value.to_string())
    }
}

/// A product recommendation returned by the shopping assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub price: PriceValue,
    #[serde(default)]
    pub discounted_price: PriceValue,
    pub url: String,
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub score: Option<f64>,
    pub rank: Option<u32>,
}
