use serde::{Deserialize, Serialize};

use crate::de::{number_or_string, opt_number_or_string};
use crate::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = crate::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value::<OrderStatus>(serde_json::Value::String(s.to_ascii_lowercase()))
            .ok()
            .filter(|st| *st != OrderStatus::Unknown)
            .ok_or_else(|| crate::ModelError::Validation(format!("unknown order status: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default, alias = "customer")]
    pub customer_name: Option<String>,
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "name", default)]
    pub item_name: String,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(deserialize_with = "number_or_string", default)]
    pub price: f64,
}

fn one() -> u32 { 1 }

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate<S> {
    pub status: S,
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![self.id.to_string(), self.status.as_str().to_string()];
        v.extend(self.order_number.clone());
        v.extend(self.customer_name.clone());
        v
    }
}
