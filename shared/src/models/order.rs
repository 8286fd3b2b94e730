//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::util::{lenient_f64, lenient_i64, lenient_id, lenient_string, lenient_vec};

/// Order status
///
/// Serialized in the backend's lower-case spelling; displayed upper-case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Ordered,
    Preparing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Ordered,
        OrderStatus::Preparing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Parse any spelling; unknown values fall back to `Ordered`
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "preparing" => Self::Preparing,
            "completed" => Self::Completed,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Ordered,
        }
    }

    /// Backend spelling
    pub fn as_backend(&self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Preparing => "preparing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Display spelling
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ordered => "ORDERED",
            Self::Preparing => "PREPARING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Order line (references a subcategory)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default, deserialize_with = "lenient_id")]
    pub subcategory_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
}

/// Customer embedded in an order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCustomer {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub order_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "createddate", default, deserialize_with = "lenient_string")]
    pub createddate: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub items: Vec<OrderLine>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_method: Option<String>,
    #[serde(rename = "User", default)]
    pub customer: Option<OrderCustomer>,
}

/// Status update payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trip_spellings() {
        assert_eq!(OrderStatus::parse_lenient("PREPARING"), OrderStatus::Preparing);
        assert_eq!(OrderStatus::parse_lenient("completed"), OrderStatus::Completed);
        assert_eq!(OrderStatus::parse_lenient("refunded"), OrderStatus::Ordered);
        assert_eq!(OrderStatus::Cancelled.as_backend(), "cancelled");
        assert_eq!(
            serde_json::to_value(OrderStatusUpdate { status: OrderStatus::Preparing }).unwrap(),
            json!({"status": "preparing"})
        );
    }

    #[test]
    fn test_order_decodes_string_amounts() {
        let order: Order = serde_json::from_value(json!({
            "id": 7,
            "orderNumber": "ORD-7",
            "totalAmount": "120.50",
            "status": "ordered",
            "items": [{"subcategoryId": 3, "quantity": "2", "price": 60.25}],
            "User": {"name": "Asha"}
        }))
        .unwrap();
        assert_eq!(order.id.as_deref(), Some("7"));
        assert_eq!(order.total_amount, Some(120.5));
        assert_eq!(order.items[0].quantity, Some(2));
        assert_eq!(order.customer.unwrap().name.as_deref(), Some("Asha"));
    }
}
