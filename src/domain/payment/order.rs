//! Host-side order snapshot used to create invoices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An order ready for checkout.
///
/// Monetary values are major units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutOrder {
    pub id: String,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Shipping>,
}

/// One purchased line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
}

impl OrderItem {
    /// Unit price after discount.
    pub fn net_price(&self) -> Decimal {
        self.price - self.discount
    }
}

/// Delivery charge, sent as the first cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipping {
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Decimal>,
}

impl Shipping {
    /// Shipping is only billed when it costs something.
    pub fn is_billable(&self) -> bool {
        self.price > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_price_subtracts_discount() {
        let item = OrderItem {
            name: "Tea".to_string(),
            quantity: 2,
            price: Decimal::new(1050, 2),
            discount: Decimal::new(50, 2),
            tax_rate: None,
        };

        assert_eq!(item.net_price(), Decimal::new(1000, 2));
    }

    #[test]
    fn free_shipping_is_not_billable() {
        let shipping = Shipping {
            name: "Courier".to_string(),
            price: Decimal::ZERO,
            tax_rate: None,
        };

        assert!(!shipping.is_billable());
    }

    #[test]
    fn deserializes_with_defaults() {
        let order: CheckoutOrder = serde_json::from_str(
            r#"{"id":"42","amount":"10.00","currency":"RUB","items":[{"name":"Tea","quantity":1,"price":"10.00"}]}"#,
        )
        .unwrap();

        assert_eq!(order.description, "");
        assert_eq!(order.items[0].discount, Decimal::ZERO);
        assert!(order.shipping.is_none());
    }
}
