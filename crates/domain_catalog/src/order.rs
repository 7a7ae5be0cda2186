//! Orders and order lines
//!
//! An [`Order`] owns its [`OrderDetail`] lines. Each line is keyed by the
//! composite `(OrderId, ProductId)` pair and records the price, quantity, and
//! discount negotiated for that order, which may differ from the product's
//! list price.

use std::cmp::Ordering;

use chrono::NaiveDate;
use core_kernel::{OrderId, ProductId};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Northwind customer code, e.g. "VINET"
    pub customer_id: String,
    pub employee_id: i32,
    pub order_date: NaiveDate,
    pub required_date: NaiveDate,
    /// `None` while the order has not shipped
    pub shipped_date: Option<NaiveDate>,
    pub freight: Decimal,
    pub ship_name: String,
    pub ship_city: String,
    /// Order lines ordered by product id
    #[serde(default)]
    pub details: Vec<OrderDetail>,
}

impl Order {
    /// Returns true once a shipped date has been recorded
    pub fn is_shipped(&self) -> bool {
        self.shipped_date.is_some()
    }

    /// Sum of all line totals, excluding freight
    pub fn total(&self) -> Decimal {
        self.details.iter().map(OrderDetail::line_total).sum()
    }

    /// Returns a copy without the detail lines
    pub fn header(&self) -> Self {
        Self {
            details: Vec::new(),
            ..self.clone()
        }
    }
}

/// A single line of an order
///
/// `product` and `order` are populated according to the read operation that
/// produced the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Negotiated unit price for this order
    pub unit_price: Decimal,
    pub quantity: i32,
    /// Fraction between 0.0 and 1.0
    pub discount: f32,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub order: Option<Box<Order>>,
}

impl OrderDetail {
    /// Composite primary key
    pub fn key(&self) -> (OrderId, ProductId) {
        (self.order_id, self.product_id)
    }

    /// `unit_price * quantity * (1 - discount)`, rounded to cents
    pub fn line_total(&self) -> Decimal {
        let discount = Decimal::from_f32(self.discount).unwrap_or(Decimal::ZERO);
        (self.unit_price * Decimal::from(self.quantity) * (Decimal::ONE - discount)).round_dp(2)
    }

    /// Date of the owning order, when the order is loaded
    pub fn order_date(&self) -> Option<NaiveDate> {
        self.order.as_ref().map(|o| o.order_date)
    }

    /// Returns a copy without the product or order relations
    pub fn detached(&self) -> Self {
        Self {
            product: None,
            order: None,
            ..self.clone()
        }
    }
}

/// Ordering used for the order history of a single product
///
/// Highest unit price first, then earliest order date, then lowest order id.
/// Lines whose order is not loaded sort after those with a known date.
pub fn product_history_ordering(a: &OrderDetail, b: &OrderDetail) -> Ordering {
    b.unit_price
        .cmp(&a.unit_price)
        .then_with(|| match (a.order_date(), b.order_date()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.order_id.cmp(&b.order_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: i32, order_date: NaiveDate) -> Order {
        Order {
            id: OrderId::new(id),
            customer_id: "VINET".to_string(),
            employee_id: 5,
            order_date,
            required_date: order_date,
            shipped_date: None,
            freight: dec!(32.38),
            ship_name: "Vins et alcools Chevalier".to_string(),
            ship_city: "Reims".to_string(),
            details: Vec::new(),
        }
    }

    fn line(order_id: i32, price: Decimal, quantity: i32, discount: f32) -> OrderDetail {
        OrderDetail {
            order_id: OrderId::new(order_id),
            product_id: ProductId::new(11),
            unit_price: price,
            quantity,
            discount,
            product: None,
            order: None,
        }
    }

    #[test]
    fn test_line_total_applies_discount() {
        assert_eq!(line(1, dec!(20.00), 10, 0.25).line_total(), dec!(150.00));
        assert_eq!(line(1, dec!(14.00), 12, 0.0).line_total(), dec!(168.00));
    }

    #[test]
    fn test_order_total_sums_lines() {
        let mut o = order(10248, date(1996, 7, 4));
        o.details = vec![line(10248, dec!(14.00), 12, 0.0), line(10248, dec!(10.00), 10, 0.5)];
        assert_eq!(o.total(), dec!(218.00));
        assert!(!o.is_shipped());
        assert!(o.header().details.is_empty());
    }

    #[test]
    fn test_product_history_ordering() {
        let mut early_cheap = line(10300, dec!(10.00), 1, 0.0);
        early_cheap.order = Some(Box::new(order(10300, date(1996, 9, 1))));
        let mut late_dear = line(10250, dec!(16.80), 1, 0.0);
        late_dear.order = Some(Box::new(order(10250, date(1997, 1, 1))));
        let mut early_dear = line(10260, dec!(16.80), 1, 0.0);
        early_dear.order = Some(Box::new(order(10260, date(1996, 7, 19))));

        let mut lines = vec![early_cheap, late_dear, early_dear];
        lines.sort_by(product_history_ordering);

        let ids: Vec<i32> = lines.iter().map(|l| l.order_id.value()).collect();
        assert_eq!(ids, vec![10260, 10250, 10300]);
    }
}
