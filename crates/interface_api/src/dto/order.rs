//! Order DTOs

use chrono::NaiveDate;
use domain_catalog::{Order, OrderDetail};
use rust_decimal::Decimal;
use serde::Serialize;

/// An order with its lines
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: String,
    pub employee_id: i32,
    pub order_date: NaiveDate,
    pub required_date: NaiveDate,
    pub shipped_date: Option<NaiveDate>,
    pub freight: Decimal,
    pub ship_name: String,
    pub ship_city: String,
    pub total: Decimal,
    pub details: Vec<OrderLineResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total = order.total();
        Self {
            id: order.id.value(),
            customer_id: order.customer_id,
            employee_id: order.employee_id,
            order_date: order.order_date,
            required_date: order.required_date,
            shipped_date: order.shipped_date,
            freight: order.freight,
            ship_name: order.ship_name,
            ship_city: order.ship_city,
            total,
            details: order.details.into_iter().map(OrderLineResponse::from).collect(),
        }
    }
}

/// One order line with its product and category names
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub product_id: i32,
    pub product_name: Option<String>,
    pub category_name: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub discount: f32,
    pub line_total: Decimal,
}

impl From<OrderDetail> for OrderLineResponse {
    fn from(detail: OrderDetail) -> Self {
        let line_total = detail.line_total();
        let (product_name, category_name) = match detail.product {
            Some(product) => (Some(product.name), product.category.map(|c| c.name)),
            None => (None, None),
        };
        Self {
            product_id: detail.product_id.value(),
            product_name,
            category_name,
            unit_price: detail.unit_price,
            quantity: detail.quantity,
            discount: detail.discount,
            line_total,
        }
    }
}

/// One line of a product's order history
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrderResponse {
    pub order_id: i32,
    pub order_date: Option<NaiveDate>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub discount: f32,
}

impl From<OrderDetail> for ProductOrderResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            order_id: detail.order_id.value(),
            order_date: detail.order_date(),
            unit_price: detail.unit_price,
            quantity: detail.quantity,
            discount: detail.discount,
        }
    }
}
