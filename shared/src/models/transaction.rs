//! Transaction report model
//!
//! The payments report arrives as a nested tree (cashier session →
//! payments → order items) and is flattened into one record per
//! (session, payment) pair. Session context is preserved on every record
//! and a payment with zero order items is still emitted.

use crate::serde_helpers::{
    flexible_decimal, flexible_i64, opt_flexible_i64, value_to_string,
};
use crate::util::parse_timestamp;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payment mode code plus its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMode {
    pub code: String,
    pub label: String,
}

impl PaymentMode {
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_lowercase();
        let label = match code.as_str() {
            "cash" => "Cash",
            "qris" => "QRIS",
            "card" | "credit_card" => "Card",
            "debit" | "debit_card" => "Debit Card",
            "transfer" | "bank_transfer" => "Bank Transfer",
            "ewallet" | "e-wallet" => "E-Wallet",
            "" => "Unknown",
            other => return Self { code: other.to_string(), label: other.to_string() },
        };
        Self {
            code,
            label: label.to_string(),
        }
    }
}

/// One line item inside a payment's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub menu_item_id: Option<i64>,
    pub menu_item_name: String,
    pub variant_id: Option<i64>,
    pub variant_name: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub notes: Option<String>,
}

/// Read-only flattened view of one (cashier session, payment) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub cashier_session_id: i64,
    pub session_opened_at: Option<DateTime<Utc>>,
    pub payment_id: i64,
    pub order_id: Option<i64>,
    pub table_number: Option<String>,
    pub customer_name: Option<String>,
    pub amount: Decimal,
    pub payment_mode: PaymentMode,
    pub paid_at: Option<DateTime<Utc>>,
    pub order_items: Vec<OrderLine>,
}

// ========== Wire shapes ==========

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineWire {
    #[serde(deserialize_with = "flexible_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "opt_flexible_i64", alias = "itemId")]
    pub menu_item_id: Option<i64>,
    #[serde(default, alias = "itemName")]
    pub menu_item_name: String,
    #[serde(default, deserialize_with = "opt_flexible_i64")]
    pub variant_id: Option<i64>,
    #[serde(default)]
    pub variant_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub quantity: Decimal,
    #[serde(default, deserialize_with = "flexible_decimal", alias = "price")]
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "flexible_decimal", alias = "subtotal")]
    pub line_total: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderLineWire {
    fn into_domain(self) -> OrderLine {
        let quantity = self.quantity.to_i64().unwrap_or(0);
        let line_total = if self.line_total.is_zero() {
            self.unit_price * Decimal::from(quantity)
        } else {
            self.line_total
        };
        OrderLine {
            id: self.id,
            menu_item_id: self.menu_item_id,
            menu_item_name: self.menu_item_name,
            variant_id: self.variant_id,
            variant_name: self.variant_name.filter(|s| !s.trim().is_empty()),
            quantity,
            unit_price: self.unit_price,
            line_total,
            notes: self.notes.filter(|s| !s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWire {
    #[serde(deserialize_with = "flexible_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "opt_flexible_i64")]
    pub order_id: Option<i64>,
    /// Table numbers arrive as strings or integers depending on endpoint
    #[serde(default)]
    pub table_number: Value,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub amount: Decimal,
    #[serde(default, alias = "paymentMethod")]
    pub payment_mode: String,
    #[serde(default, alias = "createdAt")]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderLineWire>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionWire {
    #[serde(deserialize_with = "flexible_i64")]
    pub id: i64,
    #[serde(default, alias = "openTime")]
    pub opened_at: Option<String>,
    #[serde(default)]
    pub payments: Vec<PaymentWire>,
}

/// Flatten the nested session report into transaction records.
pub fn flatten_sessions(sessions: Vec<SessionWire>) -> Vec<Transaction> {
    let mut transactions = Vec::new();
    for session in sessions {
        let session_opened_at = session.opened_at.as_deref().and_then(parse_timestamp);
        for payment in session.payments {
            transactions.push(Transaction {
                cashier_session_id: session.id,
                session_opened_at,
                payment_id: payment.id,
                order_id: payment.order_id,
                table_number: value_to_string(&payment.table_number),
                customer_name: payment.customer_name.filter(|s| !s.trim().is_empty()),
                amount: payment.amount,
                payment_mode: PaymentMode::from_code(&payment.payment_mode),
                paid_at: payment.paid_at.as_deref().and_then(parse_timestamp),
                order_items: payment
                    .order_items
                    .into_iter()
                    .map(OrderLineWire::into_domain)
                    .collect(),
            });
        }
    }
    transactions
}
