//! Booking invoice arithmetic.
//!
//! Amounts use [`Decimal`] and are rounded half away from zero to two places
//! at every total, the way printed invoices are reconciled.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::json::parse_json_or;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoiceError {
    #[error("Line '{0}' has a negative quantity or unit price")]
    NegativeLine(String),

    #[error("Discount must not be negative")]
    NegativeDiscount,

    #[error("Tax rate must not be negative")]
    NegativeTaxRate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl Invoice {
    /// Discount is clamped to the subtotal; tax applies after discount.
    pub fn compute(items: &[LineItem], discount: Decimal, tax_rate: Decimal) -> Result<Self, InvoiceError> {
        if discount < Decimal::ZERO {
            return Err(InvoiceError::NegativeDiscount);
        }
        if tax_rate < Decimal::ZERO {
            return Err(InvoiceError::NegativeTaxRate);
        }

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            if item.quantity < Decimal::ZERO || item.unit_price < Decimal::ZERO {
                return Err(InvoiceError::NegativeLine(item.description.clone()));
            }
            lines.push(InvoiceLine {
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total: money(item.quantity * item.unit_price),
            });
        }

        let subtotal = money(lines.iter().map(|l| l.total).sum());
        let discount = money(discount.min(subtotal));
        let tax = money((subtotal - discount) * tax_rate);
        let total = money(subtotal - discount + tax);

        Ok(Self { lines, subtotal, discount, tax, total })
    }

    /// Invoice for a booking row: `line_items` (array or JSON text),
    /// `discount` and `tax_rate`, each defaulting when absent.
    pub fn from_booking(booking: &serde_json::Value) -> Result<Self, InvoiceError> {
        let items: Vec<LineItem> = parse_json_or(booking.get("line_items"), vec![]);
        let discount = parse_json_or(booking.get("discount"), Decimal::ZERO);
        let tax_rate = parse_json_or(booking.get("tax_rate"), Decimal::ZERO);
        Self::compute(&items, discount, tax_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(description: &str, quantity: &str, unit_price: &str) -> LineItem {
        LineItem { description: description.into(), quantity: d(quantity), unit_price: d(unit_price) }
    }

    #[test]
    fn computes_totals_with_discount_and_tax() {
        let items = vec![item("Umrah package", "2", "1250.00"), item("Visa fee", "2", "37.505")];
        let invoice = Invoice::compute(&items, d("100"), d("0.15")).unwrap();
        assert_eq!(invoice.lines[1].total, d("75.01"));
        assert_eq!(invoice.subtotal, d("2575.01"));
        assert_eq!(invoice.tax, d("371.25"));
        assert_eq!(invoice.total, d("2846.26"));
    }

    #[test]
    fn discount_is_clamped_to_subtotal() {
        let invoice = Invoice::compute(&[item("Ziyarah tour", "1", "80")], d("500"), d("0.1")).unwrap();
        assert_eq!(invoice.discount, d("80"));
        assert_eq!(invoice.total, Decimal::ZERO);
    }

    #[test]
    fn negatives_are_rejected() {
        assert_eq!(
            Invoice::compute(&[item("Refund", "1", "-5")], Decimal::ZERO, Decimal::ZERO),
            Err(InvoiceError::NegativeLine("Refund".into()))
        );
        assert_eq!(Invoice::compute(&[], d("-1"), Decimal::ZERO), Err(InvoiceError::NegativeDiscount));
        assert_eq!(Invoice::compute(&[], Decimal::ZERO, d("-0.1")), Err(InvoiceError::NegativeTaxRate));
    }

    #[test]
    fn reads_booking_rows_with_text_columns() {
        let booking = json!({
            "line_items": "[{\"description\":\"Hotel\",\"quantity\":\"3\",\"unit_price\":\"200\"}]",
            "tax_rate": "0.05"
        });
        let invoice = Invoice::from_booking(&booking).unwrap();
        assert_eq!(invoice.subtotal, d("600"));
        assert_eq!(invoice.tax, d("30"));
        assert_eq!(invoice.total, d("630"));
    }
}
