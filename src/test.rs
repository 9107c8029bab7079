//! Shared test utilities for building stores and drafts.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Draft, ExpenseId, PaymentMethod};
use crate::store::Store;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a `Decimal`, panicking on bad input.
pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Builds a filled-in draft.
pub(crate) fn draft(
    amount: &str,
    description: &str,
    date: &str,
    category: &str,
    payment_method: PaymentMethod,
) -> Draft {
    Draft::new(amount, description, date, category, payment_method)
}

/// Adds an expense to `store` through a draft, as the form would.
pub(crate) fn add(
    store: &mut Store,
    amount: &str,
    description: &str,
    date: &str,
    category: &str,
    payment_method: PaymentMethod,
) -> ExpenseId {
    let mut form = draft(amount, description, date, category, payment_method);
    store.add(&mut form)
}

/// A store holding a cash lunch of 10 (food) and a credit bus ride of 20 (transport).
pub(crate) fn sample_store() -> Store {
    let mut store = Store::new();
    add(&mut store, "10", "lunch", "2024-01-01", "food", PaymentMethod::Cash);
    add(&mut store, "20", "bus", "2024-01-02", "transport", PaymentMethod::Credit);
    store
}

/// The same two expenses as `sample_store`, as session lines.
pub(crate) const SAMPLE_SESSION: &str = r#"
# two expenses
{"op": "add", "amount": "10", "description": "lunch", "date": "2024-01-01", "category": "food"}
{"op": "add", "amount": 20, "description": "bus", "date": "2024-01-02", "category": "transport", "paymentMethod": "credit"}
"#;
