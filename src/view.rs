//! The derived view of the expenses: filter, search, sort, total and category aggregate.
//!
//! Every function here is pure. A `View` is computed from the full list of expenses and a
//! `ViewState` and borrows the expenses it shows.

use crate::model::Expense;
use crate::store::{Direction, SortConfig, SortKey, ViewState};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A snapshot of what the expense list shows: the visible expenses in display order, their
/// total, and the totals per category across all expenses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View<'a> {
    records: Vec<&'a Expense>,
    total: Decimal,
    categories: CategoryTotals,
}

impl<'a> View<'a> {
    pub fn compute(expenses: &'a [Expense], state: &ViewState) -> Self {
        let mut records = filter(expenses, state);
        sort(&mut records, state.sort);
        let total = total(&records);
        let categories = CategoryTotals::from_expenses(expenses);
        Self {
            records,
            total,
            categories,
        }
    }

    /// The filtered expenses in sort order.
    pub fn records(&self) -> &[&'a Expense] {
        &self.records
    }

    /// The sum of the visible expenses. Filters and search change this.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Totals per category over every expense. Filters and search do not change this.
    pub fn categories(&self) -> &CategoryTotals {
        &self.categories
    }
}

/// Keeps the expenses that pass the filters and the search, in their original order.
pub fn filter<'a>(expenses: &'a [Expense], state: &ViewState) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| state.filters.matches(e) && state.matches_search(e))
        .collect()
}

/// Stable sort, so expenses that compare equal keep their relative order.
pub fn sort(records: &mut [&Expense], sort: SortConfig) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, sort.key);
        match sort.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
}

/// Compares two expenses by `key` using the field's own ordering: numbers for amounts, calendar
/// order for dates and text for everything else.
pub fn compare(a: &Expense, b: &Expense, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date().cmp_chrono(b.date()),
        SortKey::Description => a.description().cmp(b.description()),
        SortKey::Amount => a.amount().cmp_value(b.amount()),
        SortKey::Category => a.category().cmp(b.category()),
        SortKey::PaymentMethod => a
            .payment_method()
            .to_string()
            .cmp(&b.payment_method().to_string()),
    }
}

/// Sums the amounts of `records`. Amounts that are not numbers add nothing.
pub fn total(records: &[&Expense]) -> Decimal {
    sum(records.iter().map(|e| e.amount().value()))
}

/// Adds up `values`, saturating at `Decimal::MAX` or `Decimal::MIN` instead of overflowing.
fn sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// The total of one category.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Totals per category, in the order each category first appears among the expenses.
///
/// Serializes as a JSON object mapping category to total.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct CategoryTotals(Vec<CategoryTotal>);

impl CategoryTotals {
    pub fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for expense in expenses {
            let value = expense.amount().value();
            match index.get(expense.category()) {
                Some(&ix) => {
                    let total = &mut totals[ix].total;
                    *total = total.saturating_add(value);
                }
                None => {
                    index.insert(expense.category(), totals.len());
                    totals.push(CategoryTotal {
                        category: expense.category().to_string(),
                        total: value,
                    });
                }
            }
        }
        Self(totals)
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.0
            .iter()
            .find(|t| t.category == category)
            .map(|t| t.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sum over all categories, which is the total of every expense.
    pub fn grand_total(&self) -> Decimal {
        sum(self.0.iter().map(|t| t.total))
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for t in &self.0 {
            map.serialize_entry(&t.category, &t.total)?;
        }
        map.end()
    }
}
