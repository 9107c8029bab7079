//! The expense store: the append-only record set and the view parameters applied to it.
//!
//! All mutations go through `Store`. Reading goes through `Store::view`, which recomputes the
//! filtered, sorted and aggregated view from scratch every time it is called.

use crate::model::{parse_date, Draft, Expense, ExpenseDate, ExpenseId};
use crate::view::View;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// The fields that can carry an exact-match filter.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Category,
    #[serde(alias = "payment_method")]
    PaymentMethod,
}

serde_plain::derive_display_from_serialize!(FilterField);
serde_plain::derive_fromstr_from_deserialize!(FilterField);

/// The columns an expense list can be sorted by.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Date,
    Description,
    Amount,
    Category,
    #[serde(alias = "payment_method")]
    PaymentMethod,
}

serde_plain::derive_display_from_serialize!(SortKey);
serde_plain::derive_fromstr_from_deserialize!(SortKey);

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

serde_plain::derive_display_from_serialize!(Direction);
serde_plain::derive_fromstr_from_deserialize!(Direction);

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: Direction,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: Direction) -> Self {
        Self { key, direction }
    }
}

/// Controls what happens to the sort direction when a different column is selected.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortToggle {
    /// Selecting a different column sorts it ascending.
    #[default]
    Reset,
    /// Every selection flips the one shared direction, whichever column it is for.
    Inherit,
}

serde_plain::derive_display_from_serialize!(SortToggle);
serde_plain::derive_fromstr_from_deserialize!(SortToggle);

/// An inclusive range of calendar dates. A missing bound is open.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// True when `date` is a real date within the range. Dates that could not be parsed are
    /// never within a range.
    pub fn contains(&self, date: &ExpenseDate) -> bool {
        let Some(date) = date.date() else {
            return false;
        };
        self.from.map_or(true, |from| from <= date) && self.to.map_or(true, |to| date <= to)
    }
}

/// The filter predicates. `None` means the predicate is not active.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub date_range: Option<DateRange>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.payment_method.is_none() && self.date_range.is_none()
    }

    /// True when `expense` passes every active filter.
    pub fn matches(&self, expense: &Expense) -> bool {
        let category = self
            .category
            .as_deref()
            .map_or(true, |c| c == expense.category());
        let payment_method = self
            .payment_method
            .as_deref()
            .map_or(true, |p| p == expense.payment_method().to_string());
        let date_range = self
            .date_range
            .as_ref()
            .map_or(true, |range| range.contains(expense.date()));
        category && payment_method && date_range
    }
}

/// The filter, search and sort parameters currently applied to the expense list.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub filters: Filters,
    pub search_term: String,
    pub sort: SortConfig,
}

impl ViewState {
    /// True when the search term appears in the expense's description, ignoring case.
    pub fn matches_search(&self, expense: &Expense) -> bool {
        self.search_term.is_empty()
            || expense
                .description()
                .to_lowercase()
                .contains(&self.search_term.to_lowercase())
    }

    /// True when no filter or search narrows the list.
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty() && self.search_term.is_empty()
    }
}

/// Holds the expenses and the current view parameters.
///
/// Expenses can only be added; there is no edit or delete. The order of insertion is kept and
/// is the order of expenses that tie under the active sort.
#[derive(Debug, Default, Clone)]
pub struct Store {
    expenses: Vec<Expense>,
    state: ViewState,
    toggle: SortToggle,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given sort policy and initial sort.
    pub fn with_options(toggle: SortToggle, sort: SortConfig) -> Self {
        Self {
            expenses: Vec::new(),
            state: ViewState {
                sort,
                ..ViewState::default()
            },
            toggle,
        }
    }

    /// Records the expense in `draft` and resets `draft` to an empty form. Returns the id of the
    /// new expense.
    ///
    /// Nothing is validated here: an amount that is not a number is stored as entered and counts
    /// as zero in totals.
    pub fn add(&mut self, draft: &mut Draft) -> ExpenseId {
        let expense = Expense::from_draft(std::mem::take(draft));
        if !expense.amount().is_number() {
            debug!(
                "Amount '{}' of expense {} is not a number and will count as zero",
                expense.amount(),
                expense.id()
            );
        }
        let id = expense.id().clone();
        trace!("Adding expense {expense:?}");
        self.expenses.push(expense);
        id
    }

    /// Finds an expense by id.
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    /// All expenses in the order they were added.
    pub fn records(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn sort_toggle(&self) -> SortToggle {
        self.toggle
    }

    /// Sets the exact-match filter for `field`. An empty value clears it.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        let value = if value.is_empty() { None } else { Some(value) };
        debug!("Setting {field} filter to {value:?}");
        match field {
            FilterField::Category => self.state.filters.category = value,
            FilterField::PaymentMethod => self.state.filters.payment_method = value,
        }
    }

    /// Restricts the list to expenses dated within `from` and `to`, inclusive. A bound that is
    /// missing, empty or not a date is open; with both bounds open the date filter is cleared.
    pub fn set_date_range(&mut self, from: Option<&str>, to: Option<&str>) {
        let from = bound(from);
        let to = bound(to);
        self.state.filters.date_range = if from.is_none() && to.is_none() {
            None
        } else {
            Some(DateRange { from, to })
        };
        debug!("Setting date range to {:?}", self.state.filters.date_range);
    }

    /// Clears every filter. The search term and sort are left alone.
    pub fn clear_filters(&mut self) {
        debug!("Clearing filters");
        self.state.filters = Filters::default();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        debug!("Setting search term to '{}'", self.state.search_term);
    }

    /// Sorts by `key`. Selecting the active column again flips the direction. Selecting another
    /// column sorts it ascending, or flips the direction under `SortToggle::Inherit`.
    pub fn set_sort(&mut self, key: SortKey) {
        let current = self.state.sort;
        let direction = if key == current.key || self.toggle == SortToggle::Inherit {
            current.direction.flip()
        } else {
            Direction::Ascending
        };
        self.state.sort = SortConfig::new(key, direction);
        debug!("Sorting by {key} {direction}");
    }

    /// Computes the current view of the expenses.
    pub fn view(&self) -> View<'_> {
        View::compute(&self.expenses, &self.state)
    }
}

fn bound(text: Option<&str>) -> Option<NaiveDate> {
    let text = text.map(str::trim).filter(|s| !s.is_empty())?;
    let date = parse_date(text);
    if date.is_none() {
        warn!("Ignoring date range bound '{text}' because it is not a date");
    }
    date
}
