//! Session events: the user actions that drive a store, one JSON object per line.
//!
//! ```text
//! {"op": "add", "amount": "10", "description": "lunch", "date": "2024-01-01", "category": "food"}
//! {"op": "filter", "field": "category", "value": "food"}
//! {"op": "date_range", "from": "2024-01-01", "to": "2024-01-31"}
//! {"op": "clear_filters"}
//! {"op": "search", "term": "bus"}
//! {"op": "sort", "key": "amount"}
//! {"op": "view"}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::model::{Draft, ExpenseId};
use crate::store::{FilterField, SortKey, Store};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A single user action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Event {
    /// Submit the expense form.
    Add(Draft),
    /// Set or clear (with an empty value) an exact-match filter.
    Filter {
        field: FilterField,
        #[serde(default)]
        value: String,
    },
    /// Restrict expenses to a date range. Omit both bounds to clear it.
    DateRange {
        #[serde(default)]
        from: Option<String>,
        #[serde(default)]
        to: Option<String>,
    },
    /// Clear every filter.
    ClearFilters,
    /// Replace the search term.
    Search {
        #[serde(default)]
        term: String,
    },
    /// Click a column header.
    Sort { key: SortKey },
    /// Ask for a snapshot of the view. Changes nothing.
    View,
}

/// What applying an event did to the store.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Applied {
    /// An expense was added under this id.
    Added(ExpenseId),
    /// The view parameters changed.
    Changed,
    /// Nothing changed, a snapshot was requested.
    Snapshot,
}

impl Event {
    /// Applies the event to `store`.
    pub fn apply(self, store: &mut Store) -> Applied {
        trace!("Applying {self:?}");
        match self {
            Event::Add(mut draft) => Applied::Added(store.add(&mut draft)),
            Event::Filter { field, value } => {
                store.set_filter(field, value);
                Applied::Changed
            }
            Event::DateRange { from, to } => {
                store.set_date_range(from.as_deref(), to.as_deref());
                Applied::Changed
            }
            Event::ClearFilters => {
                store.clear_filters();
                Applied::Changed
            }
            Event::Search { term } => {
                store.set_search_term(term);
                Applied::Changed
            }
            Event::Sort { key } => {
                store.set_sort(key);
                Applied::Changed
            }
            Event::View => Applied::Snapshot,
        }
    }
}

/// Parses a session, one event per line.
///
/// # Errors
/// - Returns an error naming the line number of the first line that is not a valid event.
pub fn parse_session(text: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (ix, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: Event = serde_json::from_str(line)
            .with_context(|| format!("Invalid event on line {}: {line}", ix + 1))?;
        events.push(event);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaymentMethod;
    use crate::store::{Direction, SortConfig};
    use crate::test::{dec, SAMPLE_SESSION};

    #[test]
    fn test_parse_sample_session() {
        let events = parse_session(SAMPLE_SESSION).unwrap();
        assert_eq!(events.len(), 2);
        match &events[1] {
            Event::Add(draft) => {
                assert_eq!(draft.amount.value(), dec("20"));
                assert_eq!(draft.payment_method, PaymentMethod::Credit);
            }
            other => panic!("expected an add event, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_every_op() {
        let text = r#"
            {"op": "filter", "field": "paymentMethod", "value": "cash"}
            {"op": "filter", "field": "category"}
            {"op": "date_range", "from": "2024-01-01"}
            {"op": "clear_filters"}
            {"op": "search", "term": "Bus"}
            {"op": "sort", "key": "amount"}
            {"op": "view"}
        "#;
        let events = parse_session(text).unwrap();
        assert_eq!(
            events,
            vec![
                Event::Filter {
                    field: FilterField::PaymentMethod,
                    value: "cash".to_string()
                },
                Event::Filter {
                    field: FilterField::Category,
                    value: String::new()
                },
                Event::DateRange {
                    from: Some("2024-01-01".to_string()),
                    to: None
                },
                Event::ClearFilters,
                Event::Search {
                    term: "Bus".to_string()
                },
                Event::Sort {
                    key: SortKey::Amount
                },
                Event::View,
            ]
        );
    }

    #[test]
    fn test_bad_line_is_reported() {
        let text = "{\"op\": \"view\"}\n\n{\"op\": \"explode\"}\n";
        let err = parse_session(text).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn test_apply() {
        let mut store = Store::new();
        for event in parse_session(SAMPLE_SESSION).unwrap() {
            assert!(matches!(event.apply(&mut store), Applied::Added(_)));
        }
        assert_eq!(store.len(), 2);

        let applied = Event::Sort {
            key: SortKey::Date,
        }
        .apply(&mut store);
        assert_eq!(applied, Applied::Changed);
        assert_eq!(
            store.state().sort,
            SortConfig::new(SortKey::Date, Direction::Descending)
        );
        assert_eq!(Event::View.apply(&mut store), Applied::Snapshot);
        assert_eq!(store.view().total(), dec("30"));
    }
}
