//! Types that represent the core data model, such as `Expense` and `Draft`.
mod amount;
mod date;
mod expense;

pub use amount::{format_money, Amount};
pub use date::ExpenseDate;
pub(crate) use date::parse_date;
pub use expense::{Draft, Expense, ExpenseId, PaymentMethod};
