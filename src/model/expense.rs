use crate::model::{Amount, ExpenseDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for generated expense ids.
const ID_PREFIX: &str = "exp-";

/// The unique identifier of an expense, e.g. `exp-1b4e28ba2fa1491fa0d09c4a7e2b0c55`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{ID_PREFIX}{uuid}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an expense was paid.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Credit,
}

serde_plain::derive_display_from_serialize!(PaymentMethod);
serde_plain::derive_fromstr_from_deserialize!(PaymentMethod);

/// A recorded expense. Expenses are never changed once they are added.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    id: ExpenseId,
    amount: Amount,
    description: String,
    date: ExpenseDate,
    category: String,
    payment_method: PaymentMethod,
}

impl Expense {
    /// Builds an expense out of a filled-in draft, assigning it a fresh id.
    pub(crate) fn from_draft(draft: Draft) -> Self {
        Self {
            id: ExpenseId::generate(),
            amount: draft.amount,
            description: draft.description,
            date: draft.date,
            category: draft.category,
            payment_method: draft.payment_method,
        }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> &ExpenseDate {
        &self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }
}

/// The contents of the expense form before it is submitted.
///
/// A default draft is empty, with the payment method set to cash.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    pub amount: Amount,
    pub description: String,
    pub date: ExpenseDate,
    pub category: String,
    pub payment_method: PaymentMethod,
}

impl Draft {
    pub fn new(
        amount: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        category: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            amount: Amount::new(amount),
            description: description.into(),
            date: ExpenseDate::new(date),
            category: category.into(),
            payment_method,
        }
    }

    /// True when nothing has been entered into the form.
    pub fn is_empty(&self) -> bool {
        *self == Draft::default()
    }
}
