//! The fixed set of transaction categories and the income/expense kind
//! derived from them.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Whether a transaction brings money in or takes money out.
///
/// The kind is always derived from the transaction's [Category], never set
/// directly, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. wages or interest.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// The kind as the lowercase string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The category of a transaction.
///
/// The set is closed: transactions are always created with one of these
/// categories, and each category has a fixed income/expense kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries and eating out.
    Food,
    /// Public transport, fuel, parking.
    Transport,
    /// Movies, games, concerts.
    Entertainment,
    /// Power, water, internet.
    Utilities,
    /// Rent payments.
    Rent,
    /// Clothing and other retail purchases.
    Shopping,
    /// Doctor visits, medication, insurance.
    Health,
    /// Courses, books, tuition.
    Education,
    /// Wages from employment.
    Salary,
    /// Income from contract work.
    Freelance,
    /// Dividends, interest, capital gains.
    Investments,
    /// Income that fits no other category.
    #[serde(rename = "Other Income")]
    OtherIncome,
    /// Expenses that fit no other category.
    #[serde(rename = "Other Expense")]
    OtherExpense,
}

/// All categories in the order they appear in the category dropdown.
pub const ALL_CATEGORIES: [Category; 13] = [
    Category::Food,
    Category::Transport,
    Category::Entertainment,
    Category::Utilities,
    Category::Rent,
    Category::Shopping,
    Category::Health,
    Category::Education,
    Category::Salary,
    Category::Freelance,
    Category::Investments,
    Category::OtherIncome,
    Category::OtherExpense,
];

impl Category {
    /// The category's display name, which is also how it is stored in the
    /// database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Rent => "Rent",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investments => "Investments",
            Category::OtherIncome => "Other Income",
            Category::OtherExpense => "Other Expense",
        }
    }

    /// The income/expense kind for this category.
    ///
    /// Salary, Freelance, Investments and Other Income are income, every
    /// other category is an expense.
    pub fn kind(&self) -> TransactionKind {
        match self {
            Category::Salary
            | Category::Freelance
            | Category::Investments
            | Category::OtherIncome => TransactionKind::Income,
            _ => TransactionKind::Expense,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error returned when a string does not name a known category.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{0} is not a valid category name")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
