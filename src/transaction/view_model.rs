//! Assembles filtered records and summary figures into the shape the
//! dashboard renders.

use rust_decimal::Decimal;

use crate::{
    category::{Category, TransactionKind},
    transaction::{core::Transaction, summary::Summary},
};

/// One bar of the spending-by-category chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The expense category.
    pub category: Category,
    /// The summed expense amount for the category.
    pub amount: Decimal,
}

/// Everything the dashboard needs to render: the transaction list, the
/// summary figures, and the chart series.
///
/// The view model carries no state of its own; it is recomputed in full from
/// the current snapshot and filter on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViewModel {
    /// The filtered transactions, in the order they were delivered
    /// (date descending).
    pub transactions: Vec<Transaction>,
    /// The aggregate figures for the filtered transactions.
    pub summary: Summary,
    /// The spending-by-category chart series, one entry per category with at
    /// least one expense, in the order categories first appear in
    /// `transactions`.
    pub chart_series: Vec<CategoryTotal>,
}

impl DashboardViewModel {
    /// Combine filtered `transactions` and their `summary` into a
    /// display-ready structure.
    pub fn assemble(transactions: Vec<Transaction>, summary: Summary) -> Self {
        let mut chart_series: Vec<CategoryTotal> = Vec::new();

        for transaction in &transactions {
            if transaction.kind != TransactionKind::Expense {
                continue;
            }

            let already_present = chart_series
                .iter()
                .any(|entry| entry.category == transaction.category);

            if !already_present
                && let Some(&amount) = summary.spending_by_category.get(&transaction.category)
            {
                chart_series.push(CategoryTotal {
                    category: transaction.category,
                    amount,
                });
            }
        }

        Self {
            transactions,
            summary,
            chart_series,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
