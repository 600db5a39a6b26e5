//! The aggregator that derives summary figures from a filtered snapshot.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    category::{Category, TransactionKind},
    transaction::core::Transaction,
};

/// The aggregate figures derived from a set of transactions.
///
/// All sums use decimal arithmetic, so totals stay exact no matter how many
/// small transactions are accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// The sum of all income amounts.
    pub total_income: Decimal,
    /// The sum of all expense amounts.
    pub total_expense: Decimal,
    /// `total_income - total_expense`, exactly.
    pub net_balance: Decimal,
    /// Expense totals per category. Categories without any matching expense
    /// are absent rather than present with a zero total.
    pub spending_by_category: HashMap<Category, Decimal>,
}

/// Compute the summary figures for `records`.
///
/// This is a total function over well-formed transactions: it never fails,
/// and an empty input yields all-zero totals with an empty category map.
pub fn aggregate(records: &[Transaction]) -> Summary {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut spending_by_category = HashMap::new();

    for transaction in records {
        match transaction.kind {
            TransactionKind::Income => total_income += transaction.amount,
            TransactionKind::Expense => {
                total_expense += transaction.amount;
                *spending_by_category
                    .entry(transaction.category)
                    .or_insert(Decimal::ZERO) += transaction.amount;
            }
        }
    }

    Summary {
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
        spending_by_category,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod summary_tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;
    use time::{Date, OffsetDateTime, macros::date};

    use crate::{
        category::Category,
        transaction::{core::Transaction, summary::aggregate},
    };

    fn create_test_transaction(id: i64, amount: i64, category: Category, date: Date) -> Transaction {
        Transaction {
            id,
            amount: Decimal::from(amount),
            description: format!("Transaction {id}"),
            category,
            date,
            kind: category.kind(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn aggregates_income_expense_and_category_breakdown() {
        // A $50 food expense and a $2000 salary payment.
        let records = vec![
            create_test_transaction(1, 50, Category::Food, date!(2024 - 01 - 10)),
            create_test_transaction(2, 2000, Category::Salary, date!(2024 - 01 - 15)),
        ];

        let summary = aggregate(&records);

        assert_eq!(summary.total_income, Decimal::from(2000));
        assert_eq!(summary.total_expense, Decimal::from(50));
        assert_eq!(summary.net_balance, Decimal::from(1950));
        assert_eq!(
            summary.spending_by_category,
            HashMap::from([(Category::Food, Decimal::from(50))])
        );
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        let summary = aggregate(&[]);

        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.net_balance, Decimal::ZERO);
        assert_eq!(summary.spending_by_category, HashMap::new());
    }

    #[test]
    fn deleting_the_only_expense_empties_the_breakdown() {
        let records = vec![
            create_test_transaction(1, 50, Category::Food, date!(2024 - 01 - 10)),
            create_test_transaction(2, 2000, Category::Salary, date!(2024 - 01 - 15)),
        ];
        // Delete the food expense, i.e. aggregate the remaining records.
        let remaining: Vec<_> = records.into_iter().filter(|t| t.id != 1).collect();

        let summary = aggregate(&remaining);

        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.spending_by_category, HashMap::new());
        assert_eq!(summary.net_balance, Decimal::from(2000));
    }

    #[test]
    fn net_balance_equals_income_minus_expense() {
        let records = vec![
            create_test_transaction(1, 1750, Category::Salary, date!(2024 - 01 - 01)),
            create_test_transaction(2, 320, Category::Freelance, date!(2024 - 01 - 08)),
            create_test_transaction(3, 1200, Category::Rent, date!(2024 - 01 - 03)),
            create_test_transaction(4, 85, Category::Food, date!(2024 - 01 - 12)),
            create_test_transaction(5, 40, Category::Transport, date!(2024 - 01 - 19)),
        ];

        let summary = aggregate(&records);

        assert_eq!(
            summary.net_balance,
            summary.total_income - summary.total_expense
        );
        assert_eq!(summary.net_balance, Decimal::from(745));
    }

    #[test]
    fn category_totals_sum_to_total_expense() {
        let records = vec![
            create_test_transaction(1, 85, Category::Food, date!(2024 - 01 - 12)),
            create_test_transaction(2, 42, Category::Food, date!(2024 - 01 - 14)),
            create_test_transaction(3, 1200, Category::Rent, date!(2024 - 01 - 03)),
            create_test_transaction(4, 40, Category::Transport, date!(2024 - 01 - 19)),
            create_test_transaction(5, 2000, Category::Salary, date!(2024 - 01 - 15)),
        ];

        let summary = aggregate(&records);

        let category_sum: Decimal = summary.spending_by_category.values().copied().sum();
        assert_eq!(category_sum, summary.total_expense);
        assert_eq!(
            summary.spending_by_category.get(&Category::Food),
            Some(&Decimal::from(127))
        );
    }

    #[test]
    fn decimal_sums_do_not_drift() {
        // 0.10 added a thousand times is exactly 100, which would not hold
        // with binary floating point.
        let records: Vec<_> = (0..1000)
            .map(|i| Transaction {
                amount: Decimal::new(10, 2),
                ..create_test_transaction(i, 0, Category::Food, date!(2024 - 01 - 10))
            })
            .collect();

        let summary = aggregate(&records);

        assert_eq!(summary.total_expense, Decimal::from(100));
    }
}
