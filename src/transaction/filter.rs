//! The pure filter engine applied to transaction snapshots.

use time::{Date, Month};

use crate::transaction::core::Transaction;

/// The user-chosen predicates applied to a snapshot.
///
/// All fields are optional and the two pairs combine with AND semantics:
///
/// - `month` and `year` only take effect when both are set; a record matches
///   when its date falls in exactly that month of that year. Setting only
///   one of the two has no filtering effect. This mirrors how the filter
///   dropdowns behave: an "All Months" or "All Years" selection leaves the
///   pair incomplete and the pair is ignored.
/// - `start_date` and `end_date` only take effect when both are set; a
///   record matches when `start_date <= date <= end_date` (inclusive).
///
/// The default (empty) spec matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// The calendar month to match, paired with `year`.
    pub month: Option<Month>,
    /// The calendar year to match, paired with `month`.
    pub year: Option<i32>,
    /// The first date of the range, inclusive, paired with `end_date`.
    pub start_date: Option<Date>,
    /// The last date of the range, inclusive, paired with `start_date`.
    pub end_date: Option<Date>,
}

impl FilterSpec {
    /// Whether any complete predicate pair is active.
    pub fn is_active(&self) -> bool {
        self.month_and_year().is_some() || self.date_range().is_some()
    }

    /// Whether `transaction` satisfies every active predicate.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some((month, year)) = self.month_and_year()
            && (transaction.date.month() != month || transaction.date.year() != year)
        {
            return false;
        }

        if let Some((start_date, end_date)) = self.date_range()
            && (transaction.date < start_date || transaction.date > end_date)
        {
            return false;
        }

        true
    }

    fn month_and_year(&self) -> Option<(Month, i32)> {
        self.month.zip(self.year)
    }

    fn date_range(&self) -> Option<(Date, Date)> {
        self.start_date.zip(self.end_date)
    }
}

/// Apply `spec` to `records`, keeping the relative order of the input.
///
/// This is a total function: it never fails, and with an empty spec it
/// returns the input unchanged.
pub fn filter_transactions(records: &[Transaction], spec: &FilterSpec) -> Vec<Transaction> {
    if !spec.is_active() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|transaction| spec.matches(transaction))
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod filter_tests {
    use rust_decimal::Decimal;
    use time::{Date, Month, OffsetDateTime, macros::date};

    use crate::{
        category::Category,
        transaction::{
            core::Transaction,
            filter::{FilterSpec, filter_transactions},
        },
    };

    fn create_test_transaction(id: i64, category: Category, date: Date) -> Transaction {
        Transaction {
            id,
            amount: Decimal::from(50),
            description: format!("Transaction {id}"),
            category,
            date,
            kind: category.kind(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    /// The two records from the worked example: a food expense and a salary
    /// payment, both in January 2024.
    fn january_records() -> Vec<Transaction> {
        vec![
            create_test_transaction(1, Category::Salary, date!(2024 - 01 - 15)),
            create_test_transaction(2, Category::Food, date!(2024 - 01 - 10)),
        ]
    }

    #[test]
    fn empty_spec_is_identity() {
        let records = january_records();

        let filtered = filter_transactions(&records, &FilterSpec::default());

        assert_eq!(filtered, records);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = vec![
            create_test_transaction(1, Category::Salary, date!(2024 - 01 - 15)),
            create_test_transaction(2, Category::Food, date!(2024 - 02 - 10)),
            create_test_transaction(3, Category::Rent, date!(2023 - 12 - 01)),
        ];
        let specs = [
            FilterSpec::default(),
            FilterSpec {
                month: Some(Month::January),
                year: Some(2024),
                ..Default::default()
            },
            FilterSpec {
                start_date: Some(date!(2024 - 01 - 01)),
                end_date: Some(date!(2024 - 12 - 31)),
                ..Default::default()
            },
        ];

        for spec in specs {
            let once = filter_transactions(&records, &spec);
            let twice = filter_transactions(&once, &spec);

            assert_eq!(once, twice, "filter is not idempotent for {spec:?}");
        }
    }

    #[test]
    fn month_and_year_pair_matches_whole_month() {
        let mut records = january_records();
        records.push(create_test_transaction(
            3,
            Category::Food,
            date!(2024 - 02 - 10),
        ));
        let spec = FilterSpec {
            month: Some(Month::January),
            year: Some(2024),
            ..Default::default()
        };

        let filtered = filter_transactions(&records, &spec);

        assert_eq!(filtered, january_records());
    }

    #[test]
    fn month_without_year_has_no_filtering_effect() {
        let records = vec![
            create_test_transaction(1, Category::Salary, date!(2024 - 01 - 15)),
            create_test_transaction(2, Category::Food, date!(2024 - 06 - 10)),
        ];
        let spec = FilterSpec {
            month: Some(Month::January),
            ..Default::default()
        };

        assert!(!spec.is_active());
        assert_eq!(filter_transactions(&records, &spec), records);
    }

    #[test]
    fn year_without_month_has_no_filtering_effect() {
        let records = vec![
            create_test_transaction(1, Category::Salary, date!(2024 - 01 - 15)),
            create_test_transaction(2, Category::Food, date!(2023 - 06 - 10)),
        ];
        let spec = FilterSpec {
            year: Some(2024),
            ..Default::default()
        };

        assert_eq!(filter_transactions(&records, &spec), records);
    }

    #[test]
    fn date_range_is_inclusive() {
        let records = january_records();
        let spec = FilterSpec {
            start_date: Some(date!(2024 - 01 - 12)),
            end_date: Some(date!(2024 - 01 - 20)),
            ..Default::default()
        };

        let filtered = filter_transactions(&records, &spec);

        assert_eq!(
            filtered,
            vec![create_test_transaction(
                1,
                Category::Salary,
                date!(2024 - 01 - 15)
            )],
            "only the salary transaction falls within the range"
        );

        // Records on the boundary dates are included.
        let boundary_spec = FilterSpec {
            start_date: Some(date!(2024 - 01 - 10)),
            end_date: Some(date!(2024 - 01 - 15)),
            ..Default::default()
        };
        assert_eq!(filter_transactions(&records, &boundary_spec), records);
    }

    #[test]
    fn start_date_without_end_date_has_no_filtering_effect() {
        let records = january_records();
        let spec = FilterSpec {
            start_date: Some(date!(2024 - 01 - 12)),
            ..Default::default()
        };

        assert_eq!(filter_transactions(&records, &spec), records);
    }

    #[test]
    fn both_pairs_combine_with_and_semantics() {
        let records = vec![
            // In January 2024 and in range.
            create_test_transaction(1, Category::Salary, date!(2024 - 01 - 15)),
            // In January 2024 but outside the range.
            create_test_transaction(2, Category::Food, date!(2024 - 01 - 25)),
            // In range but not in January.
            create_test_transaction(3, Category::Rent, date!(2024 - 02 - 14)),
        ];
        let spec = FilterSpec {
            month: Some(Month::January),
            year: Some(2024),
            start_date: Some(date!(2024 - 01 - 01)),
            end_date: Some(date!(2024 - 02 - 28)),
            ..Default::default()
        };

        let filtered = filter_transactions(&records, &spec);

        assert_eq!(
            filtered,
            vec![
                create_test_transaction(1, Category::Salary, date!(2024 - 01 - 15)),
                create_test_transaction(2, Category::Food, date!(2024 - 01 - 25)),
            ]
        );
    }

    #[test]
    fn output_preserves_input_order() {
        let records = vec![
            create_test_transaction(5, Category::Food, date!(2024 - 01 - 30)),
            create_test_transaction(2, Category::Rent, date!(2024 - 01 - 20)),
            create_test_transaction(9, Category::Food, date!(2024 - 01 - 10)),
        ];
        let spec = FilterSpec {
            month: Some(Month::January),
            year: Some(2024),
            ..Default::default()
        };

        let ids: Vec<_> = filter_transactions(&records, &spec)
            .into_iter()
            .map(|transaction| transaction.id)
            .collect();

        assert_eq!(ids, vec![5, 2, 9]);
    }
}
