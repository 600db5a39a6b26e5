//! Defines the core transaction model and its database queries.

use std::str::FromStr;

use rusqlite::{Connection, Row};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::{
    Error,
    category::{Category, TransactionKind},
    database_id::TransactionId,
    session::UserId,
};

/// The format dates are stored in, e.g. "2024-01-10".
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are created via [NewTransaction] and never edited in place;
/// the only mutations the store supports are add and delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID assigned by the store when the transaction was created.
    pub id: TransactionId,
    /// The amount of money spent or earned. Always positive; whether it was
    /// spent or earned is indicated by `kind`.
    pub amount: Decimal,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction belongs to.
    pub category: Category,
    /// The calendar date when the transaction happened.
    pub date: Date,
    /// Whether the transaction is income or an expense. Always consistent
    /// with `category`, see [Category::kind].
    pub kind: TransactionKind,
    /// When the transaction record was created. Used for auditing only,
    /// never for ordering or filtering.
    pub created_at: OffsetDateTime,
}

/// The validated input for creating a transaction.
///
/// Constructing one checks the invariants that every stored transaction must
/// uphold: a positive amount and a non-empty description. The
/// income/expense kind is derived from the category here and cannot be set
/// independently.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    amount: Decimal,
    description: String,
    category: Category,
    date: Date,
}

impl NewTransaction {
    /// Validate the input for a new transaction.
    ///
    /// Leading and trailing whitespace is trimmed from `description`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if `amount` is zero or negative,
    /// - or [Error::EmptyDescription] if `description` is empty after
    ///   trimming.
    pub fn new(
        amount: Decimal,
        description: &str,
        category: Category,
        date: Date,
    ) -> Result<Self, Error> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount);
        }

        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        Ok(Self {
            amount,
            description: description.to_owned(),
            category,
            date,
        })
    }

    /// The kind derived from the category this transaction was created with.
    pub fn kind(&self) -> TransactionKind {
        self.category.kind()
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                amount TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the per-user snapshot query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Create a new transaction in the database for the user `user_id`.
///
/// The income/expense kind is computed from the category of `new_transaction`
/// and stored alongside it.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    user_id: &UserId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let kind = new_transaction.kind();
    let created_at = OffsetDateTime::now_utc()
        // Second precision is plenty for an audit stamp.
        .replace_nanosecond(0)
        .expect("zero is a valid nanosecond");

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, amount, description, category, date, kind, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, amount, description, category, date, kind, created_at",
        )?
        .query_row(
            (
                user_id.as_str(),
                new_transaction.amount.to_string(),
                new_transaction.description,
                new_transaction.category.as_str(),
                new_transaction.date,
                kind.as_str(),
                created_at
                    .format(&Rfc3339)
                    .expect("the current UTC time always formats as RFC 3339"),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all transactions for the user `user_id`.
///
/// Row order is whatever the store returns; callers that need a particular
/// order must sort the result themselves.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions(
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, description, category, date, kind, created_at
             FROM \"transaction\" WHERE user_id = :user_id",
        )?
        .query_map(&[(":user_id", user_id.as_str())], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

type RowsAffected = usize;

/// Delete the transaction `id` belonging to the user `user_id`.
///
/// Returns the number of rows deleted: zero when no such transaction exists,
/// which callers should surface as [Error::TransactionNotFound].
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    id: TransactionId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_str()),
        )
        .map_err(|error| error.into())
}

/// Map a database row to a [Transaction].
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;

    let raw_amount: String = row.get(1)?;
    let amount = Decimal::from_str(&raw_amount)
        .map_err(|error| rusqlite::Error::InvalidParameterName(error.to_string()))?;

    let description = row.get(2)?;

    let raw_category: String = row.get(3)?;
    let category = Category::from_str(&raw_category)
        .map_err(|error| rusqlite::Error::InvalidParameterName(error.to_string()))?;

    let raw_date: String = row.get(4)?;
    let date = parse_stored_date(&raw_date);

    let raw_kind: String = row.get(5)?;
    let kind = match raw_kind.as_str() {
        "income" => TransactionKind::Income,
        "expense" => TransactionKind::Expense,
        _ => {
            return Err(rusqlite::Error::InvalidParameterName(format!(
                "{raw_kind} is not a valid transaction kind"
            )));
        }
    };

    let raw_created_at: String = row.get(6)?;
    let created_at = parse_stored_timestamp(&raw_created_at);

    Ok(Transaction {
        id,
        amount,
        description,
        category,
        date,
        kind,
        created_at,
    })
}

/// Parse a stored date string, treating malformed values as a data-quality
/// concern rather than a fatal error: such records take the lowest possible
/// date so they sort and filter after everything else instead of aborting
/// the whole snapshot.
fn parse_stored_date(raw_date: &str) -> Date {
    match Date::parse(raw_date, DATE_FORMAT) {
        Ok(date) => date,
        Err(error) => {
            tracing::warn!("Could not parse stored transaction date {raw_date:?}: {error}");
            Date::MIN
        }
    }
}

/// Parse a stored creation timestamp with the same tolerance as
/// [parse_stored_date]. The timestamp is audit data, so a malformed value is
/// logged and replaced rather than failing the snapshot.
fn parse_stored_timestamp(raw_created_at: &str) -> OffsetDateTime {
    match OffsetDateTime::parse(raw_created_at, &Rfc3339) {
        Ok(created_at) => created_at,
        Err(error) => {
            tracing::warn!("Could not parse stored creation time {raw_created_at:?}: {error}");
            OffsetDateTime::UNIX_EPOCH
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
