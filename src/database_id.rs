//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID assigned to a transaction by the store on creation.
///
/// Opaque to callers: the only supported operations are equality checks and
/// passing it back to the store.
pub type TransactionId = DatabaseId;
