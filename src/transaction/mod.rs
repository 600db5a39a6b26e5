//! Transaction management for the money manager.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and validated `NewTransaction` creation input
//! - The `TransactionStore` adapter that owns the live record collection
//! - The pure filter engine, aggregator and dashboard view model
//! - Endpoint handlers for creating and deleting transactions

mod core;
mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod filter;
mod store;
mod summary;
mod view_model;

pub use core::{NewTransaction, Transaction, create_transaction_table};
pub use create_transaction_endpoint::create_transaction_endpoint;
pub use delete_transaction_endpoint::{delete_transaction_endpoint, get_delete_confirmation};
pub use filter::{FilterSpec, filter_transactions};
pub use store::{DeleteConfirmation, Subscription, TransactionStore};
pub use summary::{Summary, aggregate};
pub use view_model::{CategoryTotal, DashboardViewModel};
