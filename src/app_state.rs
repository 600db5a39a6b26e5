//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, session::Session, transaction::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction store for the session's user.
    pub store: TransactionStore,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] from a SQLite database connection and an
    /// established session.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models, and load the initial transaction snapshot.
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the initial
    /// snapshot cannot be loaded.
    pub fn new(
        db_connection: Connection,
        session: &Session,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));
        let store = TransactionStore::connect(connection, session)?;

        Ok(Self {
            store,
            local_timezone: local_timezone.to_owned(),
        })
    }
}
