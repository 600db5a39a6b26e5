//! The transaction store adapter.
//!
//! [TransactionStore] is the sole owner and writer of the live transaction
//! collection. All mutations go through it, and their effects are observed
//! through snapshot deliveries: after every successful change the store
//! reloads the full record set, sorts it by date descending and hands it to
//! every registered listener. Consumers never receive partial updates; each
//! delivered snapshot fully supersedes the previous one.

use std::{
    fmt,
    sync::{
        Arc, Mutex, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use rusqlite::Connection;

use crate::{
    Error,
    database_id::TransactionId,
    session::{Session, UserId},
    transaction::core::{
        NewTransaction, Transaction, create_transaction, delete_transaction, get_transactions,
    },
};

type SnapshotListener = Box<dyn Fn(&[Transaction]) + Send + Sync>;
type ListenerRegistry = Mutex<Vec<(u64, SnapshotListener)>>;

/// The live, per-user collection of transactions backed by the database.
///
/// Cloning the store is cheap and clones share the same record collection
/// and listener registry.
#[derive(Clone)]
pub struct TransactionStore {
    db_connection: Arc<Mutex<Connection>>,
    user_id: UserId,
    records: Arc<Mutex<Vec<Transaction>>>,
    listeners: Arc<ListenerRegistry>,
    next_listener_id: Arc<AtomicU64>,
}

impl fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionStore")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl TransactionStore {
    /// Connect the store for the user of `session` using the injected
    /// database handle, and load the initial snapshot.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the database connection cannot
    /// be acquired, or [Error::SqlError] if loading the snapshot fails.
    pub fn connect(
        db_connection: Arc<Mutex<Connection>>,
        session: &Session,
    ) -> Result<Self, Error> {
        let store = Self {
            db_connection,
            user_id: session.user_id().clone(),
            records: Arc::new(Mutex::new(Vec::new())),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: Arc::new(AtomicU64::new(0)),
        };

        {
            let connection = store.acquire_connection()?;
            let snapshot = load_sorted_snapshot(&store.user_id, &connection)?;
            *store.records.lock().expect(RECORDS_LOCK_MSG) = snapshot;
        }

        Ok(store)
    }

    /// The identity of the user whose transactions this store holds.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// A copy of the current snapshot, sorted by date descending.
    ///
    /// # Panics
    ///
    /// Panics if a previous snapshot consumer panicked while holding the
    /// internal record lock.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.records.lock().expect(RECORDS_LOCK_MSG).clone()
    }

    /// Register `listener` to be invoked with the full, date-descending
    /// snapshot: once immediately with the current contents, and again after
    /// every successful mutation.
    ///
    /// The listener stays registered until the returned [Subscription] is
    /// dropped.
    pub fn subscribe(
        &self,
        listener: impl Fn(&[Transaction]) + Send + Sync + 'static,
    ) -> Subscription {
        let snapshot = self.snapshot();
        listener(&snapshot);

        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect(LISTENERS_LOCK_MSG)
            .push((id, Box::new(listener)));

        Subscription {
            listeners: Arc::downgrade(&self.listeners),
            id,
        }
    }

    /// Persist a new transaction.
    ///
    /// The new record is not reflected in [TransactionStore::snapshot] until
    /// this call completes; callers that need to react to the change should
    /// do so via [TransactionStore::subscribe] rather than assuming the
    /// mutation is visible when this future resolves.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the database connection cannot
    /// be acquired, or [Error::SqlError] if the insert fails.
    pub async fn add(&self, new_transaction: NewTransaction) -> Result<(), Error> {
        let connection = self.acquire_connection()?;

        create_transaction(new_transaction, &self.user_id, &connection)?;

        self.refresh_and_notify(&connection)
    }

    /// First step of deleting a transaction: check that `id` is present in
    /// the current snapshot and return a confirmation token for
    /// [TransactionStore::confirm_delete].
    ///
    /// The check is against possibly-stale local state; the authoritative
    /// check happens when the delete is confirmed.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] if no transaction with `id` is
    /// currently tracked.
    pub fn request_delete(&self, id: TransactionId) -> Result<DeleteConfirmation, Error> {
        self.snapshot()
            .into_iter()
            .find(|transaction| transaction.id == id)
            .map(|transaction| DeleteConfirmation { transaction })
            .ok_or(Error::TransactionNotFound)
    }

    /// Second step of deleting a transaction: perform the delete that
    /// `confirmation` was issued for.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::TransactionNotFound] if the transaction disappeared between
    ///   the request and the confirmation (e.g. it was already deleted),
    /// - [Error::StoreUnavailable] if the database connection cannot be
    ///   acquired,
    /// - or [Error::SqlError] if the delete fails.
    pub async fn confirm_delete(&self, confirmation: DeleteConfirmation) -> Result<(), Error> {
        let connection = self.acquire_connection()?;

        let rows_affected =
            delete_transaction(confirmation.transaction.id, &self.user_id, &connection)?;

        if rows_affected == 0 {
            return Err(Error::TransactionNotFound);
        }

        self.refresh_and_notify(&connection)
    }

    fn acquire_connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, Error> {
        self.db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::StoreUnavailable)
    }

    /// Reload the snapshot from the database and deliver it to every
    /// listener. Listeners run synchronously on the calling thread, one
    /// after the other.
    fn refresh_and_notify(&self, connection: &Connection) -> Result<(), Error> {
        let snapshot = load_sorted_snapshot(&self.user_id, connection)?;

        *self.records.lock().expect(RECORDS_LOCK_MSG) = snapshot.clone();

        for (_, listener) in self.listeners.lock().expect(LISTENERS_LOCK_MSG).iter() {
            listener(&snapshot);
        }

        Ok(())
    }
}

const RECORDS_LOCK_MSG: &str = "transaction snapshot lock poisoned";
const LISTENERS_LOCK_MSG: &str = "snapshot listener lock poisoned";

/// Load the user's transactions and sort them by date descending.
///
/// The underlying store does not guarantee any row order, so the sort
/// happens here. The sort is stable: transactions on the same date keep the
/// store's row order within a single snapshot.
fn load_sorted_snapshot(
    user_id: &UserId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut snapshot = get_transactions(user_id, connection)?;
    snapshot.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(snapshot)
}

/// A registered snapshot listener.
///
/// Dropping the subscription releases the listener exactly once; after that
/// no further snapshots are delivered to it.
#[must_use = "the listener is released as soon as the subscription is dropped"]
pub struct Subscription {
    listeners: Weak<ListenerRegistry>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade()
            && let Ok(mut listeners) = listeners.lock()
        {
            listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// A token issued by [TransactionStore::request_delete], proving that the
/// delete was checked against the local snapshot before being confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteConfirmation {
    transaction: Transaction,
}

impl DeleteConfirmation {
    /// The transaction that will be deleted when this confirmation is
    /// passed to [TransactionStore::confirm_delete]. Confirmation UIs can
    /// use this to describe what is about to be removed.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }
}

// ============================================================================
// TESTS
// ============================================================================
