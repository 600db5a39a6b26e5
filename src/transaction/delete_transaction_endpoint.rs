//! Defines the two-step delete flow: a confirmation dialog endpoint and the
//! delete endpoint it confirms.
//!
//! The dialog is requested with the transaction's ID, which checks the local
//! snapshot and shows what would be removed. Confirming issues the actual
//! DELETE, which re-checks before deleting since the snapshot may have moved
//! on in the meantime.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{BUTTON_SECONDARY_STYLE, format_currency},
    transaction::{Transaction, TransactionStore},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The transaction store that owns the record collection.
    pub store: TransactionStore,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler that renders the delete confirmation dialog for a
/// transaction, or an alert if the transaction is not in the current
/// snapshot.
pub async fn get_delete_confirmation(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.store.request_delete(transaction_id) {
        Ok(confirmation) => {
            (StatusCode::OK, confirmation_dialog(confirmation.transaction())).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler for deleting a transaction, redirects to the dashboard on
/// success.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let confirmation = match state.store.request_delete(transaction_id) {
        Ok(confirmation) => confirmation,
        Err(error) => return error.into_alert_response(),
    };

    match state.store.confirm_delete(confirmation).await {
        Ok(()) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::TransactionNotFound) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// Renders the confirmation dialog shown before a transaction is deleted.
fn confirmation_dialog(transaction: &Transaction) -> Markup {
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

    html!(
        div
            id="delete-confirmation-dialog"
            class="fixed inset-0 bg-black/50 flex items-center justify-center z-50 p-4"
        {
            div class="bg-white dark:bg-gray-800 rounded-xl shadow-2xl p-6 sm:p-8 max-w-sm w-full
                text-center text-gray-900 dark:text-white"
            {
                p class="text-lg font-semibold mb-2"
                {
                    "Are you sure you want to delete this transaction?"
                }

                p class="text-sm text-gray-600 dark:text-gray-400 mb-4"
                {
                    (transaction.description)
                    " (" (format_currency(transaction.amount)) " on " (transaction.date) ")"
                }

                div class="flex justify-center space-x-4 mt-4"
                {
                    button
                        type="button"
                        class="px-4 py-2 bg-red-600 text-white rounded-md hover:bg-red-700"
                        hx-delete=(delete_url)
                        hx-target-error="#alert-container"
                    {
                        "Delete"
                    }

                    button
                        type="button"
                        class=(BUTTON_SECONDARY_STYLE)
                        onclick="document.getElementById('delete-confirmation-dialog').remove()"
                    {
                        "Cancel"
                    }
                }
            }
        }
    )
}
