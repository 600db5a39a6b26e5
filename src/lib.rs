//! Money Manager is a web app for tracking personal income and expenses.
//!
//! This library provides a REST API that directly serves HTML pages backed by
//! a per-user transaction store.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod not_found;
mod routing;
mod session;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use routing::build_router;
pub use session::{Session, UserId};

use crate::{
    alert::render_alert,
    internal_server_error::{InternalServerErrorPage, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was submitted with an amount that is not a positive
    /// number.
    #[error("the transaction amount must be greater than zero")]
    InvalidAmount,

    /// A transaction was submitted with an empty description.
    #[error("the transaction description cannot be empty")]
    EmptyDescription,

    /// The backing store could not be reached, e.g. the database lock could
    /// not be acquired. The operation is abandoned and the user may retry it
    /// manually.
    #[error("the transaction store is not available")]
    StoreUnavailable,

    /// A session identity could not be established.
    ///
    /// All store operations remain blocked until a session exists, so this
    /// error is fatal at start-up.
    #[error("could not establish a session identity")]
    AuthenticationFailure,

    /// A delete referenced a transaction that is not in the current
    /// snapshot. This is a benign outcome: the transaction may have already
    /// been removed by an earlier delete.
    #[error("the transaction could not be found")]
    TransactionNotFound,

    /// An error occurred while getting the local timezone from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::TransactionNotFound => get_404_not_found_response(),
            Error::InvalidTimezone(timezone) => {
                render_internal_server_error(InternalServerErrorPage {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings \
                        and ensure the timezone has been set to a valid, canonical timezone string."
                    ),
                })
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidAmount => render_alert(
                StatusCode::BAD_REQUEST,
                "Invalid amount",
                "The amount must be a number greater than zero.",
            ),
            Error::EmptyDescription => render_alert(
                StatusCode::BAD_REQUEST,
                "Missing description",
                "Please fill in a description for the transaction.",
            ),
            Error::StoreUnavailable => render_alert(
                StatusCode::SERVICE_UNAVAILABLE,
                "Database not ready",
                "The transaction store is not available right now. Please wait or refresh.",
            ),
            Error::TransactionNotFound => render_alert(
                StatusCode::NOT_FOUND,
                "Could not find transaction",
                "The transaction could not be found. \
                Try refreshing the page to see if it has already been deleted.",
            ),
            _ => render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            ),
        }
    }
}
