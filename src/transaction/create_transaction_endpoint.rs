//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, category::Category, endpoints,
    transaction::{NewTransaction, TransactionStore},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The transaction store that owns the record collection.
    pub store: TransactionStore,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars.
    pub amount: Decimal,
    /// Text detailing the transaction.
    pub description: String,
    /// The category the transaction belongs to.
    pub category: Category,
    /// The date when the transaction occurred.
    pub date: Date,
}

/// A route handler for creating a new transaction, redirects to the
/// dashboard on success.
///
/// Validation failures and store errors are returned as alert partials; the
/// new record only shows up via the store's next snapshot, which the
/// redirect picks up.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> impl IntoResponse {
    let new_transaction =
        match NewTransaction::new(form.amount, &form.description, form.category, form.date) {
            Ok(new_transaction) => new_transaction,
            Err(error) => return error.into_alert_response(),
        };

    if let Err(error) = state.store.add(new_transaction).await {
        tracing::error!("Could not create transaction: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        category::{Category, TransactionKind},
        db::initialize,
        session::Session,
        transaction::TransactionStore,
    };

    use super::{CreateTransactionState, TransactionForm, create_transaction_endpoint};

    fn get_test_state() -> CreateTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let session = Session::establish("test secret").unwrap();
        let store = TransactionStore::connect(Arc::new(Mutex::new(conn)), &session).unwrap();

        CreateTransactionState { store }
    }

    #[track_caller]
    fn assert_redirects_to_dashboard(response: &Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/dashboard",
            "got redirect to {location:?}, want redirect to /dashboard"
        );
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_state();
        let form = TransactionForm {
            amount: Decimal::new(1230, 2),
            description: "test transaction".to_string(),
            category: Category::Food,
            date: date!(2024 - 01 - 10),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_redirects_to_dashboard(&response);

        let snapshot = state.store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].amount, Decimal::new(1230, 2));
        assert_eq!(snapshot[0].description, "test transaction");
        assert_eq!(snapshot[0].kind, TransactionKind::Expense);
    }

    #[tokio::test]
    async fn income_category_produces_income_transaction() {
        let state = get_test_state();
        let form = TransactionForm {
            amount: Decimal::from(2000),
            description: "January wages".to_string(),
            category: Category::Salary,
            date: date!(2024 - 01 - 15),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_redirects_to_dashboard(&response);
        assert_eq!(state.store.snapshot()[0].kind, TransactionKind::Income);
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let state = get_test_state();
        let form = TransactionForm {
            amount: Decimal::ZERO,
            description: "free lunch".to_string(),
            category: Category::Food,
            date: date!(2024 - 01 - 10),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
        assert!(response.headers().get(HX_REDIRECT).is_none());
        assert_eq!(state.store.snapshot(), vec![]);
    }

    #[tokio::test]
    async fn rejects_empty_description() {
        let state = get_test_state();
        let form = TransactionForm {
            amount: Decimal::from(10),
            description: "   ".to_string(),
            category: Category::Food,
            date: date!(2024 - 01 - 10),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(state.store.snapshot(), vec![]);
    }

    #[test]
    fn form_decodes_multi_word_categories() {
        let form: TransactionForm = serde_html_form::from_str(
            "amount=25.50&description=Misc&category=Other+Expense&date=2024-01-10",
        )
        .unwrap();

        assert_eq!(form.category, Category::OtherExpense);
        assert_eq!(form.amount, Decimal::new(2550, 2));
        assert_eq!(form.date, date!(2024 - 01 - 10));
    }
}
