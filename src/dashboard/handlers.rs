//! Dashboard HTTP handlers and view rendering.
//!
//! The dashboard is a pure derivation of the store's current snapshot and
//! the filter chosen via query parameters: snapshot -> filter -> aggregate
//! -> view model -> HTML. Nothing here holds state between requests.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    dashboard::{
        cards::summary_cards,
        chart::{chart_script, chart_view},
        forms::{filter_controls, new_transaction_form},
        table::transactions_table,
    },
    html::{HeadElement, base},
    session::UserId,
    timezone::current_local_date,
    transaction::{
        DashboardViewModel, FilterSpec, TransactionStore, aggregate, filter_transactions,
    },
};

/// The format used by HTML date inputs, e.g. "2024-01-10".
const QUERY_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The transaction store the dashboard renders from.
    pub store: TransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The raw filter query parameters from the dashboard's filter form.
///
/// The form submits empty strings for untouched controls, so every field is
/// parsed leniently: blank or unparseable values simply leave that part of
/// the filter unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    /// The month select value, "01" through "12", or empty for "All Months".
    #[serde(default)]
    pub month: Option<String>,
    /// The year select value, or empty for "All Years".
    #[serde(default)]
    pub year: Option<String>,
    /// The start of the date range as "YYYY-MM-DD", or empty.
    #[serde(default)]
    pub start_date: Option<String>,
    /// The end of the date range as "YYYY-MM-DD", or empty.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl FilterQuery {
    /// Convert the raw query values into a [FilterSpec].
    pub fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec {
            month: parse_field(self.month.as_deref(), |text| {
                text.parse::<u8>()
                    .ok()
                    .and_then(|number| Month::try_from(number).ok())
            }),
            year: parse_field(self.year.as_deref(), |text| text.parse().ok()),
            start_date: parse_field(self.start_date.as_deref(), parse_query_date),
            end_date: parse_field(self.end_date.as_deref(), parse_query_date),
        }
    }
}

fn parse_field<T>(raw: Option<&str>, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    raw.map(str::trim).filter(|text| !text.is_empty()).and_then(parse)
}

fn parse_query_date(text: &str) -> Option<Date> {
    Date::parse(text, QUERY_DATE_FORMAT).ok()
}

/// Display the money manager dashboard, optionally filtered by the query
/// parameters.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let snapshot = state.store.snapshot();
    let filter_spec = query.to_filter_spec();
    let filtered = filter_transactions(&snapshot, &filter_spec);
    let summary = aggregate(&filtered);
    let view_model = DashboardViewModel::assemble(filtered, summary);

    Ok(dashboard_view(&view_model, &query, today, state.store.user_id()).into_response())
}

/// Renders the full dashboard page.
fn dashboard_view(
    view_model: &DashboardViewModel,
    query: &FilterQuery,
    today: Date,
    user_id: &UserId,
) -> Markup {
    let content = html!(
        header class="text-center py-8"
        {
            h1 class="text-4xl font-extrabold text-blue-800 dark:text-blue-300 mb-2"
            {
                "Money Manager"
            }

            p class="text-lg text-gray-600 dark:text-gray-400"
            {
                "Track your income and expenses effortlessly."
            }

            p class="text-sm text-gray-500 dark:text-gray-500 mt-2"
            {
                "Your User ID: "
                span id="user-id" class="font-mono text-blue-700 dark:text-blue-400 break-all"
                {
                    (user_id)
                }
            }
        }

        main class="grid grid-cols-1 lg:grid-cols-3 gap-6 px-4 pb-8 mx-auto max-w-screen-xl
            text-gray-900 dark:text-white"
        {
            section class="lg:col-span-1 h-fit"
            {
                (new_transaction_form(today))
            }

            section class="lg:col-span-2 grid grid-cols-1 gap-6"
            {
                (filter_controls(query, today.year()))

                (summary_cards(&view_model.summary))

                (chart_view(&view_model.chart_series))

                (transactions_table(&view_model.transactions))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(
            "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js".to_owned(),
        ),
        chart_script(&view_model.chart_series),
    ];

    base("Dashboard", &scripts, &content)
}
