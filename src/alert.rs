//! Alert partials for surfacing errors to the user.
//!
//! Failed store operations never propagate as unhandled faults; they are
//! converted into one of these alerts and swapped into the page's alert
//! container by HTMX.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Renders a dismissable error alert with a `message` headline and
/// `details` text.
pub fn alert_view(message: &str, details: &str) -> Markup {
    html!(
        div
            class="flex items-start p-4 mb-4 text-red-800 rounded-lg bg-red-50
                dark:bg-gray-800 dark:text-red-400 border border-red-300
                dark:border-red-800 shadow-lg"
            role="alert"
        {
            div class="text-sm font-medium"
            {
                p class="font-semibold" { (message) }

                @if !details.is_empty() {
                    p { (details) }
                }
            }

            button
                type="button"
                class="ms-auto -mx-1.5 -my-1.5 text-red-500 rounded-lg p-1.5
                    hover:bg-red-200 dark:hover:bg-gray-700 inline-flex h-8 w-8
                    items-center justify-center"
                aria-label="Close"
                onclick="this.closest('[role=alert]').remove()"
            {
                "\u{2715}"
            }
        }
    )
}

/// Render an alert as a response with the given status code.
pub fn render_alert(status_code: StatusCode, message: &str, details: &str) -> Response {
    (status_code, alert_view(message, details)).into_response()
}
