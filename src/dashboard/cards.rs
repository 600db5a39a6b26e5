//! The financial summary cards.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    html::{SECTION_STYLE, format_currency},
    transaction::Summary,
};

/// Renders the three summary cards: total income, total expenses and net
/// balance.
///
/// The net balance card turns orange when the balance is negative.
pub(super) fn summary_cards(summary: &Summary) -> Markup {
    let negative_balance = summary.net_balance < Decimal::ZERO;

    let net_balance_card_style = if negative_balance {
        "bg-orange-50 dark:bg-orange-900/30 p-4 rounded-xl shadow-md"
    } else {
        "bg-blue-50 dark:bg-blue-900/30 p-4 rounded-xl shadow-md"
    };
    let net_balance_value_style = if negative_balance {
        "text-2xl font-bold text-orange-600 dark:text-orange-400"
    } else {
        "text-2xl font-bold text-blue-600 dark:text-blue-400"
    };

    html!(
        section
            id="summary"
            class=(SECTION_STYLE)
        {
            h2 class="text-2xl font-bold text-blue-700 dark:text-blue-300 mb-4"
            {
                "Financial Summary"
            }

            div class="grid grid-cols-1 sm:grid-cols-3 gap-4 text-center"
            {
                div
                    id="total-income-card"
                    class="bg-green-50 dark:bg-green-900/30 p-4 rounded-xl shadow-md"
                {
                    p class="text-sm text-gray-600 dark:text-gray-400" { "Total Income" }
                    p class="text-2xl font-bold text-green-600 dark:text-green-400"
                    {
                        (format_currency(summary.total_income))
                    }
                }

                div
                    id="total-expenses-card"
                    class="bg-red-50 dark:bg-red-900/30 p-4 rounded-xl shadow-md"
                {
                    p class="text-sm text-gray-600 dark:text-gray-400" { "Total Expenses" }
                    p class="text-2xl font-bold text-red-600 dark:text-red-400"
                    {
                        (format_currency(summary.total_expense))
                    }
                }

                div
                    id="net-balance-card"
                    class=(net_balance_card_style)
                {
                    p class="text-sm text-gray-600 dark:text-gray-400" { "Net Balance" }
                    p class=(net_balance_value_style)
                    {
                        (format_currency(summary.net_balance))
                    }
                }
            }
        }
    )
}
