//! The transaction history table.

use maud::{Markup, html};

use crate::{
    category::TransactionKind,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, SECTION_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    transaction::Transaction,
};

/// Renders the transaction history table, or an explanatory message when the
/// filtered snapshot is empty.
///
/// Amounts are signed and colored by kind: expenses show as "-$x.xx" in red,
/// income as "+$x.xx" in green. Each row carries a delete button that opens
/// the confirmation dialog.
pub(super) fn transactions_table(transactions: &[Transaction]) -> Markup {
    html!(
        section class=(SECTION_STYLE)
        {
            h2 class="text-2xl font-bold text-blue-700 dark:text-blue-300 mb-4"
            {
                "Transaction History"
            }

            @if transactions.is_empty() {
                p class="text-center text-gray-500 dark:text-gray-400"
                {
                    "No transactions found for the selected filters."
                }
            } @else {
                div class="overflow-x-auto"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row(transaction))
                            }
                        }
                    }
                }
            }
        }
    )
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (sign, amount_style) = match transaction.kind {
        TransactionKind::Expense => ("-", "px-6 py-4 font-semibold text-red-600"),
        TransactionKind::Income => ("+", "px-6 py-4 font-semibold text-green-600"),
    };

    let confirm_delete_url = format_endpoint(endpoints::CONFIRM_DELETE_VIEW, transaction.id);

    html!(
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(amount_style) { (sign) (format_currency(transaction.amount)) }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    title="Delete Transaction"
                    hx-get=(confirm_delete_url)
                    hx-target="#dialog-container"
                    hx-target-error="#alert-container"
                {
                    "Delete"
                }
            }
        }
    )
}
