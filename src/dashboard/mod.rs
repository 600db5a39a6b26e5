//! Dashboard module
//!
//! Provides the main page: the add-transaction form, the filter controls,
//! the financial summary cards, the spending-by-category chart and the
//! transaction history table.

mod cards;
mod chart;
mod forms;
mod handlers;
mod table;

pub use handlers::get_dashboard_page;
