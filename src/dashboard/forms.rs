//! The add-transaction form and the filter controls.

use maud::{Markup, html};
use time::Date;

use crate::{
    category::ALL_CATEGORIES,
    dashboard::handlers::FilterQuery,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        SECTION_STYLE,
    },
};

/// The month dropdown options as (value, label) pairs.
const MONTHS: [(&str, &str); 12] = [
    ("01", "January"),
    ("02", "February"),
    ("03", "March"),
    ("04", "April"),
    ("05", "May"),
    ("06", "June"),
    ("07", "July"),
    ("08", "August"),
    ("09", "September"),
    ("10", "October"),
    ("11", "November"),
    ("12", "December"),
];

/// Renders the form for adding a new transaction. The date input defaults
/// to `today`.
pub(super) fn new_transaction_form(today: Date) -> Markup {
    html!(
        div class=(SECTION_STYLE)
        {
            h2 class="text-2xl font-bold text-blue-700 dark:text-blue-300 mb-6"
            {
                "Add New Transaction"
            }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="space-y-4"
            {
                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                    input
                        type="number"
                        name="amount"
                        id="amount"
                        placeholder="e.g., 50.00"
                        class=(FORM_TEXT_INPUT_STYLE)
                        min="0.01"
                        step="0.01"
                        required;
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }
                    input
                        type="text"
                        name="description"
                        id="description"
                        placeholder="e.g., Coffee at Cafe X"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    select
                        name="category"
                        id="category"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required
                    {
                        @for category in ALL_CATEGORIES {
                            option value=(category) { (category) }
                        }
                    }
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                    input
                        type="date"
                        name="date"
                        id="date"
                        value=(today)
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Add Transaction"
                }
            }
        }
    )
}

/// Renders the filter controls: month and year selects, a start/end date
/// pair, and apply/clear actions.
///
/// The year dropdown spans five years back and four years forward of
/// `current_year`.
pub(super) fn filter_controls(query: &FilterQuery, current_year: i32) -> Markup {
    let years: Vec<i32> = ((current_year - 5)..(current_year + 5)).collect();

    html!(
        section class=(SECTION_STYLE)
        {
            h2 class="text-2xl font-bold text-blue-700 dark:text-blue-300 mb-4"
            {
                "Filter Transactions"
            }

            form
                method="get"
                action=(endpoints::DASHBOARD_VIEW)
            {
                div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 mb-4"
                {
                    div
                    {
                        label for="filter-month" class=(FORM_LABEL_STYLE) { "Month" }
                        select
                            name="month"
                            id="filter-month"
                            class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" { "All Months" }

                            @for (value, label) in MONTHS {
                                option
                                    value=(value)
                                    selected[query.month.as_deref() == Some(value)]
                                {
                                    (label)
                                }
                            }
                        }
                    }

                    div
                    {
                        label for="filter-year" class=(FORM_LABEL_STYLE) { "Year" }
                        select
                            name="year"
                            id="filter-year"
                            class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" { "All Years" }

                            @for year in years {
                                option
                                    value=(year)
                                    selected[query.year.as_deref() == Some(year.to_string().as_str())]
                                {
                                    (year)
                                }
                            }
                        }
                    }

                    div
                    {
                        label for="filter-start-date" class=(FORM_LABEL_STYLE) { "Start Date" }
                        input
                            type="date"
                            name="start_date"
                            id="filter-start-date"
                            value=[query.start_date.as_deref()]
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="filter-end-date" class=(FORM_LABEL_STYLE) { "End Date" }
                        input
                            type="date"
                            name="end_date"
                            id="filter-end-date"
                            value=[query.end_date.as_deref()]
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div class="flex justify-end space-x-3"
                {
                    a
                        href=(endpoints::DASHBOARD_VIEW)
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Clear Filters"
                    }

                    button type="submit" class="px-5 py-2 bg-blue-500 dark:bg-blue-600
                        hover:bg-blue-600 hover:dark:bg-blue-700 text-white rounded"
                    {
                        "Apply Filters"
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod forms_tests {
    use scraper::{ElementRef, Html, Selector};
    use time::macros::date;

    use crate::{
        dashboard::{
            forms::{filter_controls, new_transaction_form},
            handlers::FilterQuery,
        },
        endpoints,
    };

    #[track_caller]
    fn assert_required(input: &ElementRef) {
        let required = input.value().attr("required");
        let input_name = input.value().attr("name").unwrap();
        assert!(
            required.is_some(),
            "want {input_name} input to be required, got {required:?}"
        );
    }

    #[test]
    fn new_transaction_form_has_expected_inputs() {
        let markup = new_transaction_form(date!(2024 - 01 - 10));
        let html = Html::parse_fragment(&markup.into_string());

        let form_selector = Selector::parse("form").unwrap();
        let form = html.select(&form_selector).next().expect("No form found");

        let hx_post = form.value().attr("hx-post");
        assert_eq!(
            hx_post,
            Some(endpoints::TRANSACTIONS_API),
            "want form with attribute hx-post=\"{}\", got {hx_post:?}",
            endpoints::TRANSACTIONS_API
        );

        for (name, element_type) in [
            ("amount", "number"),
            ("description", "text"),
            ("date", "date"),
        ] {
            let selector = Selector::parse(&format!("input[type={element_type}]")).unwrap();
            let inputs: Vec<_> = form.select(&selector).collect();
            assert_eq!(
                inputs.len(),
                1,
                "want 1 {element_type} input, got {}",
                inputs.len()
            );

            let input = inputs.first().unwrap();
            assert_eq!(input.value().attr("name"), Some(name));
            assert_required(input);
        }
    }

    #[test]
    fn new_transaction_form_date_defaults_to_today() {
        let markup = new_transaction_form(date!(2024 - 01 - 10));
        let html = Html::parse_fragment(&markup.into_string());

        let date_selector = Selector::parse("input[type=date]").unwrap();
        let date_input = html.select(&date_selector).next().unwrap();

        assert_eq!(date_input.value().attr("value"), Some("2024-01-10"));
    }

    #[test]
    fn new_transaction_form_amount_has_min_and_step() {
        let markup = new_transaction_form(date!(2024 - 01 - 10));
        let html = Html::parse_fragment(&markup.into_string());

        let amount_selector = Selector::parse("input[name=amount]").unwrap();
        let amount_input = html.select(&amount_selector).next().unwrap();

        assert_eq!(amount_input.value().attr("min"), Some("0.01"));
        assert_eq!(amount_input.value().attr("step"), Some("0.01"));
    }

    #[test]
    fn new_transaction_form_lists_all_categories() {
        let markup = new_transaction_form(date!(2024 - 01 - 10));
        let html = Html::parse_fragment(&markup.into_string());

        let option_selector = Selector::parse("select[name=category] option").unwrap();
        let options: Vec<String> = html
            .select(&option_selector)
            .map(|option| option.text().collect())
            .collect();

        assert_eq!(options.len(), 13);
        assert_eq!(options.first().map(String::as_str), Some("Food"));
        assert!(options.contains(&"Other Income".to_owned()));
        assert!(options.contains(&"Other Expense".to_owned()));
    }

    #[test]
    fn filter_controls_include_all_months_and_years_options() {
        let markup = filter_controls(&FilterQuery::default(), 2024);
        let html = Html::parse_fragment(&markup.into_string());

        let month_selector = Selector::parse("select[name=month] option").unwrap();
        let months: Vec<_> = html.select(&month_selector).collect();
        assert_eq!(months.len(), 13, "want 'All Months' plus twelve months");
        assert_eq!(months[0].value().attr("value"), Some(""));

        let year_selector = Selector::parse("select[name=year] option").unwrap();
        let years: Vec<String> = html
            .select(&year_selector)
            .map(|option| option.text().collect())
            .collect();
        assert_eq!(years.len(), 11, "want 'All Years' plus ten years");
        assert!(years.contains(&"2019".to_owned()));
        assert!(years.contains(&"2028".to_owned()));
    }

    #[test]
    fn filter_controls_mark_current_selection() {
        let query = FilterQuery {
            month: Some("01".to_owned()),
            year: Some("2024".to_owned()),
            start_date: Some("2024-01-12".to_owned()),
            end_date: None,
        };
        let markup = filter_controls(&query, 2024);
        let html = Html::parse_fragment(&markup.into_string());

        let selected_selector = Selector::parse("option[selected]").unwrap();
        let selected: Vec<_> = html
            .select(&selected_selector)
            .map(|option| option.value().attr("value").unwrap().to_owned())
            .collect();
        assert_eq!(selected, vec!["01".to_owned(), "2024".to_owned()]);

        let start_selector = Selector::parse("input[name=start_date]").unwrap();
        let start_input = html.select(&start_selector).next().unwrap();
        assert_eq!(start_input.value().attr("value"), Some("2024-01-12"));

        let end_selector = Selector::parse("input[name=end_date]").unwrap();
        let end_input = html.select(&end_selector).next().unwrap();
        assert_eq!(end_input.value().attr("value"), None);
    }
}
