//! The spending-by-category chart.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered into an HTML container by a small initialization script.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::Bar,
};
use maud::{Markup, PreEscaped, html};
use rust_decimal::prelude::ToPrimitive;

use crate::{
    html::{HeadElement, SECTION_STYLE},
    transaction::CategoryTotal,
};

/// The HTML element ID the chart is rendered into.
const CHART_CONTAINER_ID: &str = "spending-by-category-chart";

/// Renders the chart section: the chart container, or an explanatory
/// message when there is nothing to plot.
pub(super) fn chart_view(series: &[CategoryTotal]) -> Markup {
    html!(
        section class=(SECTION_STYLE)
        {
            h2 class="text-2xl font-bold text-blue-700 dark:text-blue-300 mb-4"
            {
                "Spending by Category"
            }

            @if series.is_empty() {
                p class="text-center text-gray-500 dark:text-gray-400"
                {
                    "No expenses recorded for the selected filter to display chart."
                }
            } @else {
                div
                    id=(CHART_CONTAINER_ID)
                    class="min-h-[380px] rounded dark:bg-gray-100"
                {}
            }
        }
    )
}

/// Generates the JavaScript that initializes the chart, with dark mode
/// support and responsive resizing.
///
/// With an empty series there is no chart container, so the script is empty.
pub(super) fn chart_script(series: &[CategoryTotal]) -> HeadElement {
    if series.is_empty() {
        return HeadElement::ScriptSource(PreEscaped(String::new()));
    }

    let options = spending_by_category_chart(series).to_string();

    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{CHART_CONTAINER_ID}");
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// Builds the ECharts configuration: one bar per expense category.
fn spending_by_category_chart(series: &[CategoryTotal]) -> Chart {
    let labels: Vec<String> = series
        .iter()
        .map(|entry| entry.category.to_string())
        .collect();
    let values: Vec<f64> = series
        .iter()
        .map(|entry| entry.amount.to_f64().unwrap_or_default())
        .collect();

    Chart::new()
        .title(Title::new().text("Spending by Category"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Spending").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
