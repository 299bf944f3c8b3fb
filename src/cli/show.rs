use super::ui;
use crate::core::{currency, metrics};
use crate::state::CalculatorState;

/// Renders the current inputs and the metrics derived from them.
/// Values are rounded to two decimal places for display only.
pub fn display_as_table(state: &CalculatorState) -> String {
    let derived = metrics::derive(
        state.lifetime_profit,
        state.acquisition_budget_pct,
        state.conversion_rate_pct,
    );
    let currency = currency::find_by_symbol(&state.currency);
    let symbol = currency.symbol;

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);

    table.add_row(vec![
        comfy_table::Cell::new("Lifetime Profit"),
        ui::value_cell(&format!("{symbol}{:.2}", state.lifetime_profit)),
    ]);
    table.add_row(vec![
        comfy_table::Cell::new("Acquisition Budget"),
        ui::value_cell(&format!("{:.2}%", state.acquisition_budget_pct)),
    ]);
    table.add_row(vec![
        comfy_table::Cell::new("Conversion Rate"),
        ui::value_cell(&format!("{:.2}%", state.conversion_rate_pct)),
    ]);
    table.add_row(vec![
        comfy_table::Cell::new("Target CPA"),
        ui::metric_cell(&format!("{symbol}{:.2}", derived.target_cpa)),
    ]);
    table.add_row(vec![
        comfy_table::Cell::new("Max Cost per Lead"),
        ui::metric_cell(&format!("{symbol}{:.2}", derived.max_cost_per_lead)),
    ]);
    table.add_row(vec![
        comfy_table::Cell::new("Profit Retained"),
        ui::metric_cell(&format!("{symbol}{:.2}", derived.profit_retained)),
    ]);

    let mut output = format!(
        "{} ({})\n\n",
        ui::style_text("Target CPA Calculator", ui::StyleType::Title),
        currency.name
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\nTarget CPA ({}): {}",
        ui::style_text(currency.name, ui::StyleType::Label),
        ui::style_text(
            &format!("{symbol}{:.2}", derived.target_cpa),
            ui::StyleType::Value
        )
    ));

    output
}

pub fn run(state: &CalculatorState) {
    println!("{}", display_as_table(state));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shows_derived_metrics() {
        let output = display_as_table(&CalculatorState::default());
        assert!(output.contains("2500.00"));
        assert!(output.contains("250.00"));
        assert!(output.contains("50.00%"));
        assert!(output.contains("10.00%"));
        assert!(output.contains("INR"));
    }

    #[test]
    fn test_unknown_currency_falls_back_for_display() {
        let state = CalculatorState {
            currency: "???".to_string(),
            ..CalculatorState::default()
        };
        let output = display_as_table(&state);
        assert!(output.contains("INR"));
        assert!(output.contains("₹"));
    }

    #[test]
    fn test_display_currency_changes_prefix_only() {
        let state = CalculatorState {
            currency: "$".to_string(),
            ..CalculatorState::default()
        };
        let output = display_as_table(&state);
        assert!(output.contains("$2500.00"));
        assert!(output.contains("USD"));
    }
}
