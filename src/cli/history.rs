use anyhow::Result;

use super::ui;
use crate::api::CalculationRecord;
use crate::history::HistoryProvider;

pub fn display_as_table(records: &[CalculationRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Lifetime Profit"),
        ui::header_cell("Budget (%)"),
        ui::header_cell("Conversion (%)"),
        ui::header_cell("Saved At"),
    ]);

    for record in records {
        table.add_row(vec![
            comfy_table::Cell::new(record.id),
            ui::value_cell(&record.lifetime_profit),
            ui::value_cell(&record.acquisition_budget_pct),
            ui::value_cell(&record.conversion_rate_pct),
            comfy_table::Cell::new(record.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Calculation History", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output
}

pub async fn run(provider: &dyn HistoryProvider) -> Result<()> {
    let records = provider.list().await?;
    if records.is_empty() {
        println!(
            "{}",
            ui::style_text("No calculations saved yet.", ui::StyleType::Subtle)
        );
        return Ok(());
    }
    println!("{}", display_as_table(&records));
    Ok(())
}
