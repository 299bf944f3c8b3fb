use anyhow::Result;
use tracing::debug;

use super::ui;
use crate::api::NewCalculation;
use crate::history::HistoryProvider;
use crate::state::CalculatorState;

/// Saves the current inputs to the backend history. The spinner stays
/// up while the request is in flight; a single invocation blocks, so
/// no duplicate submission can originate from one action.
pub async fn run(state: &CalculatorState, provider: &dyn HistoryProvider) -> Result<()> {
    let calculation = NewCalculation::from_state(state);
    debug!("Saving calculation: {calculation:?}");

    let pb = ui::new_spinner("Saving...");
    let result = provider.save(&calculation).await;
    pb.finish_and_clear();

    match result {
        Ok(record) => {
            println!("{}", ui::style_text("Saved!", ui::StyleType::Value));
            println!("Calculation #{} saved to history.", record.id);
            Ok(())
        }
        Err(e) => {
            println!(
                "{}",
                ui::style_text(&format!("Save failed: {e}"), ui::StyleType::Error)
            );
            Err(e)
        }
    }
}
