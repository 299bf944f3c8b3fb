//! Derived metric calculations
//!
//! The three formulas are pure arithmetic over the calculator inputs.
//! Rounding is a display concern; no rounding happens here.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    /// Maximum cost-per-acquisition to stay within the budget share.
    pub target_cpa: f64,
    /// Ceiling spend per lead, before conversion.
    pub max_cost_per_lead: f64,
    /// Lifetime profit left after acquisition spend.
    pub profit_retained: f64,
}

/// Derives the three output metrics from the calculator inputs.
///
/// Defined for every real input. Percentages outside [0, 100] and
/// negative values produce negative or inverted results rather than
/// an error; non-finite inputs propagate through the arithmetic.
pub fn derive(
    lifetime_profit: f64,
    acquisition_budget_pct: f64,
    conversion_rate_pct: f64,
) -> DerivedMetrics {
    let target_cpa = lifetime_profit * (acquisition_budget_pct / 100.0);
    let max_cost_per_lead = target_cpa * (conversion_rate_pct / 100.0);
    let profit_retained = lifetime_profit - target_cpa;

    DerivedMetrics {
        target_cpa,
        max_cost_per_lead,
        profit_retained,
    }
}
