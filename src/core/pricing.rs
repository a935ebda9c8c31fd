//! Pricing policy of a material set.
//!
//! A material set is priced either by multiplying the ingredient cost or by adding a
//! flat cost to it. Only one mode is active at a time. Authoritative prices are
//! always computed by the backend; the estimate here is for display only.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Multiplier used when none is configured.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Display prices are rounded up to a multiple of this many minor units.
pub const DISPLAY_PRICE_STEP: i64 = 100;

/// Which pricing rule is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Price = cost × multiplier
    #[default]
    Multiplier,
    /// Price = cost + additional cost
    CustomCost,
}

/// Top-level pricing record of a material set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Active rule
    pub mode: PricingMode,
    /// Multiplier used in `Multiplier` mode
    pub multiplier: f64,
    /// Flat cost used in `CustomCost` mode
    pub additional_cost: f64,
}

impl PricingPolicy {
    /// Multiplier mode with the given multiplier and no additional cost.
    #[must_use]
    pub const fn with_multiplier(multiplier: f64) -> Self {
        Self {
            mode: PricingMode::Multiplier,
            multiplier,
            additional_cost: 0.0,
        }
    }

    /// Merges a patch, then resets the field of the inactive mode: the multiplier
    /// to `default_multiplier` in custom-cost mode, the additional cost to zero in
    /// multiplier mode. Resets win over values carried in the same patch, so a
    /// multiplier typed while custom cost is active never survives switching back.
    pub fn apply(&mut self, patch: PricingPatch, default_multiplier: f64) {
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(multiplier) = patch.multiplier {
            self.multiplier = multiplier;
        }
        if let Some(additional_cost) = patch.additional_cost {
            self.additional_cost = additional_cost;
        }

        match self.mode {
            PricingMode::CustomCost => self.multiplier = default_multiplier,
            PricingMode::Multiplier => self.additional_cost = 0.0,
        }
    }

    /// Estimated selling price for an ingredient cost, rounded up to the next
    /// multiple of [`DISPLAY_PRICE_STEP`]. `None` when the price is out of range.
    #[must_use]
    pub fn display_price(&self, cost_estimate: f64) -> Option<f64> {
        let cost = to_decimal(cost_estimate);
        let raw = match self.mode {
            PricingMode::Multiplier => cost.checked_mul(to_decimal(self.multiplier)),
            PricingMode::CustomCost => cost.checked_add(to_decimal(self.additional_cost)),
        }?;
        let step = Decimal::from(DISPLAY_PRICE_STEP);
        raw.checked_div(step)?.ceil().checked_mul(step)?.to_f64()
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::with_multiplier(DEFAULT_MULTIPLIER)
    }
}

/// Partial update of the pricing policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingPatch {
    /// New mode
    pub mode: Option<PricingMode>,
    /// New multiplier. Only kept in multiplier mode; in custom-cost mode it is
    /// reset to the default after every merge.
    pub multiplier: Option<f64>,
    /// New additional cost. Only kept in custom-cost mode; in multiplier mode the
    /// additional cost is reset to zero after every merge.
    pub additional_cost: Option<f64>,
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}
