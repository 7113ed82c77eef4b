use crate::config::StrategyCatalog;
use crate::msg::DesireSet;

/// One goal dimension, positionally aligned with the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    /// Aggregated demand of the matching desires. Multiple desires of
    /// the same kind sum into the dimension; the fixed rule keeps the
    /// vector fully determined by the input.
    pub demand: f64,
    /// True when any matching desire was flagged security: the engine
    /// must satisfy this dimension or report infeasibility.
    pub required: bool,
}

impl Goal {
    pub const ZERO: Goal = Goal {
        demand: 0.0,
        required: false,
    };
}

/// Convert a desire set into a goal vector aligned with the catalog.
/// Returns the vector plus whether any desire's kind matched no strategy
/// at all (reportable, non-fatal: the decision proceeds on the matched
/// subset).
pub fn convert(catalog: &StrategyCatalog, set: &DesireSet) -> (Vec<Goal>, bool) {
    let mut goals = vec![Goal::ZERO; catalog.len()];
    let mut unmatched = false;

    for desire in &set.desires {
        let positions = catalog.positions_for_kind(&desire.kind);
        if positions.is_empty() {
            unmatched = true;
            continue;
        }
        for &i in positions {
            goals[i].demand += desire.intensity;
            goals[i].required |= desire.security;
        }
    }

    (goals, unmatched)
}
