use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{ResourceCapacityTable, ResourceCost, StrategyCatalog};
use crate::goal::Goal;

/// Result of one arbitration solve. Infeasible is distinct from
/// "activated nothing": an all-false vector is a valid decision, while
/// Infeasible means no acceptable activation exists this cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Activated(Vec<bool>),
    Infeasible,
}

/// The external collaborator boundary. The engine captures the fixed
/// resource model (strategy costs) at construction; per cycle it only
/// sees the goal vector and the capacity table. Engines run on a
/// blocking task so the node can bound them with a timeout.
pub trait ArbitrationEngine: Send + Sync {
    fn solve(&self, goals: &[Goal], caps: &ResourceCapacityTable) -> SolveOutcome;
}

const EPS: f64 = 1e-9;

fn fits(used: &HashMap<String, f64>, caps: &ResourceCapacityTable, costs: &[ResourceCost]) -> bool {
    costs.iter().all(|c| match caps.get(&c.kind) {
        // Resource kinds absent from the table are unconstrained.
        None => true,
        Some(cap) => used.get(&c.kind).copied().unwrap_or(0.0) + c.value <= cap + EPS,
    })
}

fn charge(used: &mut HashMap<String, f64>, costs: &[ResourceCost]) {
    for c in costs {
        *used.entry(c.kind.clone()).or_insert(0.0) += c.value;
    }
}

/// Default production engine: greedy utility maximization under capacity.
///
/// 1. Required dimensions (security desires) are activated first, in
///    catalog order; if they cannot all fit, the solve is infeasible.
/// 2. Remaining candidates (demand > 0) are taken by descending
///    `utility.value * demand`, ties broken by catalog order; a candidate
///    that would exceed any capacity is skipped, not fatal.
/// 3. Zero-demand positions are never activated.
pub struct GreedyEngine {
    catalog: Arc<StrategyCatalog>,
}

impl GreedyEngine {
    pub fn new(catalog: Arc<StrategyCatalog>) -> Self {
        Self { catalog }
    }
}

impl ArbitrationEngine for GreedyEngine {
    fn solve(&self, goals: &[Goal], caps: &ResourceCapacityTable) -> SolveOutcome {
        let n = self.catalog.len();
        debug_assert_eq!(goals.len(), n, "goal vector misaligned with catalog");

        let mut active = vec![false; n];
        let mut used: HashMap<String, f64> = HashMap::new();

        // Mandatory pass.
        for i in 0..n {
            if goals[i].required && goals[i].demand > 0.0 {
                let costs = &self.catalog.strategy(i).costs;
                if !fits(&used, caps, costs) {
                    return SolveOutcome::Infeasible;
                }
                charge(&mut used, costs);
                active[i] = true;
            }
        }

        // Optional pass, best score first. Stable sort keeps catalog
        // order on ties, so the outcome is deterministic.
        let score = |i: usize| self.catalog.strategy(i).utility.value * goals[i].demand;
        let mut order: Vec<usize> = (0..n)
            .filter(|&i| !active[i] && goals[i].demand > 0.0)
            .collect();
        order.sort_by(|&a, &b| {
            score(b)
                .partial_cmp(&score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for i in order {
            let costs = &self.catalog.strategy(i).costs;
            if fits(&used, caps, costs) {
                charge(&mut used, costs);
                active[i] = true;
            }
        }

        SolveOutcome::Activated(active)
    }
}
