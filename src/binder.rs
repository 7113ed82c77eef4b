use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::StrategyCatalog;
use crate::msg::{DesireSet, Intention};

// Empty string marks an unbound slot (disabled strategy, or no desire
// of the matching kind in the set).
const EMPTY: &str = "";

/// First desire of the given kind, in collection order. Ties among
/// same-kind desires are resolved by input order, not priority.
fn desire_id_for_kind<'a>(set: &'a DesireSet, kind: &str) -> &'a str {
    set.desires
        .iter()
        .find(|d| d.kind == kind)
        .map(|d| d.id.as_str())
        .unwrap_or(EMPTY)
}

/// Assemble the intention record for one activation vector. Pure: no
/// input is mutated, and the record is rebuilt in full every cycle.
pub fn bind(catalog: &StrategyCatalog, activation: &[bool], set: &DesireSet) -> Intention {
    debug_assert_eq!(
        activation.len(),
        catalog.len(),
        "activation vector misaligned with catalog"
    );

    let n = catalog.len();
    let mut out = Intention {
        strategies: Vec::with_capacity(n),
        desires: Vec::with_capacity(n),
        desire_types: Vec::with_capacity(n),
        enabled: Vec::with_capacity(n),
        stamp_ms: 0,
    };

    for (i, strat) in catalog.iter().enumerate() {
        let enabled = activation[i];
        let kind = if enabled { strat.utility.kind.as_str() } else { EMPTY };
        let id = if enabled { desire_id_for_kind(set, kind) } else { EMPTY };

        tracing::debug!("strategy {} activation: {}", strat.id, enabled);

        out.strategies.push(strat.id.clone());
        out.desires.push(id.to_string());
        out.desire_types.push(kind.to_string());
        out.enabled.push(enabled);
    }

    out.stamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    out
}
