use serde::{Deserialize, Serialize};

fn default_intensity() -> f64 {
    1.0
}

/// A single request for behavior, owned by the upstream workspace.
/// This node only reads desires during one update; it never mutates
/// or retains them across updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Desire {
    pub id: String,
    /// Type tag matched against each strategy's satisfied desire kind.
    pub kind: String,
    /// How much demand this desire contributes to its goal dimension.
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    /// Forwarded from upstream; not consumed by the conversion itself.
    #[serde(default = "default_intensity")]
    pub utility: f64,
    /// Opaque to this node beyond kind and id.
    #[serde(default)]
    pub params: serde_json::Value,
    /// Security desires MUST be satisfied or the solve is infeasible.
    #[serde(default)]
    pub security: bool,
}

impl Desire {
    /// Helper for the common case: unit intensity, no params.
    pub fn simple(id: &str, kind: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            intensity: 1.0,
            utility: 1.0,
            params: serde_json::Value::Null,
            security: false,
        }
    }
}

/// One atomic snapshot of the desire workspace. Order matters: when
/// several desires share a kind, the first one in the sequence is the
/// one an activated strategy gets bound to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesireSet {
    pub desires: Vec<Desire>,
}

/// The published decision. Four sequences positionally aligned with the
/// strategy catalog, plus a wall-clock stamp. Rebuilt from scratch on
/// every update; the latched channel keeps only the most recent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intention {
    pub strategies: Vec<String>,
    pub desires: Vec<String>,
    pub desire_types: Vec<String>,
    pub enabled: Vec<bool>,
    /// Milliseconds since the Unix epoch, taken after binding.
    pub stamp_ms: u64,
}
