use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// What a strategy yields when activated: the desire kind it satisfies
/// and the utility amount it contributes toward that kind's demand.
#[derive(Debug, Clone, Deserialize)]
pub struct Utility {
    pub kind: String,
    pub value: f64,
}

/// One entry of a strategy's cost profile (or of the capacity list).
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceCost {
    pub kind: String,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StrategyDefinition {
    pub id: String,
    pub utility: Utility,
    #[serde(default)]
    pub costs: Vec<ResourceCost>,
}

/// Resource kind -> available capacity. Empty is valid (unconstrained).
pub type ResourceCapacityTable = HashMap<String, f64>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no strategies defined")]
    MissingStrategies,
    #[error("duplicate strategy id `{0}`")]
    DuplicateStrategy(String),
    #[error("duplicate resource kind `{0}` in res_caps")]
    DuplicateResource(String),
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The immutable, ordered strategy list. Catalog order is fixed for the
/// lifetime of the process and defines the positional indexing shared by
/// goal vectors, activation vectors and the published intention.
#[derive(Debug, Clone)]
pub struct StrategyCatalog {
    strategies: Vec<StrategyDefinition>,
    // Desire kind -> catalog positions, built once at load.
    by_kind: HashMap<String, Vec<usize>>,
}

impl StrategyCatalog {
    pub fn new(strategies: Vec<StrategyDefinition>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for s in &strategies {
            if !seen.insert(s.id.clone()) {
                return Err(ConfigError::DuplicateStrategy(s.id.clone()));
            }
        }

        let mut by_kind: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, s) in strategies.iter().enumerate() {
            by_kind.entry(s.utility.kind.clone()).or_default().push(i);
        }

        Ok(Self { strategies, by_kind })
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn strategy(&self, i: usize) -> &StrategyDefinition {
        &self.strategies[i]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StrategyDefinition> {
        self.strategies.iter()
    }

    /// Catalog positions whose strategy satisfies the given desire kind.
    /// Empty slice when no strategy matches.
    pub fn positions_for_kind(&self, kind: &str) -> &[usize] {
        self.by_kind.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

// Raw deserialization target. Options so "absent" is distinguishable
// from "empty" during validation.
#[derive(Debug, Deserialize)]
struct RawConfig {
    strategies: Option<Vec<StrategyDefinition>>,
    res_caps: Option<Vec<ResourceCost>>,
    solver_timeout_ms: Option<u64>,
}

const DEFAULT_SOLVER_TIMEOUT_MS: u64 = 500;

/// Everything the node needs, validated. Loaded once; never reloaded.
#[derive(Debug, Clone)]
pub struct ArbiterConfig {
    pub catalog: StrategyCatalog,
    pub res_caps: ResourceCapacityTable,
    pub solver_timeout: Duration,
}

impl ArbiterConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;

        // Fail-fast: without an intact catalog no later stage is defined.
        let strategies = raw.strategies.ok_or(ConfigError::MissingStrategies)?;
        if strategies.is_empty() {
            return Err(ConfigError::MissingStrategies);
        }
        let catalog = StrategyCatalog::new(strategies)?;

        // An empty capacity table is valid, just not as useful.
        let mut res_caps = ResourceCapacityTable::new();
        for cap in raw.res_caps.unwrap_or_default() {
            if res_caps.insert(cap.kind.clone(), cap.value).is_some() {
                return Err(ConfigError::DuplicateResource(cap.kind));
            }
        }

        Ok(Self {
            catalog,
            res_caps,
            solver_timeout: Duration::from_millis(
                raw.solver_timeout_ms.unwrap_or(DEFAULT_SOLVER_TIMEOUT_MS),
            ),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
