use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use crate::binder;
use crate::config::{ArbiterConfig, ConfigError, ResourceCapacityTable, StrategyCatalog};
use crate::goal;
use crate::msg::{DesireSet, Intention};
use crate::solver::{ArbitrationEngine, GreedyEngine, SolveOutcome};

/// Observable lifecycle phase. A node that fails configuration is never
/// constructed at all (`from_path` returns Err before any channel
/// exists), so `Failed` has no runtime representation here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Processing,
}

/// Receiver side of the latched intention channel: the last published
/// value stays available to subscribers that attach late.
pub type IntentionWatch = watch::Receiver<Option<Intention>>;

pub struct Node {
    catalog: Arc<StrategyCatalog>,
    res_caps: Arc<ResourceCapacityTable>,
    engine: Arc<dyn ArbitrationEngine>,
    solver_timeout: Duration,
    pub phase: Phase,
    pub_intention: watch::Sender<Option<Intention>>,
}

impl Node {
    /// Build a node around a custom arbitration engine (e.g. a stub).
    pub fn new(config: ArbiterConfig, engine: Arc<dyn ArbitrationEngine>) -> (Self, IntentionWatch) {
        let (tx, rx) = watch::channel(None);
        let node = Self {
            catalog: Arc::new(config.catalog),
            res_caps: Arc::new(config.res_caps),
            engine,
            solver_timeout: config.solver_timeout,
            phase: Phase::Ready,
            pub_intention: tx,
        };
        (node, rx)
    }

    /// Build a node with the default greedy engine over the catalog.
    pub fn with_default_engine(config: ArbiterConfig) -> (Self, IntentionWatch) {
        let catalog = Arc::new(config.catalog);
        let engine = Arc::new(GreedyEngine::new(catalog.clone()));
        let (tx, rx) = watch::channel(None);
        let node = Self {
            catalog,
            res_caps: Arc::new(config.res_caps),
            engine,
            solver_timeout: config.solver_timeout,
            phase: Phase::Ready,
            pub_intention: tx,
        };
        (node, rx)
    }

    /// Load the configuration and build the node. Fail-fast: any
    /// configuration error leaves the node non-operational, with no
    /// subscription and no publication ever.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<(Self, IntentionWatch), ConfigError> {
        let config = ArbiterConfig::from_path(path)?;
        Ok(Self::with_default_engine(config))
    }

    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    /// Attach another subscriber to the latched intention channel.
    pub fn subscribe(&self) -> IntentionWatch {
        self.pub_intention.subscribe()
    }

    /// One full cycle: convert -> solve -> bind -> publish. Stateless
    /// across invocations except for the immutable catalog and caps.
    pub async fn handle_update(&mut self, set: DesireSet) {
        self.phase = Phase::Processing;

        let (goals, unmatched) = goal::convert(&self.catalog, &set);
        if unmatched {
            warn!("desires with no matching strategy will be ignored");
        }

        // The engine call is synchronous; run it on a blocking task so
        // an unbounded search cannot stall the reactive loop. Expiry
        // maps to Infeasible.
        let engine = self.engine.clone();
        let caps = self.res_caps.clone();
        let solve = tokio::task::spawn_blocking(move || engine.solve(&goals, &caps));
        let outcome = match tokio::time::timeout(self.solver_timeout, solve).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_err)) => {
                warn!("solver task failed: {}", join_err);
                SolveOutcome::Infeasible
            }
            Err(_) => {
                warn!("solver timed out after {:?}", self.solver_timeout);
                SolveOutcome::Infeasible
            }
        };

        // Infeasible cycles publish an explicit all-disabled record so
        // the latched value never shows a stale feasible decision.
        let activation = match outcome {
            SolveOutcome::Activated(a) if a.len() == self.catalog.len() => a,
            SolveOutcome::Activated(a) => {
                warn!(
                    "engine returned {} activations for {} strategies; dropping the cycle",
                    a.len(),
                    self.catalog.len()
                );
                vec![false; self.catalog.len()]
            }
            SolveOutcome::Infeasible => {
                warn!("no feasible activation; publishing all-disabled intention");
                vec![false; self.catalog.len()]
            }
        };

        let intention = binder::bind(&self.catalog, &activation, &set);
        self.pub_intention.send_replace(Some(intention));

        self.phase = Phase::Ready;
    }

    /// Drive the node from the inbound desire channel. Updates are
    /// processed to completion in arrival order on this single task, so
    /// the latched value always reflects the most recent desire set.
    pub async fn run(mut self, mut rx: mpsc::Receiver<DesireSet>) {
        info!("arbiter node ready ({} strategies)", self.catalog.len());
        while let Some(set) = rx.recv().await {
            self.handle_update(set).await;
        }
        info!("desire channel closed, node stopping");
    }
}
