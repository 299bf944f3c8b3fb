//! Calculator input state and its persisted snapshot.
//!
//! The state is mirrored to disk on every mutation, so the snapshot
//! always reflects the most recent change. A snapshot that fails to
//! parse is discarded silently and the defaults apply.

use std::path::Path;

use anyhow::Result;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed key under which the single snapshot document is stored.
pub const STORAGE_KEY: &str = "ppc-calculator-state";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    pub lifetime_profit: f64,
    pub acquisition_budget_pct: f64,
    pub conversion_rate_pct: f64,
    pub currency: String,
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState {
            lifetime_profit: 5000.0,
            acquisition_budget_pct: 50.0,
            conversion_rate_pct: 10.0,
            currency: "₹".to_string(),
        }
    }
}

/// Durable store for the calculator snapshot.
pub struct SnapshotStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl SnapshotStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        let keyspace = fjall::Config::new(data_dir.join("state")).open()?;
        let partition = keyspace.open_partition("snapshots", PartitionCreateOptions::default())?;
        Ok(Self {
            keyspace,
            partition,
        })
    }

    /// Loads the saved snapshot, falling back to the default tuple when
    /// no snapshot exists or the stored bytes fail to parse.
    pub fn load(&self) -> CalculatorState {
        match self.partition.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_slice(&raw) {
                Ok(state) => {
                    debug!("Loaded snapshot for key: {STORAGE_KEY}");
                    state
                }
                Err(e) => {
                    debug!("Failed to parse saved state: {e}");
                    CalculatorState::default()
                }
            },
            Ok(None) => {
                debug!("No snapshot found, using defaults");
                CalculatorState::default()
            }
            Err(e) => {
                debug!("Snapshot read error: {e}");
                CalculatorState::default()
            }
        }
    }

    /// Writes the snapshot synchronously. Called after every mutation.
    pub fn save(&self, state: &CalculatorState) -> Result<()> {
        self.partition
            .insert(STORAGE_KEY, serde_json::to_vec(state)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Snapshot PUT for key: {STORAGE_KEY}");
        Ok(())
    }
}
