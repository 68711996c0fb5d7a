// persisted component map and session log structures

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// the harder the component, the earlier it is scheduled
    pub fn for_complexity(complexity: Complexity) -> Self {
        match complexity {
            Complexity::Simple => Priority::Low,
            Complexity::Medium => Priority::Medium,
            Complexity::Complex => Priority::High,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub fn name(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// one-way lifecycle: pending -> completed. failures are never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    /// source path, relative to the legacy component root
    pub path: String,
    pub category: String,
    pub file_name: String,
    pub priority: Priority,
    pub complexity: Complexity,
    pub migration_status: MigrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vistara_path: Option<String>,
    /// fields written by other tools, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ComponentRecord {
    pub fn is_pending(&self) -> bool {
        self.migration_status == MigrationStatus::Pending
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentMap {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub meta: Value,
    pub components: IndexMap<String, ComponentRecord>,
}

impl ComponentMap {
    pub fn total(&self) -> usize {
        self.components.len()
    }

    pub fn completed(&self) -> usize {
        self.components.values().filter(|r| !r.is_pending()).count()
    }

    /// copy completed status from an earlier map for components present in both.
    /// returns how many records were carried over
    pub fn carry_over_progress(&mut self, previous: &ComponentMap) -> usize {
        let mut kept = 0;
        for (name, record) in self.components.iter_mut() {
            if let Some(earlier) = previous.components.get(name) {
                if !earlier.is_pending() {
                    record.migration_status = earlier.migration_status;
                    record.vistara_path = earlier.vistara_path.clone();
                    kept += 1;
                }
            }
        }
        kept
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationSuccess {
    pub name: String,
    pub from: String,
    pub to: String,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationFailure {
    pub name: String,
    pub reason: String,
}

/// what happened during one orchestrator run; written once at the end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub session: String,
    pub successful: Vec<MigrationSuccess>,
    pub failed: Vec<MigrationFailure>,
    pub skipped: Vec<String>,
}

impl SessionLog {
    pub fn start() -> Self {
        Self {
            session: Utc::now().to_rfc3339(),
            successful: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
        }
    }
}
