// storage for the component map and session logs

use super::model::{ComponentMap, SessionLog};
use crate::error::CodemodError;
use anyhow::{Context, Result};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// where the orchestrator reads and writes its state
pub trait MapRepository {
    fn load(&self) -> Result<ComponentMap>;

    /// replace the stored map wholesale
    fn save(&self, map: &ComponentMap) -> Result<()>;

    /// write a session log, returning where it went
    fn save_log(&self, log: &SessionLog) -> Result<String>;
}

/// json map file plus one `migration-log-<millis>.json` per run
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    map_file: PathBuf,
    log_dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(map_file: impl Into<PathBuf>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            map_file: map_file.into(),
            log_dir: log_dir.into(),
        }
    }
}

impl MapRepository for JsonFileRepository {
    fn load(&self) -> Result<ComponentMap> {
        if !self.map_file.exists() {
            return Err(CodemodError::MapNotFound(self.map_file.clone()).into());
        }
        let raw = fs::read_to_string(&self.map_file)
            .with_context(|| format!("failed to read {}", self.map_file.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse component map {}", self.map_file.display()))
    }

    fn save(&self, map: &ComponentMap) -> Result<()> {
        if let Some(parent) = self.map_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.map_file, json)
            .with_context(|| format!("failed to write {}", self.map_file.display()))
    }

    fn save_log(&self, log: &SessionLog) -> Result<String> {
        let millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
        fs::create_dir_all(&self.log_dir)
            .with_context(|| format!("failed to create {}", self.log_dir.display()))?;

        let path = self.log_dir.join(format!("migration-log-{millis}.json"));
        fs::write(&path, serde_json::to_string_pretty(log)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path.display().to_string())
    }
}

/// keeps everything in memory; used to exercise the orchestrator without disk state
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    map: RefCell<Option<ComponentMap>>,
    logs: RefCell<Vec<SessionLog>>,
    saves: Cell<usize>,
}

impl InMemoryRepository {
    pub fn with_map(map: ComponentMap) -> Self {
        Self {
            map: RefCell::new(Some(map)),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Option<ComponentMap> {
        self.map.borrow().clone()
    }

    pub fn logs(&self) -> Vec<SessionLog> {
        self.logs.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl MapRepository for InMemoryRepository {
    fn load(&self) -> Result<ComponentMap> {
        self.map
            .borrow()
            .clone()
            .ok_or_else(|| CodemodError::MapNotFound(PathBuf::from("<memory>")).into())
    }

    fn save(&self, map: &ComponentMap) -> Result<()> {
        *self.map.borrow_mut() = Some(map.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn save_log(&self, log: &SessionLog) -> Result<String> {
        let mut logs = self.logs.borrow_mut();
        logs.push(log.clone());
        Ok(format!("<memory>#{}", logs.len()))
    }
}
