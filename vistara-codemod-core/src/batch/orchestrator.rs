// batch orchestrator - picks pending components and migrates them one at a time

use super::model::{
    ComponentMap, ComponentRecord, Complexity, MigrationFailure, MigrationStatus,
    MigrationSuccess, SessionLog,
};
use super::repository::MapRepository;
use crate::config::BatchConfig;
use crate::migrate::ComponentMigrator;
use anyhow::Result;
use chrono::Utc;
use console::style;
use indexmap::IndexMap;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// delay inserted between consecutive migrations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// a selected component, detached from the map
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub name: String,
    pub record: ComponentRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub percent: u32,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total: usize,
    pub completed: usize,
    pub by_category: IndexMap<String, Tally>,
    pub by_complexity: IndexMap<String, Tally>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextComponent {
    pub name: String,
    pub complexity: Complexity,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub timestamp: String,
    pub summary: ReportSummary,
    pub next_batch: Vec<NextComponent>,
}

pub struct BatchMigrator<R, M> {
    repository: R,
    migrator: M,
    config: BatchConfig,
    throttle: Throttle,
    map: ComponentMap,
    log: SessionLog,
}

impl<R: MapRepository, M: ComponentMigrator> BatchMigrator<R, M> {
    /// load the component map; a missing map is fatal
    pub fn new(repository: R, migrator: M, config: BatchConfig) -> Result<Self> {
        let map = repository.load()?;
        Ok(Self {
            throttle: config.throttle(),
            repository,
            migrator,
            config,
            map,
            log: SessionLog::start(),
        })
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn component_map(&self) -> &ComponentMap {
        &self.map
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.log
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// up to `count` pending entries, high priority first.
    ///
    /// the sort is stable, so equal priorities keep map order.
    pub fn select_batch(&self, count: usize) -> Vec<BatchEntry> {
        let mut pending = self.pending_where(|_| true);
        pending.sort_by_key(|entry| entry.record.priority);
        pending.truncate(count);
        pending
    }

    pub fn all_pending(&self) -> Vec<BatchEntry> {
        self.select_batch(usize::MAX)
    }

    pub fn select_by_category(&self, category: &str) -> Vec<BatchEntry> {
        self.pending_where(|record| record.category == category)
    }

    pub fn select_by_complexity(&self, complexity: Complexity) -> Vec<BatchEntry> {
        self.pending_where(|record| record.complexity == complexity)
    }

    fn pending_where(&self, keep: impl Fn(&ComponentRecord) -> bool) -> Vec<BatchEntry> {
        self.map
            .components
            .iter()
            .filter(|(_, record)| record.is_pending() && keep(record))
            .map(|(name, record)| BatchEntry {
                name: name.clone(),
                record: record.clone(),
            })
            .collect()
    }

    /// `<target_base>/<category folder>/<fileName>.jsx`, unknown categories land in `common`
    pub fn destination_for(&self, record: &ComponentRecord) -> PathBuf {
        let folder = self
            .config
            .categories
            .get(&record.category)
            .map(String::as_str)
            .unwrap_or("common");
        self.config
            .target_base
            .join(folder)
            .join(format!("{}.jsx", record.file_name))
    }

    pub fn source_for(&self, record: &ComponentRecord) -> PathBuf {
        self.config
            .source_base
            .join(record.path.trim_start_matches(['/', '\\']))
    }

    /// migrate entries strictly in order, then persist the map and the session log once.
    ///
    /// existing destinations are skipped and never touched. a failed entry stays
    /// pending and only shows up in the session log.
    pub async fn migrate_entries(&mut self, entries: &[BatchEntry]) -> Result<String> {
        println!(
            "\n{}\n",
            style(format!("🚀 starting batch migration of {} components...", entries.len())).cyan().bold()
        );

        let bar = ProgressBar::new(entries.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for (index, entry) in entries.iter().enumerate() {
            bar.set_message(entry.name.clone());
            let source = self.source_for(&entry.record);
            let destination = self.destination_for(&entry.record);

            if destination.exists() {
                bar.println(format!(
                    "{}",
                    style(format!("⏭️  skipping {} - already exists", entry.name)).yellow()
                ));
                self.log.skipped.push(entry.name.clone());
                bar.inc(1);
                continue;
            }

            bar.println(format!("{}", style(format!("🔄 migrating {}...", entry.name)).cyan()));
            match self.migrator.migrate(&source, &destination, &entry.name) {
                Ok(migrated) => {
                    bar.println(format!(
                        "{}",
                        style(format!("✅ migrated to: {}", migrated.destination.display())).green()
                    ));
                    if !migrated.class_hints.is_empty() {
                        bar.println("📋 tailwind classes found (need manual conversion):");
                        for hint in &migrated.class_hints {
                            bar.println(format!("   {hint}"));
                        }
                    }

                    self.log.successful.push(MigrationSuccess {
                        name: entry.name.clone(),
                        from: source.display().to_string(),
                        to: destination.display().to_string(),
                        complexity: entry.record.complexity,
                    });
                    if let Some(record) = self.map.components.get_mut(&entry.name) {
                        record.migration_status = MigrationStatus::Completed;
                        record.vistara_path = Some(destination.display().to_string());
                    }
                }
                Err(error) => {
                    bar.println(format!(
                        "{} {}",
                        style(format!("❌ error migrating {}:", entry.name)).red().bold(),
                        style(format!("{error:#}")).red()
                    ));
                    self.log.failed.push(MigrationFailure {
                        name: entry.name.clone(),
                        reason: format!("{error:#}"),
                    });
                }
            }
            bar.inc(1);

            if index + 1 < entries.len() {
                self.throttle.pause().await;
            }
        }
        bar.finish_and_clear();

        self.repository.save(&self.map)?;
        let location = self.repository.save_log(&self.log)?;
        println!("\n{}", style(format!("📄 migration log saved to: {location}")).dim());
        Ok(location)
    }

    pub fn progress(&self) -> Progress {
        let total = self.map.total();
        let completed = self.map.completed();
        let percent = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };

        Progress {
            total,
            completed,
            pending: total - completed,
            percent,
            successful: self.log.successful.len(),
            failed: self.log.failed.len(),
            skipped: self.log.skipped.len(),
        }
    }

    /// overall status plus the next `next` entries that would be picked
    pub fn report(&self, next: usize) -> MigrationReport {
        let mut by_category: IndexMap<String, Tally> = IndexMap::new();
        let mut by_complexity: IndexMap<String, Tally> = IndexMap::new();

        for record in self.map.components.values() {
            let done = usize::from(!record.is_pending());
            for tally in [
                by_category.entry(record.category.clone()).or_default(),
                by_complexity.entry(record.complexity.to_string()).or_default(),
            ] {
                tally.total += 1;
                tally.completed += done;
            }
        }

        MigrationReport {
            timestamp: Utc::now().to_rfc3339(),
            summary: ReportSummary {
                total: self.map.total(),
                completed: self.map.completed(),
                by_category,
                by_complexity,
            },
            next_batch: self
                .select_batch(next)
                .into_iter()
                .map(|entry| NextComponent {
                    name: entry.name,
                    complexity: entry.record.complexity,
                    category: entry.record.category,
                })
                .collect(),
        }
    }
}
