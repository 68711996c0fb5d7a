// batch module - sequential migration of components listed in the component map

pub mod model;
pub mod orchestrator;
pub mod repository;

pub use model::{
    ComponentMap, ComponentRecord, Complexity, MigrationFailure, MigrationStatus,
    MigrationSuccess, Priority, SessionLog,
};
pub use orchestrator::{BatchEntry, BatchMigrator, MigrationReport, Progress, Throttle};
pub use repository::{InMemoryRepository, JsonFileRepository, MapRepository};
