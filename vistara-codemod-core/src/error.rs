// error conditions callers need to tell apart from plain i/o failures

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodemodError {
    /// the scan or convert root does not exist
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// the persisted component map is missing; the batch run cannot start
    #[error("component map not found: {} (run `vistara-codemod inventory` first)", .0.display())]
    MapNotFound(PathBuf),
}
