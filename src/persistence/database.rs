use crate::domain::{MainTask, Project, SubTask};
use crate::persistence::files::{atomic_write, read_file};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The full on-disk snapshot: every record the store holds.
/// Vectors keep insertion order, which is what tie-breaking sorts rely on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub main_tasks: Vec<MainTask>,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
}

/// Load the database from a snapshot file, empty if the file doesn't exist
pub fn load_database<P: AsRef<Path>>(path: P) -> Result<Database> {
    let content = read_file(path.as_ref())?;
    if content.is_empty() {
        return Ok(Database::default());
    }

    let db: Database = serde_json::from_str(&content).with_context(|| {
        format!("Failed to parse database file: {}", path.as_ref().display())
    })?;
    Ok(db)
}

/// Save the database to a snapshot file atomically
pub fn save_database<P: AsRef<Path>>(path: P, db: &Database) -> Result<()> {
    let json = serde_json::to_string_pretty(db).context("Failed to serialize database")?;
    atomic_write(path, &json)?;
    Ok(())
}
