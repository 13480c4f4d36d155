//! Game browser
//!
//! Lists the game files found in a directory, describes them and launches
//! them through the engine binary. The game files are only read as
//! free-form JSON here; nothing is loaded into the object graph.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use serde_json::Value;

use crate::core::{LudiError, Result};
use crate::loader::{GAME_SUFFIX, has_suffix, stem_without};

/// One game file found by a scan
#[derive(Debug, Clone)]
pub struct GameEntry {
    /// `name` field of the file, or the file name minus its suffix
    pub name: String,
    pub path: PathBuf,
    /// Parsed file contents
    pub data: Value,
}

impl GameEntry {
    fn read(path: PathBuf) -> anyhow::Result<Self> {
        let text = fs::read_to_string(&path)?;
        let data: Value = serde_json::from_str(&text)?;
        let name = data
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| stem_without(&path, GAME_SUFFIX));
        Ok(Self { name, path, data })
    }

    /// Human-readable description: name, file, scene list and other fields
    pub fn details(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Game: {}", self.name);
        let _ = writeln!(out, "File: {}", self.path.display());
        let _ = writeln!(out, "{}\n", "=".repeat(40));

        let Some(fields) = self.data.as_object() else {
            return out;
        };
        for (key, value) in fields {
            if key == "scenes" {
                out.push_str("Scenes:\n");
                let scenes = value.get("all_scenes").and_then(Value::as_array);
                for (i, scene) in scenes.into_iter().flatten().enumerate() {
                    let _ = writeln!(out, "  {}. {}", i + 1, display_value(scene));
                }
            } else {
                let _ = writeln!(out, "{key}: {}", display_value(value));
            }
        }
        out
    }

    /// Run `runner <game file>` and wait for it to exit
    ///
    /// # Errors
    ///
    /// `Io` if the runner cannot be spawned.
    pub fn launch(&self, runner: impl AsRef<Path>) -> Result<ExitStatus> {
        let runner = runner.as_ref();
        log::info!("Launching '{}' with {}", self.name, runner.display());

        let status = Command::new(runner)
            .arg(&self.path)
            .status()
            .map_err(|e| LudiError::from_io(runner, e))?;

        if status.success() {
            log::info!("Game '{}' exited successfully", self.name);
        } else {
            log::warn!("Game '{}' exited with {}", self.name, status);
        }
        Ok(status)
    }
}

/// Strings without their quotes, everything else as compact JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Games found in one directory
#[derive(Debug, Clone)]
pub struct GameCatalog {
    dir: PathBuf,
    entries: Vec<GameEntry>,
}

impl GameCatalog {
    /// Scan `dir` for game files
    ///
    /// Files that cannot be read or parsed are logged and left out.
    ///
    /// # Errors
    ///
    /// `NotFound` if `dir` does not exist, `Io` if it cannot be listed.
    pub fn scan(dir: impl Into<PathBuf>) -> Result<Self> {
        let mut catalog = Self {
            dir: dir.into(),
            entries: Vec::new(),
        };
        catalog.refresh()?;
        Ok(catalog)
    }

    /// Scan the directory again, replacing the current entries
    ///
    /// # Errors
    ///
    /// Same as [`GameCatalog::scan`]. On error the entries are left empty.
    pub fn refresh(&mut self) -> Result<usize> {
        self.entries.clear();

        if !self.dir.is_dir() {
            return Err(LudiError::NotFound {
                path: self.dir.clone(),
            });
        }

        let listing = fs::read_dir(&self.dir).map_err(|e| LudiError::from_io(&self.dir, e))?;
        let mut paths: Vec<PathBuf> = listing
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_suffix(p, GAME_SUFFIX))
            .collect();
        paths.sort();

        for path in paths {
            match GameEntry::read(path.clone()) {
                Ok(entry) => self.entries.push(entry),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        log::info!(
            "Found {} game(s) in {}",
            self.entries.len(),
            self.dir.display()
        );
        Ok(self.entries.len())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[GameEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&GameEntry> {
        self.entries.get(index)
    }

    /// First entry with the given display name
    pub fn find(&self, name: &str) -> Option<&GameEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
