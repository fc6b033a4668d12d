use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::FoodItem;

/// Persists the full result set as one pretty-printed JSON array. Every
/// checkpoint rewrites the whole document — write to a sibling tmp file,
/// then rename over the target, so a crash mid-write never leaves a
/// truncated file. There is no resumption: the file is never read back.
pub struct Store {
    path: PathBuf,
    writes: usize,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: 0,
        }
    }

    pub fn checkpoint(&mut self, items: &[FoodItem]) -> Result<()> {
        // serde_json writes UTF-8 verbatim, so "Descrição" stays readable
        // in the output instead of \u-escaping.
        let json = serde_json::to_string_pretty(items).context("serializing result set")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        self.writes += 1;
        Ok(())
    }

    /// Number of completed checkpoint writes this run.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ── Tests ──
