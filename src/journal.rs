//! Append-only layout journal
//!
//! Every committed [`LayoutChange`] is written as one JSON object per line
//! to `~/.config/spooky-console/layout.jsonl`. Records are cached in memory
//! and written out every `flush_every` records, on [`LayoutJournal::flush`]
//! and when the journal is dropped.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::grid::LayoutChange;

/// One line of the journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Unix epoch milliseconds
    pub at: u64,
    /// Window the change happened in
    pub window: usize,
    #[serde(flatten)]
    pub change: LayoutChange,
}

impl JournalRecord {
    pub fn new(window: usize, change: LayoutChange) -> Self {
        Self {
            at: now_epoch_millis(),
            window,
            change,
        }
    }
}

fn now_epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Buffered writer for [`JournalRecord`]s
#[derive(Debug)]
pub struct LayoutJournal {
    path: PathBuf,
    flush_every: usize,
    cache: Vec<JournalRecord>,
    written: usize,
}

impl LayoutJournal {
    /// Journal at `path`, flushing once `flush_every` records are cached
    pub fn open(path: impl Into<PathBuf>, flush_every: usize) -> Self {
        Self {
            path: path.into(),
            flush_every: flush_every.max(1),
            cache: Vec::new(),
            written: 0,
        }
    }

    /// Journal at the default location in the config directory
    pub fn open_default(flush_every: usize) -> anyhow::Result<Self> {
        let path =
            crate::config_paths::journal_file().context("No config directory available")?;
        Ok(Self::open(path, flush_every))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records waiting to be written
    pub fn pending(&self) -> usize {
        self.cache.len()
    }

    /// Records written since the journal was opened
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn record(&mut self, window: usize, change: LayoutChange) -> anyhow::Result<()> {
        self.cache.push(JournalRecord::new(window, change));
        if self.cache.len() >= self.flush_every {
            self.flush()?;
        }
        Ok(())
    }

    pub fn record_all(
        &mut self,
        window: usize,
        changes: impl IntoIterator<Item = LayoutChange>,
    ) -> anyhow::Result<()> {
        for change in changes {
            self.record(window, change)?;
        }
        Ok(())
    }

    /// Append every cached record to the file
    pub fn flush(&mut self) -> anyhow::Result<()> {
        if self.cache.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open journal {}", self.path.display()))?;

        let mut buffer = String::new();
        for record in &self.cache {
            buffer.push_str(&serde_json::to_string(record)?);
            buffer.push('\n');
        }
        file.write_all(buffer.as_bytes())
            .with_context(|| format!("Failed to write journal {}", self.path.display()))?;

        tracing::debug!(
            records = self.cache.len(),
            "flushed layout journal to {}",
            self.path.display()
        );
        self.written += self.cache.len();
        self.cache.clear();
        Ok(())
    }

    /// Read back every record in the file, skipping lines that do not parse
    pub fn read(path: &Path) -> anyhow::Result<Vec<JournalRecord>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open journal {}", path.display()))?;
        let mut records = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping journal line {}: {}", number + 1, e),
            }
        }
        Ok(records)
    }
}

impl Drop for LayoutJournal {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush layout journal: {:#}", e);
        }
    }
}
