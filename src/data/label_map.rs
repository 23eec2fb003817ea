use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

fn indexed_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)[\s:]+(\S.*)$").expect("valid label pattern"))
}

/// Class index to human readable label.
///
/// Each non-blank line is one label. A line that starts with a number uses
/// that number as its index (`"3 battery"`), any other line is indexed by
/// its 0-based position in the file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: BTreeMap<usize, String>,
}

impl LabelMap {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read label file {}", path.display()))?;
        let labels = Self::parse(&String::from_utf8_lossy(&bytes));
        log::debug!("Loaded {} labels from {}", labels.len(), path.display());
        Ok(labels)
    }

    pub fn parse(text: &str) -> Self {
        let mut labels = BTreeMap::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parsed = indexed_line()
                .captures(line)
                .and_then(|caps| Some((caps[1].parse::<usize>().ok()?, caps[2].trim().to_string())));
            let (index, label) = parsed.unwrap_or_else(|| (line_no, line.to_string()));
            labels.insert(index, label);
        }
        Self { labels }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(String::as_str)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.labels.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
