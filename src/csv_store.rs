use csv::ReaderBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::coerce::RawHolding;
use crate::domain::models::Holding;
use crate::domain::repository::{HoldingsRepo, RepoResult};
use crate::errors::StoreError;

// Holdings fixture on disk, JSON array or CSV with camelCase headers
pub struct FileHoldingsStore {
    path: PathBuf,
}

impl FileHoldingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HoldingsRepo for FileHoldingsStore {
    fn load_holdings(&self) -> RepoResult<Vec<Holding>> {
        read_holdings(&self.path)
    }
}

pub fn read_holdings(path: &Path) -> RepoResult<Vec<Holding>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let raw = match extension.as_deref() {
        Some("json") => read_raw_json(path)?,
        Some("csv") => read_raw_csv(path)?,
        _ => return Err(StoreError::UnsupportedFormat(path.display().to_string())),
    };
    debug!(path = %path.display(), records = raw.len(), "Read raw holdings");
    into_holdings(raw)
}

fn read_raw_json(path: &Path) -> RepoResult<Vec<RawHolding>> {
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn read_raw_csv(path: &Path) -> RepoResult<Vec<RawHolding>> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: RawHolding = result?;
        records.push(record);
    }
    Ok(records)
}

/// Coerces every raw record and enforces unique symbols.
pub fn into_holdings(raw: Vec<RawHolding>) -> RepoResult<Vec<Holding>> {
    let mut seen = HashSet::new();
    let mut holdings = Vec::with_capacity(raw.len());
    for record in raw {
        let holding = Holding::try_from(record)?;
        if !seen.insert(holding.symbol.clone()) {
            return Err(StoreError::DuplicateSymbol(holding.symbol));
        }
        holdings.push(holding);
    }
    Ok(holdings)
}
