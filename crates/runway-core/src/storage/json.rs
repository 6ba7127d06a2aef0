//! JSON snapshot files.

use crate::error::{Result, RunwayError};
use crate::model::ModelSnapshot;
use std::fs;
use std::path::Path;

/// Largest snapshot file we agree to read.
pub const MAX_SNAPSHOT_BYTES: u64 = 16 * 1_048_576; // 16 MiB

/// Largest period count a snapshot may declare (100 years of months).
pub const MAX_PERIODS: usize = 1200;

/// Read a snapshot from `path`.
pub fn parse_snapshot(path: &Path) -> Result<ModelSnapshot> {
    let meta = fs::metadata(path)?;
    if meta.len() > MAX_SNAPSHOT_BYTES {
        return Err(RunwayError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: snapshot too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SNAPSHOT_BYTES
            ),
        )));
    }
    let content = fs::read_to_string(path)?;
    parse_snapshot_content(&content)
}

/// Parse snapshot JSON. Rows come back in retrieval order.
pub fn parse_snapshot_content(content: &str) -> Result<ModelSnapshot> {
    let mut snapshot: ModelSnapshot = serde_json::from_str(content)?;
    if snapshot.model.num_periods > MAX_PERIODS {
        return Err(RunwayError::TooManyPeriods {
            count: snapshot.model.num_periods,
            max: MAX_PERIODS,
        });
    }
    snapshot.sort();
    Ok(snapshot)
}

/// Write a snapshot to `path`.
pub fn write_snapshot(path: &Path, snapshot: &ModelSnapshot) -> Result<()> {
    let content = write_snapshot_content(snapshot)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn write_snapshot_content(snapshot: &ModelSnapshot) -> Result<String> {
    let mut content = serde_json::to_string_pretty(snapshot)?;
    content.push('\n');
    Ok(content)
}
