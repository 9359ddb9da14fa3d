//! Caught-set persistence: a single JSON array of entry ids in the platform
//! data directory. Loading is tolerant — absent or malformed data yields the
//! empty set — and every toggle overwrites the whole file (last writer wins).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::state::DEX_TOTAL;

const APP_DIR: &str = "livingdex";
const CAUGHT_FILE: &str = "caught.json";

/// Durable location of the caught set; `data_dir` overrides the platform
/// default (used by the `--data-dir` flag and by tests).
pub fn caught_file_path(data_dir: Option<&Path>) -> PathBuf {
    let base = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs_next::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR),
    };
    base.join(CAUGHT_FILE)
}

/// Decode persisted ids. Never errors: garbage decodes to the empty set, and
/// ids outside `[1, total]` are discarded.
pub fn decode(json: &str, total: u16) -> HashSet<u16> {
    let ids: Vec<u16> = serde_json::from_str(json).unwrap_or_default();
    ids.into_iter()
        .filter(|id| (1..=total).contains(id))
        .collect()
}

/// Encode a caught set as a sorted JSON id array.
pub fn encode(ids: &HashSet<u16>) -> String {
    let mut sorted: Vec<u16> = ids.iter().copied().collect();
    sorted.sort_unstable();
    serde_json::to_string(&sorted).unwrap_or_else(|_| "[]".to_string())
}

pub async fn load(path: &Path) -> HashSet<u16> {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => decode(&json, DEX_TOTAL),
        Err(_) => HashSet::new(),
    }
}

/// Whole-value overwrite. Callers treat this as fire-and-forget; the error is
/// surfaced only so tests can observe it.
pub async fn save(path: &Path, ids: Vec<u16>) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|error| format!("create {}: {error}", parent.display()))?;
    }
    let set: HashSet<u16> = ids.into_iter().collect();
    tokio::fs::write(path, encode(&set))
        .await
        .map_err(|error| format!("write {}: {error}", path.display()))
}
