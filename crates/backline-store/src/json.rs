//! # JSON File Store
//!
//! A [`RecordStore`] keeping one pretty-printed JSON file per collection
//! inside a data directory, plus a bare-number file for the cash float.
//!
//! Writes go to a `.tmp` sibling first and are committed with a rename,
//! so a crash mid-write leaves the previous file intact rather than a
//! truncated one.

use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use backline_core::Money;

use crate::error::StoreResult;
use crate::{Collection, RecordStore, INITIAL_FLOAT_KEY};

const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed record store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(JsonFileStore { dir })
    }

    /// Path of a collection's file.
    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.dir
            .join(format!("{}.{}", collection.key(), FILE_EXTENSION))
    }

    fn float_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", INITIAL_FLOAT_KEY, FILE_EXTENSION))
    }

    fn write_atomic(&self, path: &Path, payload: &str) -> StoreResult<()> {
        let tmp = tmp_path(path);
        {
            let mut file = File::create(&tmp)?;
            file.write_all(payload.as_bytes())?;
            file.flush()?;
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn get_all<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn replace_all<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> StoreResult<()> {
        let path = self.collection_path(collection);
        let payload = serde_json::to_string_pretty(records)?;
        self.write_atomic(&path, &payload)?;
        debug!(collection = collection.key(), records = records.len(), "collection replaced");
        Ok(())
    }

    fn initial_float(&self) -> StoreResult<Money> {
        let path = self.float_path();
        if !path.exists() {
            return Ok(Money::zero());
        }
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(raw.trim())?)
    }

    fn set_initial_float(&self, amount: Money) -> StoreResult<()> {
        let path = self.float_path();
        let payload = serde_json::to_string(&amount)?;
        self.write_atomic(&path, &payload)?;
        debug!(amount = %amount, "initial float replaced");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
