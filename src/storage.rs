//! File-based persistence slot for the cart.
//!
//! The slot is a single JSON file holding the serialized line collection.
//! Writes are atomic via a temp-rename pattern to prevent corruption from
//! crashes mid-write. The slot is a cache of the authoritative in-memory
//! state, never an authority of its own: a payload that fails to parse or
//! violates a cart invariant is discarded whole.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::CartLine, items::Item};

/// Conventional file name for the cart slot inside a storage directory.
const SLOT_FILE: &str = "cart.json";

/// Errors that can occur while accessing the persistence slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing the slot file.
    #[error("failed to access cart slot: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error writing the slot payload.
    #[error("failed to serialize cart slot payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One persisted cart line: the item snapshot fields plus the quantity.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLine {
    id: String,
    name: String,
    price: Decimal,
    toppings: Vec<String>,
    quantity: u32,
}

impl From<&CartLine> for StoredLine {
    fn from(line: &CartLine) -> Self {
        let item = line.item();

        Self {
            id: item.id().to_string(),
            name: item.name().to_string(),
            price: item.price(),
            toppings: item.toppings().to_vec(),
            quantity: line.quantity(),
        }
    }
}

impl From<StoredLine> for CartLine {
    fn from(stored: StoredLine) -> Self {
        CartLine::new(
            Item::new(stored.id, stored.name, stored.price, stored.toppings),
            stored.quantity,
        )
    }
}

/// The single named key-value entry the cart persists into.
#[derive(Debug, Clone)]
pub struct CartSlot {
    path: PathBuf,
}

impl CartSlot {
    /// Creates a slot at an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a slot at the conventional `cart.json` inside `dir`.
    #[must_use]
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SLOT_FILE),
        }
    }

    /// Returns the path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the full line collection to the slot atomically.
    ///
    /// Writes to `<slot>.tmp` in the same directory and renames it into
    /// place, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if directory creation, serialization,
    /// writing, or renaming fails.
    pub fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let stored: Vec<StoredLine> = lines.iter().map(StoredLine::from).collect();
        let json = serde_json::to_vec_pretty(&stored)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Reads the line collection back from the slot.
    ///
    /// Returns `Ok(None)` when the slot file does not exist. A payload that
    /// fails to parse, or that violates a cart invariant (duplicate item id,
    /// zero quantity, negative price), is treated whole as malformed: a
    /// warning is logged and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] only for unexpected IO failures (e.g.
    /// permission denied).
    pub fn load(&self) -> Result<Option<Vec<CartLine>>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: Vec<StoredLine> = match serde_json::from_slice(&bytes) {
            Ok(stored) => stored,
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "malformed cart slot payload; treating as empty"
                );
                return Ok(None);
            }
        };

        if let Some(violation) = invariant_violation(&stored) {
            tracing::warn!(
                path = %self.path.display(),
                violation,
                "cart slot payload violates a cart invariant; treating as empty"
            );
            return Ok(None);
        }

        Ok(Some(stored.into_iter().map(CartLine::from).collect()))
    }

    /// Removes the slot file. A missing file is fine.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] for IO failures other than the file being
    /// absent.
    pub fn clear_slot(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Checks a persisted payload against the cart invariants, returning the
/// first violation found.
fn invariant_violation(stored: &[StoredLine]) -> Option<&'static str> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for line in stored {
        if !seen.insert(line.id.as_str()) {
            return Some("duplicate item id");
        }

        if line.quantity == 0 {
            return Some("zero quantity");
        }

        if line.price < Decimal::ZERO {
            return Some("negative price");
        }
    }

    None
}
