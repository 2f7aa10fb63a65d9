//! Corpus loading: one JSON document holding the records of many subject
//! entities.
//!
//! ```json
//! { "@AmericanAir": [ { "user": {...}, "text": "...", ... }, ... ],
//!   "@united":      [ ... ] }
//! ```
//!
//! Records are kept raw until [`Corpus::records_for`] validates the subset
//! for a single entity, so a malformed record under one handle never blocks
//! ranking another.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::CorpusError;
use crate::record::{InteractionRecord, RawRecord};

/// Raw records grouped by subject entity handle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    entities: BTreeMap<String, Vec<RawRecord>>,
}

impl Corpus {
    /// Parse a corpus from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Parse`] if the input is not a JSON object of
    /// record arrays.
    pub fn from_reader(reader: impl Read) -> Result<Self, CorpusError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse a corpus from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Read`] if the file cannot be opened and
    /// [`CorpusError::Parse`] if its content is not a valid corpus.
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Self, CorpusError> {
        let file = File::open(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_reader(BufReader::new(file))?;
        debug!(entities = corpus.entities.len(), "corpus loaded");
        Ok(corpus)
    }

    /// Entity handles present in the corpus, sorted.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Number of raw records stored under `entity`, if present.
    #[must_use]
    pub fn record_count(&self, entity: &str) -> Option<usize> {
        self.entities.get(entity).map(Vec::len)
    }

    /// Validate and return the records for one entity, in corpus order.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::EntityNotFound`] for an unknown handle and
    /// [`CorpusError::Record`] for the first malformed record.
    pub fn records_for(&self, entity: &str) -> Result<Vec<InteractionRecord>, CorpusError> {
        let raw = self
            .entities
            .get(entity)
            .ok_or_else(|| CorpusError::EntityNotFound(entity.to_string()))?;

        raw.iter()
            .enumerate()
            .map(|(index, record)| {
                record.validate(index).map_err(|source| CorpusError::Record {
                    entity: entity.to_string(),
                    source,
                })
            })
            .collect()
    }
}
