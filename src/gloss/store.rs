/*!
 * Shared vocabulary handle.
 *
 * Holds the current immutable vocabulary behind an `Arc` so translations can
 * take cheap snapshots, and supports an explicit cold reload from the sources.
 */

use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::errors::VocabularyError;

use super::vocabulary::{Vocabulary, VocabularySources};

/// Vocabulary store with cold reload support
pub struct VocabularyStore {
    /// Where the vocabulary is rebuilt from
    sources: VocabularySources,

    /// Current snapshot
    current: Arc<RwLock<Arc<Vocabulary>>>,
}

impl VocabularyStore {
    /// Build the vocabulary from its sources
    pub fn load(sources: VocabularySources) -> Result<Self, VocabularyError> {
        let vocabulary = Vocabulary::build(&sources)?;
        Ok(Self {
            sources,
            current: Arc::new(RwLock::new(Arc::new(vocabulary))),
        })
    }

    /// Current vocabulary; in-flight translations keep the snapshot they took
    pub fn snapshot(&self) -> Arc<Vocabulary> {
        self.current.read().clone()
    }

    /// Rebuild from the sources and swap it in.
    ///
    /// On failure the previous vocabulary stays active.
    pub fn reload(&self) -> Result<usize, VocabularyError> {
        let vocabulary = Vocabulary::build(&self.sources)?;
        let size = vocabulary.len();

        *self.current.write() = Arc::new(vocabulary);
        info!("Vocabulary reloaded: {} signs", size);

        Ok(size)
    }

    pub fn sources(&self) -> &VocabularySources {
        &self.sources
    }
}

impl Clone for VocabularyStore {
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            current: self.current.clone(),
        }
    }
}
