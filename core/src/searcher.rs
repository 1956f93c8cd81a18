use crate::config::SearchConfig;
use crate::engine::{materialize, Hits, QueryEngine};
use crate::error::Result;
use crate::index::{FeedItem, Index};
use crate::query::{Query, SearchRequest};
use crate::tokenizer::Tokenizer;
use parking_lot::RwLock;
use std::sync::Arc;

/// Publishes index generations. Readers take a snapshot and keep it for the
/// whole query; a writer swaps in a generation that is already complete.
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<Index>>,
}

impl Default for IndexHandle {
    fn default() -> Self {
        Self { current: RwLock::new(Arc::new(Index::empty())) }
    }
}

impl IndexHandle {
    pub fn new() -> Self { Self::default() }

    pub fn snapshot(&self) -> Arc<Index> {
        self.current.read().clone()
    }

    /// Replace the current generation, numbering the new one after it.
    pub fn install(&self, mut index: Index) -> Arc<Index> {
        let mut current = self.current.write();
        index.generation = current.generation + 1;
        let installed = Arc::new(index);
        *current = installed.clone();
        installed
    }
}

/// Builds index generations and answers searches against the current one.
#[derive(Debug, Default)]
pub struct Searcher {
    tokenizer: Tokenizer,
    engine: QueryEngine,
    handle: IndexHandle,
}

impl Searcher {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: &SearchConfig) -> Self {
        let tokenizer = if config.english_stopwords { Tokenizer::with_english_stopwords() } else { Tokenizer::new() };
        Self { tokenizer, engine: QueryEngine::new(config.max_hits), handle: IndexHandle::new() }
    }

    pub fn tokenizer(&self) -> &Tokenizer { &self.tokenizer }

    pub fn engine(&self) -> &QueryEngine { &self.engine }

    pub fn snapshot(&self) -> Arc<Index> { self.handle.snapshot() }

    /// Index a batch as a new generation. On error the previous generation stays
    /// current.
    pub fn index<I>(&self, items: I) -> Result<Arc<Index>>
    where
        I: IntoIterator<Item = FeedItem>,
    {
        let index = match Index::build(items, &self.tokenizer) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(error = %e, "rejected document batch");
                return Err(e);
            }
        };
        let installed = self.handle.install(index);
        tracing::info!(
            generation = installed.generation(),
            num_docs = installed.num_docs(),
            title_terms = installed.num_terms(crate::Field::Title),
            description_terms = installed.num_terms(crate::Field::Description),
            "installed index generation"
        );
        Ok(installed)
    }

    pub fn query(&self, query: &Query) -> Result<Hits> {
        self.engine.evaluate(query, &self.handle.snapshot())
    }

    /// Matching ids for a request, capped, ascending.
    pub fn search_ids(&self, request: &SearchRequest) -> Result<Hits> {
        let query = request.to_query()?;
        self.query(&query)
    }

    /// Titles of the documents matching a request.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<String>> {
        let query = request.to_query()?;
        let index = self.handle.snapshot();
        let hits = self.engine.evaluate(&query, &index)?;
        Ok(materialize(&index, &hits.ids))
    }
}
