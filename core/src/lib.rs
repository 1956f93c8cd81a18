//! In-memory boolean search over a batch of feed documents.
//!
//! A batch is tokenized into per-field postings plus a sorted publication-date
//! table. Queries combine required and forbidden terms per field with an
//! inclusive date range; matching is set-based and unranked.

pub mod config;
pub mod date;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod searcher;
pub mod tokenizer;

pub type DocId = u32;
/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

pub use config::SearchConfig;
pub use date::{parse_date, DateRange};
pub use engine::{materialize, Hits, QueryEngine, DEFAULT_MAX_HITS};
pub use error::{Result, SearchError};
pub use index::{Document, FeedItem, Index};
pub use query::{Clause, ClauseKind, Field, Occur, Query, QueryBuilder, SearchRequest};
pub use searcher::{IndexHandle, Searcher};
pub use tokenizer::{tokenize, Tokenizer};
