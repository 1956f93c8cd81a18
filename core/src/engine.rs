use crate::error::Result;
use crate::index::Index;
use crate::query::{ClauseKind, Occur, Query};
use crate::DocId;
use std::collections::BTreeSet;

/// Default maximum number of hits returned per query.
pub const DEFAULT_MAX_HITS: usize = 100;

/// The outcome of evaluating a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hits {
    /// Matching ids in ascending order, at most `max_hits` of them.
    pub ids: Vec<DocId>,
    /// Number of matches before the cap was applied.
    pub total: usize,
    /// True when matches beyond the cap were dropped.
    pub truncated: bool,
}

/// Boolean evaluation of MUST / MUST_NOT clauses over one index generation.
///
/// There is no scoring: the cap keeps the lowest document ids, it does not pick
/// the best ones.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine {
    max_hits: usize,
}

impl Default for QueryEngine {
    fn default() -> Self { Self::new(DEFAULT_MAX_HITS) }
}

impl QueryEngine {
    pub fn new(max_hits: usize) -> Self {
        Self { max_hits: max_hits.max(1) }
    }

    pub fn max_hits(&self) -> usize { self.max_hits }

    pub fn evaluate(&self, query: &Query, index: &Index) -> Result<Hits> {
        let mut must: Vec<BTreeSet<DocId>> = Vec::new();
        let mut must_not: Vec<BTreeSet<DocId>> = Vec::new();
        for clause in query.clauses() {
            let docs = match clause.kind() {
                ClauseKind::Term(term) => index.terms_matching(clause.field(), term)?,
                ClauseKind::Range(range) => index.docs_in_range(range),
            };
            match clause.occur() {
                Occur::Must => must.push(docs),
                Occur::MustNot => must_not.push(docs),
            }
        }

        let candidates = if !must.is_empty() {
            intersect(must)
        } else if !must_not.is_empty() {
            index.all_ids()
        } else {
            // A query without clauses matches nothing.
            BTreeSet::new()
        };

        let excluded: BTreeSet<DocId> = must_not.into_iter().flatten().collect();
        let mut ids: Vec<DocId> = candidates.difference(&excluded).copied().collect();
        let total = ids.len();
        ids.truncate(self.max_hits);
        let truncated = total > ids.len();

        tracing::debug!(
            generation = index.generation(),
            clauses = query.clauses().len(),
            total,
            returned = ids.len(),
            truncated,
            "evaluated query"
        );
        Ok(Hits { ids, total, truncated })
    }
}

fn intersect(mut sets: Vec<BTreeSet<DocId>>) -> BTreeSet<DocId> {
    sets.sort_by_key(|s| s.len());
    let mut iter = sets.into_iter();
    let mut result = iter.next().unwrap_or_default();
    for set in iter {
        if result.is_empty() {
            break;
        }
        result.retain(|id| set.contains(id));
    }
    result
}

/// Titles of the given documents, in the given order. Duplicate titles are kept.
pub fn materialize(index: &Index, ids: &[DocId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| index.stored_fields(id))
        .map(|doc| doc.title.clone())
        .collect()
}
