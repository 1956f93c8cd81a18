use crate::date::{to_timestamp, DateRange};
use crate::error::{Result, SearchError};
use crate::query::Field;
use crate::tokenizer::Tokenizer;
use crate::{DocId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use time::OffsetDateTime;

/// One item of an incoming batch, as handed over by the feed reader.
///
/// Every field is required; absent ones are reported by [`Index::build`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "pubDate", with = "time::serde::rfc3339::option")]
    pub pub_date: Option<OffsetDateTime>,
}

impl FeedItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>, pub_date: OffsetDateTime) -> Self {
        Self { title: Some(title.into()), description: Some(description.into()), pub_date: Some(pub_date) }
    }
}

/// A document as stored in an index generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub description: String,
    #[serde(rename = "pubDate", with = "time::serde::rfc3339")]
    pub pub_date: OffsetDateTime,
}

/// Term -> ids of the documents containing it, ascending and without duplicates.
pub type Postings = HashMap<String, Vec<DocId>>;

/// An immutable index generation.
#[derive(Debug, Default)]
pub struct Index {
    pub(crate) generation: u64,
    title: Postings,
    description: Postings,
    /// `(pubDate, id)` sorted by timestamp, then id.
    pub_dates: Vec<(Timestamp, DocId)>,
    docs: Vec<Document>,
}

impl Index {
    pub fn empty() -> Self { Self::default() }

    /// Index a whole batch. Ids are assigned in batch order starting at 0.
    ///
    /// The batch is validated before anything is indexed: one incomplete item
    /// fails the entire build.
    pub fn build<I>(items: I, tokenizer: &Tokenizer) -> Result<Self>
    where
        I: IntoIterator<Item = FeedItem>,
    {
        let mut docs = Vec::new();
        for (position, item) in items.into_iter().enumerate() {
            let title = item.title.ok_or(SearchError::MissingField { position, field: "title" })?;
            let description = item.description.ok_or(SearchError::MissingField { position, field: "description" })?;
            let pub_date = item.pub_date.ok_or(SearchError::MissingField { position, field: "pubDate" })?;
            let id = DocId::try_from(position).map_err(|_| SearchError::BatchTooLarge(position))?;
            docs.push(Document { id, title, description, pub_date });
        }

        let mut title: Postings = HashMap::new();
        let mut description: Postings = HashMap::new();
        let mut pub_dates = Vec::with_capacity(docs.len());
        for doc in &docs {
            add_postings(&mut title, tokenizer.tokenize(&doc.title), doc.id);
            add_postings(&mut description, tokenizer.tokenize(&doc.description), doc.id);
            pub_dates.push((to_timestamp(doc.pub_date), doc.id));
        }
        pub_dates.sort_unstable();

        Ok(Self { generation: 0, title, description, pub_dates, docs })
    }

    pub fn generation(&self) -> u64 { self.generation }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn num_terms(&self, field: Field) -> usize {
        self.postings(field).map_or(0, HashMap::len)
    }

    fn postings(&self, field: Field) -> Option<&Postings> {
        match field {
            Field::Title => Some(&self.title),
            Field::Description => Some(&self.description),
            Field::PubDate => None,
        }
    }

    /// Documents containing exactly `term` in `field`. Unknown terms match nothing.
    pub fn terms_matching(&self, field: Field, term: &str) -> Result<BTreeSet<DocId>> {
        let postings = self
            .postings(field)
            .ok_or(SearchError::FieldKind { field, expected: "term" })?;
        Ok(postings.get(term).map(|ids| ids.iter().copied().collect()).unwrap_or_default())
    }

    /// Documents whose publication time lies in the inclusive range.
    pub fn docs_in_range(&self, range: &DateRange) -> BTreeSet<DocId> {
        let lo = match range.start {
            Some(start) => self.pub_dates.partition_point(|&(ts, _)| ts < start),
            None => 0,
        };
        let hi = match range.end {
            Some(end) => self.pub_dates.partition_point(|&(ts, _)| ts <= end),
            None => self.pub_dates.len(),
        };
        if lo >= hi {
            return BTreeSet::new();
        }
        self.pub_dates[lo..hi].iter().map(|&(_, id)| id).collect()
    }

    pub fn stored_fields(&self, id: DocId) -> Option<&Document> {
        self.docs.get(id as usize)
    }

    pub fn all_ids(&self) -> BTreeSet<DocId> {
        self.docs.iter().map(|d| d.id).collect()
    }
}

fn add_postings(postings: &mut Postings, terms: Vec<String>, id: DocId) {
    for term in terms {
        let ids = postings.entry(term).or_default();
        if ids.last() != Some(&id) {
            ids.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> Index {
        let items = vec![
            FeedItem::new("Kim visits Korea", "A summit.", datetime!(2011-12-18 10:00 UTC)),
            FeedItem::new("Weather report", "Cold in Canada, cold everywhere", datetime!(2011-12-01 08:30 UTC)),
            FeedItem::new("Korea weather", "Snow", datetime!(2011-12-10 00:00 UTC)),
        ];
        Index::build(items, &Tokenizer::new()).unwrap()
    }

    #[test]
    fn assigns_sequential_ids() {
        let index = sample();
        assert_eq!(index.num_docs(), 3);
        assert_eq!(index.all_ids().into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(index.stored_fields(2).unwrap().title, "Korea weather");
        assert!(index.stored_fields(3).is_none());
    }

    #[test]
    fn postings_are_field_scoped_and_deduplicated() {
        let index = sample();
        assert_eq!(index.terms_matching(Field::Title, "korea").unwrap(), BTreeSet::from([0, 2]));
        assert!(index.terms_matching(Field::Description, "korea").unwrap().is_empty());
        assert_eq!(index.description.get("cold"), Some(&vec![1]));
        assert!(index.terms_matching(Field::Title, "Korea").unwrap().is_empty());
    }

    #[test]
    fn term_lookup_on_date_field_is_rejected() {
        let err = sample().terms_matching(Field::PubDate, "2011").unwrap_err();
        assert_eq!(err, SearchError::FieldKind { field: Field::PubDate, expected: "term" });
    }

    #[test]
    fn range_lookup_uses_sorted_dates() {
        let index = sample();
        let dec10 = to_timestamp(datetime!(2011-12-10 00:00 UTC));
        let dec18 = to_timestamp(datetime!(2011-12-18 10:00 UTC));
        assert_eq!(index.docs_in_range(&DateRange::new(Some(dec10), None)), BTreeSet::from([0, 2]));
        assert_eq!(index.docs_in_range(&DateRange::new(None, Some(dec10))), BTreeSet::from([1, 2]));
        assert_eq!(index.docs_in_range(&DateRange::new(Some(dec18), Some(dec18))), BTreeSet::from([0]));
        assert!(index.docs_in_range(&DateRange::new(Some(dec18), Some(dec10))).is_empty());
        assert_eq!(index.docs_in_range(&DateRange::default()).len(), 3);
    }

    #[test]
    fn incomplete_item_fails_whole_build() {
        let items = vec![
            FeedItem::new("ok", "fine", datetime!(2011-12-18 00:00 UTC)),
            FeedItem { title: Some("no date".into()), description: Some("x".into()), pub_date: None },
        ];
        let err = Index::build(items, &Tokenizer::new()).unwrap_err();
        assert_eq!(err, SearchError::MissingField { position: 1, field: "pubDate" });
    }

    #[test]
    fn deserializes_feed_items() {
        let item: FeedItem = serde_json::from_str(
            r#"{"title":"Kim visits Korea","description":"A summit.","pubDate":"2011-12-18T09:30:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(item.pub_date, Some(datetime!(2011-12-18 09:30 +2)));
        let partial: FeedItem = serde_json::from_str(r#"{"title":"only a title"}"#).unwrap();
        assert!(partial.description.is_none() && partial.pub_date.is_none());
    }
}
