use crate::date::DateRange;
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    PubDate,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::PubDate => "pubDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title" => Ok(Field::Title),
            "description" => Ok(Field::Description),
            "pubDate" | "pubdate" => Ok(Field::PubDate),
            other => Err(SearchError::UnknownField(other.to_string())),
        }
    }
}

/// Anything a field can be named by when building a query.
pub trait IntoField {
    fn into_field(self) -> Result<Field>;
}

impl IntoField for Field {
    fn into_field(self) -> Result<Field> { Ok(self) }
}

impl IntoField for &str {
    fn into_field(self) -> Result<Field> { self.parse() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    Must,
    MustNot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseKind {
    /// Exact lookup of one already-normalized term.
    Term(String),
    Range(DateRange),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    field: Field,
    kind: ClauseKind,
    occur: Occur,
}

impl Clause {
    pub fn term(field: Field, term: impl Into<String>, occur: Occur) -> Result<Self> {
        if field == Field::PubDate {
            return Err(SearchError::FieldKind { field, expected: "term" });
        }
        Ok(Self { field, kind: ClauseKind::Term(term.into()), occur })
    }

    /// Publication-date range; always required, never negated.
    pub fn range(range: DateRange) -> Self {
        Self { field: Field::PubDate, kind: ClauseKind::Range(range), occur: Occur::Must }
    }

    pub fn field(&self) -> Field { self.field }
    pub fn kind(&self) -> &ClauseKind { &self.kind }
    pub fn occur(&self) -> Occur { self.occur }
}

/// A boolean query: an ordered, immutable list of clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<Clause>,
}

impl Query {
    pub fn new(clauses: Vec<Clause>) -> Self { Self { clauses } }

    pub fn builder() -> QueryBuilder { QueryBuilder::default() }

    pub fn clauses(&self) -> &[Clause] { &self.clauses }

    pub fn is_empty(&self) -> bool { self.clauses.is_empty() }
}

/// Collects clauses; the first invalid one is reported by [`QueryBuilder::build`].
#[derive(Debug, Default)]
pub struct QueryBuilder {
    clauses: Vec<Clause>,
    error: Option<SearchError>,
}

impl QueryBuilder {
    pub fn must(self, field: impl IntoField, term: impl Into<String>) -> Self {
        self.term(field, term, Occur::Must)
    }

    pub fn must_not(self, field: impl IntoField, term: impl Into<String>) -> Self {
        self.term(field, term, Occur::MustNot)
    }

    pub fn term(mut self, field: impl IntoField, term: impl Into<String>, occur: Occur) -> Self {
        if self.error.is_none() {
            match field.into_field().and_then(|f| Clause::term(f, term, occur)) {
                Ok(clause) => self.clauses.push(clause),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.clauses.push(Clause::range(range));
        self
    }

    pub fn build(self) -> Result<Query> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(Query::new(self.clauses)),
        }
    }
}

/// The parameters of one search call. Absent lists and dates contribute no clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub in_title: Option<Vec<String>>,
    pub not_in_title: Option<Vec<String>>,
    pub in_description: Option<Vec<String>>,
    pub not_in_description: Option<Vec<String>>,
    /// `YYYY-MM-DD`, inclusive.
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, inclusive of the whole day.
    pub end_date: Option<String>,
}

fn owned<I, S>(terms: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Some(terms.into_iter().map(Into::into).collect())
}

impl SearchRequest {
    pub fn new() -> Self { Self::default() }

    pub fn in_title<I: IntoIterator<Item = S>, S: Into<String>>(mut self, terms: I) -> Self {
        self.in_title = owned(terms);
        self
    }

    pub fn not_in_title<I: IntoIterator<Item = S>, S: Into<String>>(mut self, terms: I) -> Self {
        self.not_in_title = owned(terms);
        self
    }

    pub fn in_description<I: IntoIterator<Item = S>, S: Into<String>>(mut self, terms: I) -> Self {
        self.in_description = owned(terms);
        self
    }

    pub fn not_in_description<I: IntoIterator<Item = S>, S: Into<String>>(mut self, terms: I) -> Self {
        self.not_in_description = owned(terms);
        self
    }

    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Translate into a query. Dates are parsed first, so a malformed date fails
    /// before any clause exists.
    pub fn to_query(&self) -> Result<Query> {
        let range = if self.start_date.is_some() || self.end_date.is_some() {
            Some(DateRange::from_dates(self.start_date.as_deref(), self.end_date.as_deref())?)
        } else {
            None
        };

        let groups = [
            (Field::Title, Occur::Must, &self.in_title),
            (Field::Title, Occur::MustNot, &self.not_in_title),
            (Field::Description, Occur::Must, &self.in_description),
            (Field::Description, Occur::MustNot, &self.not_in_description),
        ];
        let mut builder = Query::builder();
        for (field, occur, terms) in groups {
            for term in terms.iter().flatten() {
                builder = builder.term(field, term.as_str(), occur);
            }
        }
        if let Some(range) = range {
            builder = builder.date_range(range);
        }
        builder.build()
    }
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lists = [
            ("in title", &self.in_title),
            ("not in title", &self.not_in_title),
            ("in description", &self.in_description),
            ("not in description", &self.not_in_description),
        ];
        let mut parts: Vec<String> = lists
            .iter()
            .filter_map(|&(label, terms)| terms.as_ref().map(|t| format!("{label}: [{}]", t.join(", "))))
            .collect();
        if let Some(start) = &self.start_date {
            parts.push(format!("startDate: {start}"));
        }
        if let Some(end) = &self.end_date {
            parts.push(format!("endDate: {end}"));
        }
        write!(f, "Search ({}):", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{parse_date, parse_end_date};

    #[test]
    fn parses_field_names() {
        assert_eq!("title".parse::<Field>().unwrap(), Field::Title);
        assert_eq!("pubdate".parse::<Field>().unwrap(), Field::PubDate);
        assert_eq!("author".parse::<Field>().unwrap_err(), SearchError::UnknownField("author".into()));
    }

    #[test]
    fn builder_reports_first_invalid_clause() {
        let err = Query::builder().must("title", "kim").must_not("body", "x").must("author", "y").build().unwrap_err();
        assert_eq!(err, SearchError::UnknownField("body".into()));

        let err = Query::builder().must(Field::PubDate, "2011").build().unwrap_err();
        assert!(matches!(err, SearchError::FieldKind { field: Field::PubDate, .. }));
    }

    #[test]
    fn request_keeps_clause_order() {
        let query = SearchRequest::new()
            .in_title(["kim", "korea"])
            .not_in_description(["canada"])
            .end_date("2011-12-18")
            .to_query()
            .unwrap();
        let c = query.clauses();
        assert_eq!(c.len(), 4);
        assert_eq!(c[0], Clause::term(Field::Title, "kim", Occur::Must).unwrap());
        assert_eq!(c[1], Clause::term(Field::Title, "korea", Occur::Must).unwrap());
        assert_eq!(c[2], Clause::term(Field::Description, "canada", Occur::MustNot).unwrap());
        let expected = DateRange::new(None, parse_end_date("2011-12-18").unwrap());
        assert_eq!(c[3], Clause::range(expected));
        assert_eq!(c[3].occur(), Occur::Must);
    }

    #[test]
    fn start_date_is_not_widened() {
        let query = SearchRequest::new().start_date("2000-01-01").to_query().unwrap();
        let expected = DateRange::new(Some(parse_date("2000-01-01").unwrap()), None);
        assert_eq!(query.clauses()[0].kind(), &ClauseKind::Range(expected));
    }

    #[test]
    fn bad_date_fails_the_request() {
        let err = SearchRequest::new().in_title(["kim"]).start_date("18.12.2011").to_query().unwrap_err();
        assert!(matches!(err, SearchError::DateFormat { .. }));
    }

    #[test]
    fn empty_request_has_no_clauses() {
        assert!(SearchRequest::new().to_query().unwrap().is_empty());
    }

    #[test]
    fn summary_line() {
        let req = SearchRequest::new().in_title(["us"]).not_in_title(["dawn"]).start_date("2000-01-01");
        assert_eq!(req.to_string(), "Search (in title: [us]; not in title: [dawn]; startDate: 2000-01-01):");
        assert_eq!(SearchRequest::new().to_string(), "Search ():");
    }

    #[test]
    fn deserializes_camel_case() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"inTitle":["video"],"startDate":"2000-01-01"}"#).unwrap();
        assert_eq!(req, SearchRequest::new().in_title(["video"]).start_date("2000-01-01"));
    }
}
