use anyhow::{Context, Result};
use feedsearch_core::{materialize, FeedItem, SearchConfig, SearchRequest, Searcher};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Load a document batch: a JSON array of items, or one JSON item per line.
pub fn load_documents(path: &Path) -> Result<Vec<FeedItem>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()));
    }
    let mut items = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() { continue; }
        let item: FeedItem = serde_json::from_str(line)
            .with_context(|| format!("parsing {} line {}", path.display(), lineno + 1))?;
        items.push(item);
    }
    Ok(items)
}

/// Load search requests from a JSON array.
pub fn load_requests(path: &Path) -> Result<Vec<SearchRequest>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// The fixed demonstration sequence run when no query file is given.
pub fn demo_requests() -> Vec<SearchRequest> {
    vec![
        SearchRequest::new().in_title(["kim", "korea"]),
        SearchRequest::new().in_title(["kim"]).not_in_description(["korea"]),
        SearchRequest::new()
            .in_title(["us"])
            .not_in_title(["dawn"])
            .in_description(["american", "confession"]),
        SearchRequest::new().start_date("2011-12-18").end_date("2011-12-18"),
        SearchRequest::new().in_title(["video"]).start_date("2000-01-01"),
        SearchRequest::new().not_in_description(["canada", "iraq", "israel"]).end_date("2011-12-18"),
    ]
}

/// Alphabetical, numbered listing; ` no results` when empty.
pub fn render_results(results: &[String]) -> String {
    if results.is_empty() {
        return " no results\n".to_string();
    }
    let mut sorted = results.to_vec();
    sorted.sort();
    sorted
        .iter()
        .enumerate()
        .map(|(i, title)| format!(" {}. {}\n", i + 1, title))
        .collect()
}

/// Index the batch at `input`, then print each request summary and its results.
///
/// Every request is turned into a query before anything is indexed or printed,
/// so one malformed request fails the run with no partial output.
pub fn run(config: &SearchConfig, input: &Path, requests: &[SearchRequest], out: &mut impl Write) -> Result<()> {
    let queries = requests
        .iter()
        .enumerate()
        .map(|(i, request)| request.to_query().with_context(|| format!("search request {}: {request}", i + 1)))
        .collect::<Result<Vec<_>>>()?;

    let docs = load_documents(input)?;
    let searcher = Searcher::with_config(config);
    searcher.index(docs).with_context(|| format!("indexing {}", input.display()))?;

    let index = searcher.snapshot();
    for (request, query) in requests.iter().zip(&queries) {
        writeln!(out, "{request}")?;
        let hits = searcher.engine().evaluate(query, &index)?;
        if hits.truncated {
            tracing::warn!(total = hits.total, shown = hits.ids.len(), "results truncated");
        }
        let titles = materialize(&index, &hits.ids);
        out.write_all(render_results(&titles).as_bytes())?;
    }
    Ok(())
}
