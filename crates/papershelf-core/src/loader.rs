use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::LoadError;
use crate::record::Paper;

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` sources are fetched; anything else is a file path.
    pub fn parse(s: &str) -> Self {
        let lower = s.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(s.trim().to_string())
        } else {
            Self::File(PathBuf::from(s))
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// The deduplicated record set plus counters for what was dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct LoadedSet {
    pub papers: Vec<Paper>,
    /// Number of records overwritten by a later record with the same ID.
    pub duplicates: usize,
    /// Number of array entries that were not JSON objects.
    pub skipped: usize,
}

/// Fetch or read the dataset once. No retry.
pub async fn load_source(source: &DataSource) -> Result<LoadedSet, LoadError> {
    let text = match source {
        DataSource::Url(url) => {
            let resp = reqwest::get(url).await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(LoadError::Status(status.as_u16()));
            }
            resp.text().await?
        }
        DataSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?
        }
    };

    let set = parse_papers(&text)?;
    tracing::info!(
        source = %source.display(),
        papers = set.papers.len(),
        duplicates = set.duplicates,
        skipped = set.skipped,
        "loaded dataset"
    );
    Ok(set)
}

/// Parse a JSON document holding one paper object or an array of them.
pub fn parse_papers(text: &str) -> Result<LoadedSet, LoadError> {
    let raw: Value = serde_json::from_str(text)?;
    let entries = match raw {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        Value::Null => return Err(LoadError::NotACollection("null")),
        Value::Bool(_) => return Err(LoadError::NotACollection("a boolean")),
        Value::Number(_) => return Err(LoadError::NotACollection("a number")),
        Value::String(_) => return Err(LoadError::NotACollection("a string")),
    };

    let mut papers = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            tracing::warn!(position, "skipping dataset entry that is not an object");
            skipped += 1;
            continue;
        }
        // Every field is lenient, so an object always converts.
        match serde_json::from_value::<Paper>(entry) {
            Ok(paper) => papers.push(paper),
            Err(e) => {
                tracing::warn!(position, error = %e, "skipping unreadable dataset entry");
                skipped += 1;
            }
        }
    }

    let mut set = dedupe(papers);
    set.skipped = skipped;
    Ok(set)
}

/// Collapse duplicate IDs, last occurrence wins, and assign fallback IDs.
///
/// A surviving record sits where its last occurrence was, relative to the
/// other survivors.
pub fn dedupe(raw: Vec<Paper>) -> LoadedSet {
    let mut slots: Vec<Option<Paper>> = Vec::with_capacity(raw.len());
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut duplicates = 0;

    for mut paper in raw {
        if paper.paper_id.is_empty() {
            paper.paper_id = fallback_id();
        }
        if let Some(prev) = by_id.get(&paper.paper_id).copied() {
            tracing::warn!(paper_id = %paper.paper_id, "duplicate paper_id, last entry wins");
            duplicates += 1;
            slots[prev] = None;
        }
        by_id.insert(paper.paper_id.clone(), slots.len());
        slots.push(Some(paper));
    }

    LoadedSet {
        papers: slots.into_iter().flatten().collect(),
        duplicates,
        skipped: 0,
    }
}

/// Random base-36 identifier. Collisions are unlikely, not impossible.
fn fallback_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..11)
        .map(|_| char::from(ALPHABET[fastrand::usize(..ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::accessors;

    #[test]
    fn test_duplicate_last_wins() {
        let set = parse_papers(
            r#"[{"paper_id":"a","metadata":{"year":2020,"title":"X"}},
                {"paper_id":"a","metadata":{"year":2021,"title":"Y"}}]"#,
        )
        .unwrap();
        assert_eq!(set.papers.len(), 1);
        assert_eq!(set.duplicates, 1);
        assert_eq!(accessors::title(&set.papers[0]), "Y");
        assert_eq!(accessors::year(&set.papers[0]), Some(2021));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_duplicate_logs_a_warning() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let set = tracing::subscriber::with_default(subscriber, || {
            parse_papers(r#"[{"paper_id":"a"},{"paper_id":"b"},{"paper_id":"a"}]"#).unwrap()
        });
        assert_eq!(set.duplicates, 1);

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = output
            .lines()
            .filter(|l| l.contains("duplicate paper_id"))
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("WARN"));
        assert!(warnings[0].contains("paper_id=a"));
    }

    #[test]
    fn test_survivor_takes_position_of_last_occurrence() {
        let set = parse_papers(
            r#"[{"paper_id":"a"},{"paper_id":"b"},{"paper_id":"a","notes":"late"},{"paper_id":"c"}]"#,
        )
        .unwrap();
        let ids: Vec<&str> = set.papers.iter().map(|p| p.paper_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(set.papers[1].notes.as_deref(), Some("late"));
    }

    #[test]
    fn test_single_object_document() {
        let set = parse_papers(r#"{"paper_id":"solo"}"#).unwrap();
        assert_eq!(set.papers.len(), 1);
        assert_eq!(set.papers[0].paper_id, "solo");
    }

    #[test]
    fn test_missing_ids_get_fallbacks() {
        let set = parse_papers(r#"[{}, {"paper_id": ""}, {"paper_id": null}]"#).unwrap();
        assert_eq!(set.papers.len(), 3);
        for p in &set.papers {
            assert_eq!(p.paper_id.len(), 11);
            assert!(p.paper_id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let set = parse_papers(r#"[1, "x", {"paper_id":"ok"}, null]"#).unwrap();
        assert_eq!(set.papers.len(), 1);
        assert_eq!(set.skipped, 3);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(parse_papers("[{"), Err(LoadError::Parse(_))));
        assert!(matches!(
            parse_papers("42"),
            Err(LoadError::NotACollection(_))
        ));
    }

    #[test]
    fn test_data_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.org/data.json"),
            DataSource::Url("https://example.org/data.json".into())
        );
        assert_eq!(
            DataSource::parse("./data.json"),
            DataSource::File(PathBuf::from("./data.json"))
        );
    }
}
