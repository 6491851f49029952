use std::path::PathBuf;

use thiserror::Error;

pub mod accessors;
pub mod config_file;
pub mod lenient;
pub mod loader;
pub mod palette;
pub mod query;
pub mod record;
pub mod session;
pub mod stats;
pub mod view_model;

// Re-export for convenience
pub use loader::{DataSource, LoadedSet, load_source, parse_papers};
pub use palette::{DomainColor, DomainColors, Rgb, ThemeMode};
pub use query::{ActiveFilter, Facets, FilterKey, QueryState, SortKey, filter_and_sort};
pub use record::Paper;
pub use session::Session;
pub use stats::{Stats, YearRange};
pub use view_model::{DetailView, ListView, Tab};

/// Placeholder shown wherever a value is absent.
pub const PLACEHOLDER: &str = "\u{2014}";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a paper object or an array of papers, found {0}")]
    NotACollection(&'static str),
}
