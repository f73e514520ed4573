use std::path::PathBuf;

use thiserror::Error;

pub mod binding;
pub mod filter;
pub mod host;
pub mod path;
pub mod popup;
pub mod record;
pub mod source;

// Re-export for convenience
pub use binding::{Binding, BindingDiff, FieldBindings, InputId};
pub use host::{InputHost, MemoryHost};
pub use path::FieldPath;
pub use popup::{
    Anchor, Bounds, CommitReport, FieldWrite, Key, KeyOutcome, LoadState, LoadTicket, NO_MATCHES,
    Point, PopupController, PopupRows, PopupView, RowView,
};
pub use record::{Record, RecordSet};
pub use source::SourceSpec;

/// Failure to fetch or parse a record source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("load cancelled")]
    Cancelled,
}
