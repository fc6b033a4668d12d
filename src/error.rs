use thiserror::Error;

/// Transport-level failure: the request never produced a usable HTML body.
/// Recoverable at per-page / per-item granularity; the listing walk treats it
/// as an implicit end-of-list signal (the site gives no way to tell a
/// transient failure from "past the last page").
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },
}

/// Structural mismatch on an otherwise-successful detail page. Yields an
/// item skip, never aborts the batch.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("nutrient table (id=\"tabela1\") not found")]
    MissingTable,
}

/// Everything that can go wrong with a single item, for one log line with
/// the reason attached.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}
