use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay event loop is no longer running")]
    Closed,
}
