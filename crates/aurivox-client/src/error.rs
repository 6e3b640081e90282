use thiserror::Error;

use aurivox_dialog::DialogError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Dialog(#[from] DialogError),
    /// One or more context providers never answered the snapshot
    /// request.
    #[error("context providers did not answer within {timeout_ms}ms: {missing:?}")]
    ContextTimeout {
        timeout_ms: u128,
        missing: Vec<String>,
    },
}
