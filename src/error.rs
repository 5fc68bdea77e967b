use std::time::Duration;
use thiserror::Error;

use crate::backend::KvError;

/// Infrastructure failures. Domain outcomes (login taken, wrong password,
/// record missing) never appear here; they travel in the operation's
/// result variant instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Backend call did not complete within {0:?}")]
    Timeout(Duration),
    #[error("Backend failure: {0}")]
    Backend(KvError),
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}
