//! Account-record store.
//!
//! - Contract: the five operations and their closed result variants
//! - Engine: one conditional backend call per operation, timeout-bounded
//! - Codec: account record <-> backend attribute map

pub mod codec;
pub mod engine;
pub mod store;
pub mod types;

pub use engine::KvAccountStore;
pub use store::AccountStore;
pub use types::{Account, CreateAccountResult, PasswordResult, UpdateResult};
