pub mod account;
pub mod backend;
pub mod config;
pub mod error;

pub use account::{Account, AccountStore, KvAccountStore};
pub use account::{CreateAccountResult, PasswordResult, UpdateResult};
pub use backend::memory::MemoryKv;
pub use config::StoreConfig;
pub use error::StoreError;
