//! Store traits implemented by `watchpost-store` backends.

mod token_store;
mod vault;

pub use token_store::TokenStore;
pub use vault::CaptureVault;
