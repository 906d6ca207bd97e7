//! Validated identifier and timestamp types.

mod session_id;
mod stamp;
mod token_id;

pub use session_id::SessionId;
pub use stamp::CaptureStamp;
pub use token_id::TokenId;
