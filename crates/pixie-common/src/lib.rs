pub mod defaults;
pub mod errors;
pub mod id;

pub use defaults::{DEFAULT_ENDPOINT, DEFAULT_HISTORY_WINDOW};
pub use errors::{ConfigError, PixieError};
pub use id::{new_id, SessionId, TurnId, TurnIdGenerator};

pub type Result<T> = std::result::Result<T, PixieError>;
