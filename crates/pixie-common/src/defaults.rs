//! Defaults shared by the config file schema and the AI client.

/// Chat-completions endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Number of prior turns replayed to the model on every send.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;
