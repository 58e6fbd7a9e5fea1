mod avatar;
mod chat;
mod cli;
mod render;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use pixie_ai::{OpenAiClient, OpenAiConfig, Session};
use pixie_common::PixieError;
use pixie_config::PixieConfig;
use tracing_subscriber::EnvFilter;

use crate::avatar::{check_avatars, resolve_avatar};
use crate::render::ChatView;

/// Exit status when the chat cannot open because no API key is configured.
const EXIT_CONFIG_REQUIRED: u8 = 2;

/// Load environment variables from a .env file (KEY=VALUE lines).
/// Variables already set in the environment win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

/// Directive used when the configured one does not parse.
const DEFAULT_LOG_FILTER: &str = "pixie=info";

fn log_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("pixie: invalid log filter {directive:?} ({e}), using {DEFAULT_LOG_FILTER}");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter(directive)),
        )
        .init();
}

fn client_config(config: &PixieConfig, api_key: String) -> OpenAiConfig {
    let api = &config.api;
    OpenAiConfig::new(api_key)
        .with_endpoint(&api.endpoint)
        .with_model(&api.model)
        .with_max_tokens(api.max_tokens)
        .with_temperature(api.temperature)
        .with_penalties(api.presence_penalty, api.frequency_penalty)
        .with_top_p(api.top_p)
        .with_timeouts(
            Duration::from_secs(api.connect_timeout_secs.into()),
            Duration::from_secs(api.timeout_secs.into()),
        )
}

async fn chat_view(config: &PixieConfig) -> ChatView {
    let profile = &config.profile;
    let http = reqwest::Client::new();

    let (assistant_loaded, user_loaded) = check_avatars(
        &http,
        profile.assistant_avatar_url.as_deref(),
        profile.user_avatar_url.as_deref(),
    )
    .await;

    ChatView {
        assistant_name: profile.assistant_name.clone(),
        assistant_avatar: resolve_avatar(
            profile.assistant_avatar_url.as_deref(),
            assistant_loaded,
            Some(&profile.assistant_name),
        ),
        user_avatar: resolve_avatar(
            profile.user_avatar_url.as_deref(),
            user_loaded,
            profile.user_name.as_deref(),
        ),
    }
}

async fn run(
    args: cli::Args,
    config: PixieConfig,
    api_key: String,
) -> pixie_common::Result<ExitCode> {
    let client = OpenAiClient::new(client_config(&config, api_key))
        .map_err(|e| PixieError::Ai(e.to_string()))?;
    let model = client.config().model.clone();
    let endpoint = client.config().endpoint.clone();
    let session = Arc::new(
        Session::new(Arc::new(client)).with_history_window(config.chat.history_window),
    );
    tracing::info!(
        session = %session.id(),
        %model,
        %endpoint,
        window = session.history_window(),
        "Session started"
    );

    let view = chat_view(&config).await;

    match args.message {
        Some(text) => {
            let result = chat::exchange(&session, &view, text).await?;
            Ok(if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            chat::run(session, &view).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();

    let args = cli::parse();

    let loaded = pixie_config::load_config(args.config.as_deref());
    let directive = args.log_level.clone().unwrap_or_else(|| match &loaded {
        Ok(config) => config.logging.level.clone(),
        Err(_) => DEFAULT_LOG_FILTER.to_string(),
    });
    init_logging(&directive);

    tracing::info!("Pixie v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        PixieConfig::default()
    });

    let api_key = match pixie_config::api_key_from_env() {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!("{e}");
            println!("{}", render::config_required(pixie_config::API_KEY_ENV));
            return ExitCode::from(EXIT_CONFIG_REQUIRED);
        }
    };

    match run(args, config, api_key).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("pixie: {e}");
            ExitCode::FAILURE
        }
    }
}
