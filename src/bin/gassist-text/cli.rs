use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use gassist_text::consts::{ASSISTANT_API_ENDPOINT, DEFAULT_GRPC_DEADLINE};
use gassist_text::Config;
use tracing::Level;

/// Talk to the Google Assistant from a terminal, one line per query.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Host of the Assistant API, or a full http(s):// URI.
    #[arg(
        long,
        env = "GASSIST_API_ENDPOINT",
        value_name = "api endpoint",
        default_value = ASSISTANT_API_ENDPOINT
    )]
    pub api_endpoint: String,

    /// OAuth2 credentials file. Defaults to the one saved by google-oauthlib-tool.
    #[arg(long, env = "GASSIST_CREDENTIALS", value_name = "credentials")]
    pub credentials: Option<PathBuf>,

    /// Device model id registered for this project.
    #[arg(
        long,
        env = "GASSIST_DEVICE_MODEL_ID",
        value_name = "device model id",
        default_value = "default"
    )]
    pub device_model_id: String,

    /// Device instance id.
    #[arg(long, env = "GASSIST_DEVICE_ID", value_name = "device id", default_value = "default")]
    pub device_id: String,

    /// Conversation language, e.g. en-US.
    #[arg(long, env = "GASSIST_LANG", value_name = "language code", default_value = "en-US")]
    pub lang: String,

    /// Request HTML screen outs and open them in the browser.
    #[arg(long)]
    pub display: bool,

    /// Request MP3 audio and open it in the system player.
    #[arg(long, alias = "audio_out")]
    pub audio_out: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Per-turn deadline in seconds.
    #[arg(
        long,
        env = "GASSIST_GRPC_DEADLINE",
        value_name = "grpc deadline",
        default_value_t = DEFAULT_GRPC_DEADLINE.as_secs()
    )]
    pub grpc_deadline: u64,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    pub fn credentials_path(&self) -> Option<PathBuf> {
        self.credentials
            .clone()
            .or_else(gassist_text::utils::credentials::default_path)
    }

    pub fn session_config(&self, access_token: &str) -> Config {
        Config::builder()
            .with_api_endpoint(&self.api_endpoint)
            .with_access_token(access_token)
            .with_language_code(&self.lang)
            .with_device_model_id(&self.device_model_id)
            .with_device_id(&self.device_id)
            .with_display(self.display)
            .with_audio_out(self.audio_out)
            .with_deadline(Duration::from_secs(self.grpc_deadline))
            .build()
    }
}
