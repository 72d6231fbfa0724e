use std::time::Duration;
use secrecy::SecretString;
use crate::session::consts::{
    ASSISTANT_API_ENDPOINT, DEFAULT_DEVICE_ID, DEFAULT_DEVICE_MODEL_ID, DEFAULT_GRPC_DEADLINE,
    DEFAULT_LANGUAGE_CODE,
};

pub struct Config {
    api_endpoint: String,
    access_token: SecretString,
    language_code: String,
    device_model_id: String,
    device_id: String,
    display: bool,
    audio_out: bool,
    deadline: Duration,
}

pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    /// Host (optionally with port) of the Assistant API, or a full
    /// `http://`/`https://` URI.
    pub fn with_api_endpoint(mut self, api_endpoint: &str) -> Self {
        self.config.api_endpoint = api_endpoint.to_string();
        self
    }

    pub fn with_access_token(mut self, access_token: &str) -> Self {
        self.config.access_token = SecretString::from(access_token.to_string());
        self
    }

    pub fn with_language_code(mut self, language_code: &str) -> Self {
        self.config.language_code = language_code.to_string();
        self
    }

    pub fn with_device_model_id(mut self, device_model_id: &str) -> Self {
        self.config.device_model_id = device_model_id.to_string();
        self
    }

    pub fn with_device_id(mut self, device_id: &str) -> Self {
        self.config.device_id = device_id.to_string();
        self
    }

    /// Ask the service for an HTML screen out alongside the text.
    pub fn with_display(mut self, display: bool) -> Self {
        self.config.display = display;
        self
    }

    pub fn with_audio_out(mut self, audio_out: bool) -> Self {
        self.config.audio_out = audio_out;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.config.deadline = deadline;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_endpoint: ASSISTANT_API_ENDPOINT.to_string(),
            access_token: SecretString::from(String::new()),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            device_model_id: DEFAULT_DEVICE_MODEL_ID.to_string(),
            device_id: DEFAULT_DEVICE_ID.to_string(),
            display: false,
            audio_out: false,
            deadline: DEFAULT_GRPC_DEADLINE,
        }
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn device_model_id(&self) -> &str {
        &self.device_model_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn display(&self) -> bool {
        self.display
    }

    pub fn audio_out(&self) -> bool {
        self.audio_out
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.api_endpoint(), "embeddedassistant.googleapis.com");
        assert_eq!(config.language_code(), "en-US");
        assert_eq!(config.device_model_id(), "default");
        assert_eq!(config.device_id(), "default");
        assert!(!config.display());
        assert!(!config.audio_out());
        assert_eq!(config.deadline(), Duration::from_secs(185));
        assert!(config.access_token().expose_secret().is_empty());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .with_api_endpoint("localhost:50051")
            .with_access_token("ya29.token")
            .with_language_code("fr-FR")
            .with_device_model_id("model")
            .with_device_id("device")
            .with_display(true)
            .with_audio_out(true)
            .with_deadline(Duration::from_secs(5))
            .build();

        assert_eq!(config.api_endpoint(), "localhost:50051");
        assert_eq!(config.access_token().expose_secret(), "ya29.token");
        assert_eq!(config.language_code(), "fr-FR");
        assert_eq!(config.device_model_id(), "model");
        assert_eq!(config.device_id(), "device");
        assert!(config.display());
        assert!(config.audio_out());
        assert_eq!(config.deadline(), Duration::from_secs(5));
    }
}
