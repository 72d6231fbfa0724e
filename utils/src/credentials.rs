//! OAuth2 "authorized user" credentials, as written by `google-oauthlib-tool`.
//!
//! The stored access token (if any) is never trusted: a freshly loaded
//! `Credentials` has no access token until `refresh` succeeds.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens this close to expiry are refreshed ahead of time.
const REFRESH_SKEW: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse credentials: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token refresh rejected ({status}): {message}")]
    Refresh { status: u16, message: String },
}

#[derive(serde::Deserialize)]
struct CredentialsFile {
    refresh_token: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
    client_id: String,
    client_secret: String,
    #[serde(default)]
    scopes: Vec<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<u64>,
    refresh_token: Option<String>,
}

#[derive(serde::Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

pub struct Credentials {
    refresh_token: SecretString,
    token_uri: String,
    client_id: String,
    client_secret: SecretString,
    scopes: Vec<String>,
    access_token: Option<SecretString>,
    expiry: Option<Instant>,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        let json = std::fs::read_to_string(path).map_err(|source| CredentialsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, CredentialsError> {
        let file: CredentialsFile = serde_json::from_str(json)?;
        Ok(Self {
            refresh_token: SecretString::from(file.refresh_token),
            token_uri: file.token_uri,
            client_id: file.client_id,
            client_secret: SecretString::from(file.client_secret),
            scopes: file.scopes,
            access_token: None,
            expiry: None,
        })
    }

    /// Exchanges the refresh token for a new access token.
    pub async fn refresh(&mut self, http: &reqwest::Client) -> Result<(), CredentialsError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.refresh_token.expose_secret()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
        ];
        let response = http.post(&self.token_uri).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(TokenErrorResponse { error, error_description: Some(description) }) => {
                    format!("{}: {}", error, description)
                }
                Ok(TokenErrorResponse { error, error_description: None }) => error,
                Err(_) => body,
            };
            return Err(CredentialsError::Refresh {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response.json().await?;
        self.expiry = token
            .expires_in
            .map(|seconds| Instant::now() + Duration::from_secs(seconds));
        if let Some(refresh_token) = token.refresh_token {
            self.refresh_token = SecretString::from(refresh_token);
        }
        self.access_token = Some(SecretString::from(token.access_token));
        tracing::debug!("refreshed access token, expires in {:?}s", token.expires_in);
        Ok(())
    }

    pub fn access_token(&self) -> Option<&SecretString> {
        self.access_token.as_ref()
    }

    /// True without an access token or when it is about to expire.
    pub fn needs_refresh(&self) -> bool {
        match (&self.access_token, self.expiry) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(_), Some(expiry)) => Instant::now() + REFRESH_SKEW >= expiry,
        }
    }

    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

/// Where `google-oauthlib-tool --save` puts its credentials.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("google-oauthlib-tool").join("credentials.json"))
}
