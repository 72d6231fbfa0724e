mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use gassist_text::utils::browser::{SystemBrowser, AUDIO_OUT_FILENAME, SCREEN_OUT_FILENAME};
use gassist_text::utils::credentials::Credentials;
use gassist_text::utils::html;
use gassist_text::{Reply, Session};
use secrecy::ExposeSecret;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::fmt::time::ChronoLocal;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional, it only feeds the env fallbacks of the flags
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    let http = reqwest::Client::new();
    let mut credentials = match load_credentials(&cli, &http).await {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("Error loading credentials: {:#}", e);
            tracing::error!("Run google-oauthlib-tool to initialize new OAuth 2.0 credentials.");
            return Err(e);
        }
    };
    let access_token = credentials
        .access_token()
        .map(|token| token.expose_secret().to_string())
        .unwrap_or_default();

    let mut session = Session::connect(cli.session_config(&access_token))
        .await
        .context("Failed to connect to the Assistant API")?;
    let browser = SystemBrowser::new().context("Failed to create a temp directory for responses")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read a query")? {
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        println!("<you> {}", query);

        if credentials.needs_refresh() {
            credentials
                .refresh(&http)
                .await
                .context("Failed to refresh OAuth 2.0 credentials")?;
            if let Some(token) = credentials.access_token() {
                session.transport_mut().set_access_token(token)?;
            }
        }

        match session.assist(query).await {
            Ok(reply) => render(&reply, &browser),
            Err(e) => tracing::error!("Assist call failed: {}", e),
        }
    }

    session.close();
    Ok(())
}

async fn load_credentials(cli: &Cli, http: &reqwest::Client) -> Result<Credentials> {
    let path = cli
        .credentials_path()
        .context("No credentials path given and no config directory found")?;
    let mut credentials = Credentials::load(&path)?;
    credentials.refresh(http).await?;
    tracing::debug!(
        "loaded credentials from {} (token uri {}, scopes {})",
        path.display(),
        credentials.token_uri(),
        credentials.scopes().join(" ")
    );
    Ok(credentials)
}

fn render(reply: &Reply, browser: &SystemBrowser) {
    if let Some(text) = &reply.text {
        println!("<@assistant> {}", text);
    }
    if let Some(response_html) = &reply.html {
        println!("<@assistant (parsed from html)> {}", html::card_text(response_html));
        if let Err(e) = browser.display(response_html, SCREEN_OUT_FILENAME) {
            tracing::warn!("Failed to display the HTML response: {}", e);
        }
    }
    if !reply.audio.is_empty() {
        if let Err(e) = browser.display(&reply.audio, AUDIO_OUT_FILENAME) {
            tracing::warn!("Failed to play the audio response: {}", e);
        }
    }
}
