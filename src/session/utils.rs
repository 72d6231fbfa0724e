use secrecy::{ExposeSecret, SecretString};
use tonic::metadata::AsciiMetadataValue;
use tonic::transport::{ClientTlsConfig, Endpoint};
use crate::error::Error;
use crate::session::config::Config;
use crate::types::{AssistRequest, AssistResponse};

/// Bare hosts are reached over TLS; explicit `http://` URIs are used as is.
pub fn endpoint_uri(api_endpoint: &str) -> String {
    if api_endpoint.starts_with("http://") || api_endpoint.starts_with("https://") {
        api_endpoint.to_string()
    } else {
        format!("https://{}", api_endpoint)
    }
}

pub fn build_endpoint(config: &Config) -> Result<Endpoint, Error> {
    let uri = endpoint_uri(config.api_endpoint());
    let endpoint = match Endpoint::from_shared(uri.clone()) {
        Ok(endpoint) => endpoint.timeout(config.deadline()),
        Err(source) => return Err(Error::InvalidEndpoint { endpoint: uri, source }),
    };
    if !uri.starts_with("https://") {
        return Ok(endpoint);
    }
    endpoint
        .tls_config(tls_config())
        .map_err(|source| Error::InvalidEndpoint { endpoint: uri, source })
}

fn tls_config() -> ClientTlsConfig {
    let tls = ClientTlsConfig::new();
    #[cfg(feature = "native-roots")]
    let tls = tls.with_native_roots();
    #[cfg(feature = "webpki-roots")]
    let tls = tls.with_webpki_roots();
    tls
}

/// `Bearer <token>` metadata, or `None` for an empty token.
pub fn authorization_value(
    access_token: &SecretString,
) -> Result<Option<AsciiMetadataValue>, Error> {
    let token = access_token.expose_secret();
    if token.is_empty() {
        return Ok(None);
    }
    let mut value: AsciiMetadataValue = format!("Bearer {}", token).parse()?;
    value.set_sensitive(true);
    Ok(Some(value))
}

pub fn log_assist_request_without_audio(request: &AssistRequest) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!("assist request: {:?}", request.without_audio());
    }
}

pub fn log_assist_response_without_audio(response: &AssistResponse) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let audio_bytes = response.audio_data().map_or(0, |data| data.len());
        tracing::debug!(audio_bytes, "assist response: {:?}", response.without_audio());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_uri() {
        assert_eq!(
            endpoint_uri("embeddedassistant.googleapis.com"),
            "https://embeddedassistant.googleapis.com"
        );
        assert_eq!(endpoint_uri("http://127.0.0.1:50051"), "http://127.0.0.1:50051");
        assert_eq!(endpoint_uri("https://example.com:443"), "https://example.com:443");
    }

    #[test]
    fn test_authorization_value() {
        let value = authorization_value(&SecretString::from("abc".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer abc");
        assert!(value.is_sensitive());

        assert!(authorization_value(&SecretString::from(String::new())).unwrap().is_none());
        assert!(authorization_value(&SecretString::from("bad\ntoken".to_string())).is_err());
    }

    #[test]
    fn test_build_endpoint_rejects_garbage() {
        let config = Config::builder().with_api_endpoint("http://exa mple.com").build();
        assert!(matches!(
            build_endpoint(&config),
            Err(Error::InvalidEndpoint { .. })
        ));
    }
}
