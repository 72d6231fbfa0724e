use std::time::Duration;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use secrecy::SecretString;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::metadata::AsciiMetadataValue;
use tonic::transport::Channel;
#[cfg(test)]
use mockall::automock;
use crate::error::Error;
use crate::session::config::Config;
use crate::session::consts::AUTHORIZATION_HEADER;
use crate::session::utils;
use crate::types::{AssistRequest, AssistResponse, ASSIST_PATH};

/// The server side of one `Assist` call, in arrival order.
pub type ResponseStream = BoxStream<'static, Result<AssistResponse, Error>>;

/// Carries a single `AssistRequest` to the service and hands back the
/// response stream.
///
/// `Session` only talks to the service through this trait, so tests can
/// script the server side without a network.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AssistTransport: Send {
    async fn assist(
        &mut self,
        request: AssistRequest,
        deadline: Duration,
    ) -> Result<ResponseStream, Error>;
}

/// `AssistTransport` over an authorized gRPC channel.
pub struct GrpcTransport {
    inner: tonic::client::Grpc<Channel>,
    authorization: Option<AsciiMetadataValue>,
}

impl GrpcTransport {
    /// Connects to `config.api_endpoint()` and authorizes calls with
    /// `config.access_token()`.
    pub async fn connect(config: &Config) -> Result<Self, Error> {
        let endpoint = utils::build_endpoint(config)?;
        let authorization = utils::authorization_value(config.access_token())?;
        let channel = endpoint.connect().await.map_err(|source| Error::Connect {
            endpoint: config.api_endpoint().to_string(),
            source,
        })?;
        tracing::info!("connected to {}", config.api_endpoint());
        Ok(Self {
            inner: tonic::client::Grpc::new(channel),
            authorization,
        })
    }

    /// Wraps an existing channel, e.g. one built with `Endpoint::connect_lazy`.
    pub fn new(channel: Channel, access_token: &SecretString) -> Result<Self, Error> {
        Ok(Self {
            inner: tonic::client::Grpc::new(channel),
            authorization: utils::authorization_value(access_token)?,
        })
    }

    /// Swaps in a refreshed access token for subsequent calls.
    pub fn set_access_token(&mut self, access_token: &SecretString) -> Result<(), Error> {
        self.authorization = utils::authorization_value(access_token)?;
        Ok(())
    }
}

#[async_trait]
impl AssistTransport for GrpcTransport {
    async fn assist(
        &mut self,
        request: AssistRequest,
        deadline: Duration,
    ) -> Result<ResponseStream, Error> {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unavailable(format!("service was not ready: {}", e))
        })?;

        // one message, then the outbound side closes
        let mut request = tonic::Request::new(futures::stream::iter([request]));
        request.set_timeout(deadline);
        if let Some(authorization) = &self.authorization {
            request
                .metadata_mut()
                .insert(AUTHORIZATION_HEADER, authorization.clone());
        }

        let codec = ProstCodec::<AssistRequest, AssistResponse>::default();
        let response = self
            .inner
            .streaming(request, PathAndQuery::from_static(ASSIST_PATH), codec)
            .await?;

        Ok(response.into_inner().map_err(Error::from).boxed())
    }
}
