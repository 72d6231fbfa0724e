use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid api endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("access token is not a valid authorization header value")]
    InvalidAccessToken(#[from] tonic::metadata::errors::InvalidMetadataValue),
    #[error("assist call failed: {0}")]
    Status(#[from] tonic::Status),
    #[error("assist call exceeded its deadline of {0:?}")]
    DeadlineExceeded(Duration),
}

impl Error {
    /// The gRPC status code for errors raised by the call itself.
    pub fn code(&self) -> Option<tonic::Code> {
        match self {
            Error::Status(status) => Some(status.code()),
            Error::DeadlineExceeded(_) => Some(tonic::Code::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.code() == Some(tonic::Code::Unauthenticated)
    }
}
