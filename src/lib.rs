mod error;
mod session;

pub use gassist_text_types as types;
pub use gassist_text_utils as utils;
pub use error::Error;
pub use session::{
    AssistTransport, Config, ConfigBuilder, GrpcTransport, Reply, ResponseStream, Session,
};
pub use session::consts;
