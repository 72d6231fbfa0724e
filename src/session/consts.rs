use std::time::Duration;

pub const ASSISTANT_API_ENDPOINT: &str = "embeddedassistant.googleapis.com";
/// Three minutes plus a few seconds of slack for the response stream.
pub const DEFAULT_GRPC_DEADLINE: Duration = Duration::from_secs(60 * 3 + 5);

pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";
pub const DEFAULT_DEVICE_MODEL_ID: &str = "default";
pub const DEFAULT_DEVICE_ID: &str = "default";

pub const AUDIO_OUT_SAMPLE_RATE_HERTZ: i32 = 24000;
pub const AUDIO_OUT_VOLUME_PERCENTAGE: i32 = 100;

pub const AUTHORIZATION_HEADER: &str = "authorization";
