//! Message types for the `google.assistant.embedded.v1alpha2.EmbeddedAssistant`
//! service.
//!
//! Only the parts of the contract a text client touches are mirrored here.
//! Field tags match the published proto so the messages interoperate with the
//! real service; unknown fields sent by the server are skipped by prost.

pub mod audio;
pub mod request;
pub mod response;

pub use audio::{audio_in_config, audio_out_config, AudioInConfig, AudioOut, AudioOutConfig};
pub use request::{
    assist_config, assist_request, screen_out_config, AssistConfig, AssistRequest, DeviceConfig,
    DialogStateIn, ScreenOutConfig,
};
pub use response::{
    assist_response, dialog_state_out, screen_out, AssistResponse, DialogStateOut, ScreenOut,
    SpeechRecognitionResult,
};

/// Fully qualified gRPC path of the `Assist` method.
pub const ASSIST_PATH: &str = "/google.assistant.embedded.v1alpha2.EmbeddedAssistant/Assist";
