use crate::audio::{AudioInConfig, AudioOutConfig};

/// The top-level message sent by the client. The first message of a call
/// must carry `config`; any following messages carry `audio_in`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AssistRequest {
    #[prost(oneof = "assist_request::Type", tags = "1, 2")]
    pub r#type: Option<assist_request::Type>,
}

pub mod assist_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Type {
        #[prost(message, tag = "1")]
        Config(super::AssistConfig),
        #[prost(bytes, tag = "2")]
        AudioIn(Vec<u8>),
    }
}

impl AssistRequest {
    pub fn from_config(config: AssistConfig) -> Self {
        Self {
            r#type: Some(assist_request::Type::Config(config)),
        }
    }

    pub fn config(&self) -> Option<&AssistConfig> {
        match &self.r#type {
            Some(assist_request::Type::Config(config)) => Some(config),
            _ => None,
        }
    }

    /// A copy safe to log: any `audio_in` payload is replaced with an empty
    /// buffer.
    pub fn without_audio(&self) -> Self {
        match &self.r#type {
            Some(assist_request::Type::AudioIn(_)) => Self {
                r#type: Some(assist_request::Type::AudioIn(Vec::new())),
            },
            _ => self.clone(),
        }
    }
}

/// Specifies how to process the request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AssistConfig {
    #[prost(oneof = "assist_config::Type", tags = "1, 6")]
    pub r#type: Option<assist_config::Type>,
    #[prost(message, optional, tag = "2")]
    pub audio_out_config: Option<AudioOutConfig>,
    #[prost(message, optional, tag = "8")]
    pub screen_out_config: Option<ScreenOutConfig>,
    #[prost(message, optional, tag = "3")]
    pub dialog_state_in: Option<DialogStateIn>,
    #[prost(message, optional, tag = "4")]
    pub device_config: Option<DeviceConfig>,
}

pub mod assist_config {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Type {
        #[prost(message, tag = "1")]
        AudioInConfig(super::AudioInConfig),
        #[prost(string, tag = "6")]
        TextQuery(String),
    }
}

impl AssistConfig {
    pub fn text_query(query: &str) -> Self {
        Self {
            r#type: Some(assist_config::Type::TextQuery(query.to_string())),
            ..Default::default()
        }
    }

    pub fn with_audio_out_config(mut self, audio_out_config: AudioOutConfig) -> Self {
        self.audio_out_config = Some(audio_out_config);
        self
    }

    pub fn with_screen_out_config(mut self, screen_out_config: ScreenOutConfig) -> Self {
        self.screen_out_config = Some(screen_out_config);
        self
    }

    pub fn with_dialog_state_in(mut self, dialog_state_in: DialogStateIn) -> Self {
        self.dialog_state_in = Some(dialog_state_in);
        self
    }

    pub fn with_device_config(mut self, device_config: DeviceConfig) -> Self {
        self.device_config = Some(device_config);
        self
    }

    pub fn query(&self) -> Option<&str> {
        match &self.r#type {
            Some(assist_config::Type::TextQuery(query)) => Some(query),
            _ => None,
        }
    }
}

/// Asks the service for a visual response alongside audio.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ScreenOutConfig {
    #[prost(enumeration = "screen_out_config::ScreenMode", tag = "1")]
    pub screen_mode: i32,
}

pub mod screen_out_config {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum ScreenMode {
        Unspecified = 0,
        Off = 1,
        Playing = 3,
    }
}

impl ScreenOutConfig {
    pub fn new(screen_mode: screen_out_config::ScreenMode) -> Self {
        Self {
            screen_mode: screen_mode as i32,
        }
    }
}

/// Dialog state carried from the previous turn.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DialogStateIn {
    /// Opaque token from the last `DialogStateOut`, empty on the first turn.
    #[prost(bytes = "vec", tag = "1")]
    pub conversation_state: Vec<u8>,
    /// IETF BCP 47 language tag, e.g. "en-US".
    #[prost(string, tag = "2")]
    pub language_code: String,
    #[prost(bool, tag = "7")]
    pub is_new_conversation: bool,
}

impl DialogStateIn {
    pub fn new(language_code: &str) -> Self {
        Self {
            language_code: language_code.to_string(),
            ..Default::default()
        }
    }

    pub fn with_conversation_state(mut self, conversation_state: &[u8]) -> Self {
        self.conversation_state = conversation_state.to_vec();
        self
    }

    pub fn with_new_conversation(mut self, is_new_conversation: bool) -> Self {
        self.is_new_conversation = is_new_conversation;
        self
    }
}

/// Identifies the calling device to the service.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeviceConfig {
    #[prost(string, tag = "1")]
    pub device_id: String,
    #[prost(string, tag = "3")]
    pub device_model_id: String,
}

impl DeviceConfig {
    pub fn new(device_id: &str, device_model_id: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
            device_model_id: device_model_id.to_string(),
        }
    }
}
