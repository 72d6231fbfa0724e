use crate::audio::AudioOut;

/// One message of the response stream. Any of the payloads may be absent.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AssistResponse {
    #[prost(enumeration = "assist_response::EventType", tag = "1")]
    pub event_type: i32,
    #[prost(message, optional, tag = "3")]
    pub audio_out: Option<AudioOut>,
    #[prost(message, optional, tag = "4")]
    pub screen_out: Option<ScreenOut>,
    #[prost(message, repeated, tag = "2")]
    pub speech_results: Vec<SpeechRecognitionResult>,
    #[prost(message, optional, tag = "5")]
    pub dialog_state_out: Option<DialogStateOut>,
}

pub mod assist_response {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum EventType {
        Unspecified = 0,
        EndOfUtterance = 1,
    }
}

impl AssistResponse {
    /// HTML of the visual response, if this message carries any.
    pub fn screen_out_data(&self) -> Option<&[u8]> {
        self.screen_out
            .as_ref()
            .map(|screen_out| screen_out.data.as_slice())
            .filter(|data| !data.is_empty())
    }

    pub fn conversation_state(&self) -> Option<&[u8]> {
        self.dialog_state_out
            .as_ref()
            .map(|state| state.conversation_state.as_slice())
            .filter(|state| !state.is_empty())
    }

    pub fn supplemental_display_text(&self) -> Option<&str> {
        self.dialog_state_out
            .as_ref()
            .map(|state| state.supplemental_display_text.as_str())
            .filter(|text| !text.is_empty())
    }

    pub fn audio_data(&self) -> Option<&[u8]> {
        self.audio_out
            .as_ref()
            .map(|audio| audio.audio_data.as_slice())
            .filter(|data| !data.is_empty())
    }

    pub fn microphone_mode(&self) -> Option<dialog_state_out::MicrophoneMode> {
        self.dialog_state_out
            .as_ref()
            .map(|state| state.microphone_mode())
    }

    /// A copy safe to log: audio bytes are dropped.
    pub fn without_audio(&self) -> Self {
        let mut stripped = self.clone();
        if let Some(audio_out) = stripped.audio_out.as_mut() {
            audio_out.audio_data.clear();
        }
        stripped
    }
}

/// The visual response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScreenOut {
    #[prost(enumeration = "screen_out::Format", tag = "1")]
    pub format: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

pub mod screen_out {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Format {
        Unspecified = 0,
        Html = 1,
    }
}

/// Dialog state to carry into the next turn, plus display text.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DialogStateOut {
    #[prost(string, tag = "1")]
    pub supplemental_display_text: String,
    #[prost(bytes = "vec", tag = "2")]
    pub conversation_state: Vec<u8>,
    #[prost(enumeration = "dialog_state_out::MicrophoneMode", tag = "3")]
    pub microphone_mode: i32,
    #[prost(int32, tag = "4")]
    pub volume_percentage: i32,
}

pub mod dialog_state_out {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum MicrophoneMode {
        Unspecified = 0,
        CloseMicrophone = 1,
        DialogFollowOn = 2,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SpeechRecognitionResult {
    #[prost(string, tag = "1")]
    pub transcript: String,
    #[prost(float, tag = "2")]
    pub stability: f32,
}
