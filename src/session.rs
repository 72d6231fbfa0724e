use std::time::Duration;
use futures::StreamExt;
use crate::error::Error;
use crate::types::audio_out_config::Encoding;
use crate::types::dialog_state_out::MicrophoneMode;
use crate::types::screen_out_config::ScreenMode;
use crate::types::{
    AssistConfig, AssistRequest, AudioOutConfig, DeviceConfig, DialogStateIn, ScreenOutConfig,
};

pub mod consts;
mod config;
mod transport;
mod utils;

pub use config::{Config, ConfigBuilder};
pub use transport::{AssistTransport, GrpcTransport, ResponseStream};

/// What the Assistant said in one turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    /// Supplemental display text, if any message carried some.
    pub text: Option<String>,
    /// HTML screen out, if display was requested and the service sent one.
    pub html: Option<Vec<u8>>,
    /// MP3 audio, empty unless audio out is enabled.
    pub audio: Vec<u8>,
}

/// A conversation with the Assistant.
///
/// The session carries the dialog state between turns: the opaque
/// conversation token returned by the service and whether the next request
/// starts a new conversation. `assist` takes `&mut self`, so turns on one
/// session are serialized; wrap it in a `tokio::sync::Mutex` to share it
/// between tasks.
pub struct Session<T: AssistTransport = GrpcTransport> {
    transport: T,
    language_code: String,
    device_model_id: String,
    device_id: String,
    conversation_state: Vec<u8>,
    is_new_conversation: bool,
    display: bool,
    audio_out: bool,
    deadline: Duration,
}

impl Session<GrpcTransport> {
    /// Opens an authorized channel to the configured endpoint.
    pub async fn connect(config: Config) -> Result<Self, Error> {
        let transport = GrpcTransport::connect(&config).await?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: AssistTransport> Session<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            transport,
            language_code: config.language_code().to_string(),
            device_model_id: config.device_model_id().to_string(),
            device_id: config.device_id().to_string(),
            conversation_state: Vec::new(),
            // the first turn always starts a fresh conversation
            is_new_conversation: true,
            display: config.display(),
            audio_out: config.audio_out(),
            deadline: config.deadline(),
        }
    }

    /// Sends `text_query` and collects the streamed answer.
    ///
    /// On error the dialog state keeps whatever changed before the failure:
    /// the next request never claims a new conversation, and a conversation
    /// token received before the stream broke is kept.
    pub async fn assist(&mut self, text_query: &str) -> Result<Reply, Error> {
        let request = self.build_request(text_query);
        // set before the call: a failed turn still counts as started
        self.is_new_conversation = false;
        utils::log_assist_request_without_audio(&request);

        let deadline = self.deadline;
        match tokio::time::timeout(deadline, self.exchange(request)).await {
            Ok(result) => result,
            Err(_) => Err(Error::DeadlineExceeded(deadline)),
        }
    }

    fn build_request(&self, text_query: &str) -> AssistRequest {
        let audio_out_config = AudioOutConfig::new(Encoding::Mp3)
            .with_sample_rate_hertz(consts::AUDIO_OUT_SAMPLE_RATE_HERTZ)
            .with_volume_percentage(consts::AUDIO_OUT_VOLUME_PERCENTAGE);
        let dialog_state_in = DialogStateIn::new(&self.language_code)
            .with_conversation_state(&self.conversation_state)
            .with_new_conversation(self.is_new_conversation);

        let mut config = AssistConfig::text_query(text_query)
            .with_audio_out_config(audio_out_config)
            .with_dialog_state_in(dialog_state_in)
            .with_device_config(DeviceConfig::new(&self.device_id, &self.device_model_id));
        if self.display {
            config = config.with_screen_out_config(ScreenOutConfig::new(ScreenMode::Playing));
        }
        AssistRequest::from_config(config)
    }

    async fn exchange(&mut self, request: AssistRequest) -> Result<Reply, Error> {
        let mut responses = self.transport.assist(request, self.deadline).await?;

        let mut reply = Reply::default();
        while let Some(response) = responses.next().await {
            let response = response?;
            utils::log_assist_response_without_audio(&response);

            if let Some(html) = response.screen_out_data() {
                reply.html = Some(html.to_vec());
            }
            if let Some(conversation_state) = response.conversation_state() {
                self.conversation_state = conversation_state.to_vec();
            }
            if let Some(text) = response.supplemental_display_text() {
                reply.text = Some(text.to_string());
            }
            if self.audio_out {
                if let Some(audio) = response.audio_data() {
                    reply.audio.extend_from_slice(audio);
                }
            }
            if response.microphone_mode() == Some(MicrophoneMode::DialogFollowOn) {
                tracing::debug!("assistant expects a follow-on query");
            }
        }
        Ok(reply)
    }

    /// Drops the transport, closing the channel.
    pub fn close(self) {
        tracing::info!("closing assistant session");
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn device_model_id(&self) -> &str {
        &self.device_model_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// The token from the last response that carried one.
    pub fn conversation_state(&self) -> Option<&[u8]> {
        if self.conversation_state.is_empty() {
            None
        } else {
            Some(&self.conversation_state)
        }
    }

    pub fn is_new_conversation(&self) -> bool {
        self.is_new_conversation
    }

    pub fn display_enabled(&self) -> bool {
        self.display
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_out
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AudioOut, AssistResponse, DialogStateOut, ScreenOut};
    use futures::stream;
    use transport::MockAssistTransport;

    fn text_response(text: &str) -> AssistResponse {
        AssistResponse {
            dialog_state_out: Some(DialogStateOut {
                supplemental_display_text: text.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn state_response(state: &[u8]) -> AssistResponse {
        AssistResponse {
            dialog_state_out: Some(DialogStateOut {
                conversation_state: state.to_vec(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn html_response(html: &[u8]) -> AssistResponse {
        AssistResponse {
            screen_out: Some(ScreenOut {
                data: html.to_vec(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn audio_response(audio: &[u8]) -> AssistResponse {
        AssistResponse {
            audio_out: Some(AudioOut {
                audio_data: audio.to_vec(),
            }),
            ..Default::default()
        }
    }

    fn replying(responses: Vec<AssistResponse>) -> ResponseStream {
        stream::iter(responses.into_iter().map(Ok)).boxed()
    }

    fn dialog_state(request: &AssistRequest) -> DialogStateIn {
        request
            .config()
            .and_then(|config| config.dialog_state_in.clone())
            .expect("request should carry dialog state")
    }

    fn session_with(
        transport: MockAssistTransport,
        display: bool,
        audio_out: bool,
    ) -> Session<MockAssistTransport> {
        let config = Config::builder()
            .with_display(display)
            .with_audio_out(audio_out)
            .build();
        Session::with_transport(config, transport)
    }

    #[tokio::test]
    async fn test_text_only_reply() {
        let mut transport = MockAssistTransport::new();
        transport
            .expect_assist()
            .withf(|request, _| {
                let config = request.config().unwrap();
                config.query() == Some("tell me a joke") && config.screen_out_config.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(replying(vec![text_response("Why did...")])));

        let mut session = session_with(transport, false, false);
        let reply = session.assist("tell me a joke").await.unwrap();

        assert_eq!(reply.text.as_deref(), Some("Why did..."));
        assert_eq!(reply.html, None);
        assert!(reply.audio.is_empty());
    }

    #[tokio::test]
    async fn test_request_carries_config() {
        let mut transport = MockAssistTransport::new();
        transport
            .expect_assist()
            .withf(|request, deadline| {
                let config = request.config().unwrap();
                let audio = config.audio_out_config.unwrap();
                let device = config.device_config.as_ref().unwrap();
                let dialog = config.dialog_state_in.as_ref().unwrap();
                audio.encoding() == Encoding::Mp3
                    && audio.sample_rate_hertz == 24000
                    && audio.volume_percentage == 100
                    && config.screen_out_config.unwrap().screen_mode() == ScreenMode::Playing
                    && device.device_id == "device-1"
                    && device.device_model_id == "model-1"
                    && dialog.language_code == "de-DE"
                    && *deadline == Duration::from_secs(30)
            })
            .times(1)
            .returning(|_, _| Ok(replying(vec![])));

        let config = Config::builder()
            .with_language_code("de-DE")
            .with_device_id("device-1")
            .with_device_model_id("model-1")
            .with_display(true)
            .with_deadline(Duration::from_secs(30))
            .build();
        let mut session = Session::with_transport(config, transport);

        let reply = session.assist("hallo").await.unwrap();
        assert_eq!(reply, Reply::default());
    }

    #[tokio::test]
    async fn test_conversation_state_carries_over() {
        let mut transport = MockAssistTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_assist()
            .withf(|request, _| {
                let dialog = dialog_state(request);
                dialog.is_new_conversation && dialog.conversation_state.is_empty()
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(replying(vec![state_response(b"token-1"), text_response("hi")])));
        transport
            .expect_assist()
            .withf(|request, _| {
                let dialog = dialog_state(request);
                !dialog.is_new_conversation && dialog.conversation_state == b"token-1"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(replying(vec![text_response("again")])));

        let mut session = session_with(transport, false, false);
        assert!(session.is_new_conversation());

        session.assist("hello").await.unwrap();
        assert!(!session.is_new_conversation());
        assert_eq!(session.conversation_state(), Some(&b"token-1"[..]));

        session.assist("hello again").await.unwrap();
        // no token in the second reply: the old one stays
        assert_eq!(session.conversation_state(), Some(&b"token-1"[..]));
        assert!(!session.is_new_conversation());
    }

    #[tokio::test]
    async fn test_latest_conversation_state_wins() {
        let mut transport = MockAssistTransport::new();
        transport.expect_assist().times(1).returning(|_, _| {
            Ok(replying(vec![
                state_response(b"first"),
                state_response(b""),
                state_response(b"second"),
            ]))
        });

        let mut session = session_with(transport, false, false);
        session.assist("q").await.unwrap();
        assert_eq!(session.conversation_state(), Some(&b"second"[..]));
    }

    #[tokio::test]
    async fn test_last_html_wins() {
        let mut transport = MockAssistTransport::new();
        transport.expect_assist().times(1).returning(|_, _| {
            Ok(replying(vec![
                html_response(b"<p>H1</p>"),
                html_response(b""),
                html_response(b"<p>H2</p>"),
            ]))
        });

        let mut session = session_with(transport, true, false);
        let reply = session.assist("show me").await.unwrap();
        assert_eq!(reply.html.as_deref(), Some(&b"<p>H2</p>"[..]));
    }

    #[tokio::test]
    async fn test_audio_fragments_concatenate_in_order() {
        let mut transport = MockAssistTransport::new();
        transport.expect_assist().times(1).returning(|_, _| {
            Ok(replying(vec![
                audio_response(&[0xff, 0xfb]),
                text_response("sure"),
                audio_response(&[0x90]),
                audio_response(&[0x00, 0x01, 0x02]),
            ]))
        });

        let mut session = session_with(transport, false, true);
        let reply = session.assist("sing").await.unwrap();
        assert_eq!(reply.audio, vec![0xff, 0xfb, 0x90, 0x00, 0x01, 0x02]);
        assert_eq!(reply.text.as_deref(), Some("sure"));
    }

    #[tokio::test]
    async fn test_audio_ignored_when_disabled() {
        let mut transport = MockAssistTransport::new();
        transport
            .expect_assist()
            .times(1)
            .returning(|_, _| Ok(replying(vec![audio_response(&[1, 2, 3]), audio_response(&[4])])));

        let mut session = session_with(transport, false, false);
        let reply = session.assist("sing").await.unwrap();
        assert!(reply.audio.is_empty());
    }

    #[tokio::test]
    async fn test_failed_call_still_ends_new_conversation() {
        let mut transport = MockAssistTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_assist()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::Status(tonic::Status::unauthenticated("bad token"))));
        transport
            .expect_assist()
            .withf(|request, _| !dialog_state(request).is_new_conversation)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(replying(vec![])));

        let mut session = session_with(transport, false, false);
        let error = session.assist("hello").await.unwrap_err();
        assert!(error.is_unauthenticated());
        assert!(!session.is_new_conversation());
        assert_eq!(session.conversation_state(), None);

        session.assist("hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_stream_error_keeps_captured_state() {
        let mut transport = MockAssistTransport::new();
        transport.expect_assist().times(1).returning(|_, _| {
            let items: Vec<Result<AssistResponse, Error>> = vec![
                Ok(state_response(b"kept")),
                Ok(text_response("partial")),
                Err(Error::Status(tonic::Status::unavailable("connection reset"))),
            ];
            Ok(stream::iter(items).boxed())
        });

        let mut session = session_with(transport, false, false);
        let error = session.assist("hello").await.unwrap_err();
        assert_eq!(error.code(), Some(tonic::Code::Unavailable));
        assert_eq!(session.conversation_state(), Some(&b"kept"[..]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_bounds_the_stream() {
        let mut transport = MockAssistTransport::new();
        transport
            .expect_assist()
            .times(1)
            .returning(|_, _| Ok(stream::pending().boxed()));

        let config = Config::builder().with_deadline(Duration::from_secs(2)).build();
        let mut session = Session::with_transport(config, transport);

        let error = session.assist("hello?").await.unwrap_err();
        assert!(matches!(error, Error::DeadlineExceeded(d) if d == Duration::from_secs(2)));
        assert_eq!(error.code(), Some(tonic::Code::DeadlineExceeded));
        assert!(!session.is_new_conversation());
    }

    #[test]
    fn test_new_session_defaults() {
        let session = session_with(MockAssistTransport::new(), true, false);
        assert!(session.is_new_conversation());
        assert_eq!(session.conversation_state(), None);
        assert_eq!(session.language_code(), "en-US");
        assert_eq!(session.device_id(), "default");
        assert_eq!(session.device_model_id(), "default");
        assert!(session.display_enabled());
        assert!(!session.audio_enabled());
        assert_eq!(session.deadline(), Duration::from_secs(185));
    }
}
