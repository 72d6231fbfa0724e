/// Audio format of the `audio_in` bytes sent by the client.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AudioInConfig {
    #[prost(enumeration = "audio_in_config::Encoding", tag = "1")]
    pub encoding: i32,
    #[prost(int32, tag = "2")]
    pub sample_rate_hertz: i32,
}

pub mod audio_in_config {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Encoding {
        Unspecified = 0,
        Linear16 = 1,
        Flac = 2,
    }
}

/// Audio format the service should use for `AudioOut` chunks.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AudioOutConfig {
    #[prost(enumeration = "audio_out_config::Encoding", tag = "1")]
    pub encoding: i32,
    #[prost(int32, tag = "2")]
    pub sample_rate_hertz: i32,
    /// 1..=100, the service treats 0 as "unchanged".
    #[prost(int32, tag = "3")]
    pub volume_percentage: i32,
}

pub mod audio_out_config {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Encoding {
        Unspecified = 0,
        Linear16 = 1,
        Mp3 = 2,
        OpusInOgg = 3,
    }
}

impl AudioOutConfig {
    pub fn new(encoding: audio_out_config::Encoding) -> Self {
        Self {
            encoding: encoding as i32,
            ..Default::default()
        }
    }

    pub fn with_sample_rate_hertz(mut self, sample_rate_hertz: i32) -> Self {
        self.sample_rate_hertz = sample_rate_hertz;
        self
    }

    pub fn with_volume_percentage(mut self, volume_percentage: i32) -> Self {
        self.volume_percentage = volume_percentage;
        self
    }
}

/// One chunk of synthesized audio. Chunks are not playable on their own,
/// only their concatenation is.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AudioOut {
    #[prost(bytes = "vec", tag = "1")]
    pub audio_data: Vec<u8>,
}
