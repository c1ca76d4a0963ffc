//! Speech Providers - 各语音合成后端实现
//!
//! 远程后端共用 base 中的请求逻辑；Provider 枚举是封闭的后端集合

mod acapela;
mod amazon_polly;
mod base;
mod google;
mod picotts;
mod responsive_voice;
mod voice_rss;

pub use acapela::AcapelaProvider;
pub use amazon_polly::AmazonPollyProvider;
pub use base::SERVICE_FAILURE;
pub use google::GoogleProvider;
pub use picotts::PicottsProvider;
pub use responsive_voice::ResponsiveVoiceProvider;
pub use voice_rss::VoiceRssProvider;

use async_trait::async_trait;

use crate::application::error::SpeechError;
use crate::application::ports::SpeechProvider;
use crate::domain::speech::{AudioFormat, SynthesisOptions};

/// 所有后端的封闭集合
#[derive(Clone)]
pub enum Provider {
    Acapela(AcapelaProvider),
    AmazonPolly(AmazonPollyProvider),
    Google(GoogleProvider),
    Picotts(PicottsProvider),
    ResponsiveVoice(ResponsiveVoiceProvider),
    VoiceRss(VoiceRssProvider),
}

impl Provider {
    /// 后端名称（用于日志）
    pub fn name(&self) -> &'static str {
        match self {
            Self::Acapela(_) => "acapela",
            Self::AmazonPolly(_) => "amazon_polly",
            Self::Google(_) => "google",
            Self::Picotts(_) => "picotts",
            Self::ResponsiveVoice(_) => "responsive_voice",
            Self::VoiceRss(_) => "voice_rss",
        }
    }

    fn inner(&self) -> &dyn SpeechProvider {
        match self {
            Self::Acapela(p) => p,
            Self::AmazonPolly(p) => p,
            Self::Google(p) => p,
            Self::Picotts(p) => p,
            Self::ResponsiveVoice(p) => p,
            Self::VoiceRss(p) => p,
        }
    }
}

#[async_trait]
impl SpeechProvider for Provider {
    fn options(&self) -> SynthesisOptions {
        self.inner().options()
    }

    fn format(&self) -> AudioFormat {
        self.inner().format()
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        self.inner().synthesize(text).await
    }
}

macro_rules! impl_from_provider {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Provider {
                fn from(provider: $ty) -> Self {
                    Self::$variant(provider)
                }
            }
        )*
    };
}

impl_from_provider! {
    Acapela => AcapelaProvider,
    AmazonPolly => AmazonPollyProvider,
    Google => GoogleProvider,
    Picotts => PicottsProvider,
    ResponsiveVoice => ResponsiveVoiceProvider,
    VoiceRss => VoiceRssProvider,
}
