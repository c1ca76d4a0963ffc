//! Domain Layer - 领域层
//!
//! Speech Context: 音频格式、合成选项与缓存指纹

pub mod speech;

pub use speech::{AudioFormat, OptionValue, SynthesisOptions};
