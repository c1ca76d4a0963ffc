//! Speech Context - 语音合成限界上下文
//!
//! 职责:
//! - 音频格式
//! - 合成选项（用于缓存指纹）
//! - 指纹计算

mod cache_key;
mod value_objects;

pub use cache_key::{encode_options, fingerprint};
pub use value_objects::{AudioFormat, OptionValue, SynthesisOptions};
