//! 缓存指纹
//!
//! 指纹 = md5(encode(options + {"text": text})) + "." + format
//!
//! 编码为带类型和字节长度前缀的有序映射，例如:
//! `a:2:{s:8:"language";s:2:"en";s:4:"text";s:5:"hello";}`
//! 缓存文件名依赖此格式，修改会导致已有缓存全部失效。

use super::{AudioFormat, OptionValue, SynthesisOptions};

/// 确定性编码选项集合
pub fn encode_options(options: &SynthesisOptions) -> String {
    let mut out = format!("a:{}:{{", options.len());
    for (key, value) in options.iter() {
        encode_str(&mut out, key);
        match value {
            OptionValue::Text(s) => encode_str(&mut out, s),
            OptionValue::Int(n) => out.push_str(&format!("i:{};", n)),
        }
    }
    out.push('}');
    out
}

fn encode_str(out: &mut String, s: &str) {
    out.push_str(&format!("s:{}:\"{}\";", s.len(), s));
}

/// 生成缓存文件名
pub fn fingerprint(options: &SynthesisOptions, text: &str, format: AudioFormat) -> String {
    let mut options = options.clone();
    options.insert("text", text);

    let digest = md5::compute(encode_options(&options).as_bytes());
    format!("{:x}.{}", digest, format.extension())
}
