//! 压缩图像消息
//!
//! 对应 sensor_msgs/CompressedImage 的消息形状：格式标签 + 压缩字节流。
//! 解码发生在句柄层（`aeris-sdk`），消息层只负责搬运字节。

use std::fmt;

/// 压缩图像（相机回传的原始载荷）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressedImage {
    /// 压缩格式（"jpeg" / "png"）
    pub format: String,
    /// 压缩后的图像字节
    pub data: Vec<u8>,
}

impl CompressedImage {
    /// 创建新的压缩图像消息
    pub fn new(format: impl Into<String>, data: Vec<u8>) -> Self {
        CompressedImage {
            format: format.into(),
            data,
        }
    }
}

impl fmt::Display for CompressedImage {
    // 只用于日志，不把字节流打进日志里
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CompressedImage({}, {} bytes)",
            self.format,
            self.data.len()
        )
    }
}
