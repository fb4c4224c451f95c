//! 相机帧解码与缓存
//!
//! 入站压缩图像在传输线程上解码为 RGB8，写入单槽缓存。
//! 读侧拿到的是 `Arc` 快照，槽位始终是"最新一帧赢"，不保留历史。

use aeris_msgs::CompressedImage;
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tracing::{trace, warn};

/// 解码后的相机帧（RGB8，行优先，无 padding）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFrame {
    /// 宽（像素）
    pub width: u32,
    /// 高（像素）
    pub height: u32,
    /// RGB8 像素数据，长度 = width * height * 3
    pub data: Vec<u8>,
}

impl CameraFrame {
    /// 解码压缩图像（JPEG/PNG）
    ///
    /// # 错误
    /// - `image::ImageError`: 载荷损坏或格式不受支持
    pub fn decode(img: &CompressedImage) -> Result<CameraFrame, image::ImageError> {
        let decoded = image::load_from_memory(&img.data)?;
        let rgb = decoded.to_rgb8();
        Ok(CameraFrame {
            width: rgb.width(),
            height: rgb.height(),
            data: rgb.into_raw(),
        })
    }
}

/// 最新帧的单槽缓存
///
/// 写方只有传输线程，读方任意；解码失败只告警、保留上一帧，
/// 绝不把坏帧或默认帧暴露给读侧。
#[derive(Default)]
pub struct FrameCell {
    slot: ArcSwapOption<CameraFrame>,
}

impl FrameCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解码并存入新帧；失败时保留当前帧
    pub fn ingest(&self, img: &CompressedImage) {
        match CameraFrame::decode(img) {
            Ok(frame) => {
                trace!(
                    width = frame.width,
                    height = frame.height,
                    "Camera frame decoded"
                );
                self.slot.store(Some(Arc::new(frame)));
            },
            Err(e) => {
                warn!("Dropping undecodable camera frame ({}): {}", img.format, e);
            },
        }
    }

    /// 最新帧快照；首帧到达前为 `None`
    pub fn latest(&self) -> Option<Arc<CameraFrame>> {
        self.slot.load_full()
    }
}
