//! 相机帧落盘

use aeris_sdk::DroneHandle;
use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Args, Debug)]
pub struct FrameCommand {
    /// 输出文件（按扩展名推断格式，如 frame.png）
    #[arg(long, short)]
    output: PathBuf,

    /// 等待首帧的最长秒数
    #[arg(long, default_value_t = 5)]
    wait: u64,
}

impl FrameCommand {
    pub fn execute(self, drone: &dyn DroneHandle) -> Result<()> {
        debug!(output = %self.output.display(), wait = self.wait, "frame command");
        let deadline = Instant::now() + Duration::from_secs(self.wait);
        let frame = loop {
            if let Some(frame) = drone.camera_frame() {
                break frame;
            }
            if Instant::now() >= deadline {
                bail!("no camera frame arrived within {} s", self.wait);
            }
            std::thread::sleep(Duration::from_millis(50));
        };

        let buffer = image::RgbImage::from_raw(frame.width, frame.height, frame.data.clone())
            .context("frame buffer size mismatch")?;
        buffer
            .save(&self.output)
            .with_context(|| format!("failed to write {}", self.output.display()))?;

        println!(
            "Saved {}x{} frame to {}",
            frame.width,
            frame.height,
            self.output.display()
        );
        Ok(())
    }
}
