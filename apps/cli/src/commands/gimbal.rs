//! 云台控制

use aeris_sdk::{Deg, DroneHandle, Rad};
use anyhow::Result;
use clap::Args;
use tracing::debug;

#[derive(Args, Debug)]
pub struct GimbalCommand {
    /// 目标 pitch
    #[arg(long)]
    pitch: f64,

    /// 目标 yaw
    #[arg(long)]
    yaw: f64,

    /// 输入按角度而非弧度解释
    #[arg(long)]
    degrees: bool,
}

impl GimbalCommand {
    pub fn execute(self, drone: &dyn DroneHandle) -> Result<()> {
        debug!(
            pitch = self.pitch,
            yaw = self.yaw,
            degrees = self.degrees,
            "gimbal command"
        );
        if self.degrees {
            drone.set_gimbal_deg(Deg(self.pitch), Deg(self.yaw))?;
        } else {
            drone.set_gimbal(Rad(self.pitch), Rad(self.yaw))?;
        }
        // 存储值可能被限幅，回显实际生效的角度
        println!("Gimbal set: {}", drone.gimbal());
        Ok(())
    }
}
