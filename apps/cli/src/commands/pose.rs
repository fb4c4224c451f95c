//! 位姿写入

use super::parse_vector3;
use aeris_sdk::{DroneHandle, Vector3};
use anyhow::Result;
use clap::Args;
use tracing::debug;

#[derive(Args, Debug)]
pub struct PoseCommand {
    /// 目标位置 "x,y,z"（米）
    #[arg(long, value_parser = parse_vector3)]
    position: Vector3,

    /// 目标姿态 "roll,pitch,yaw"（弧度）
    #[arg(long, value_parser = parse_vector3, default_value = "0,0,0")]
    orientation: Vector3,
}

impl PoseCommand {
    pub fn execute(self, drone: &dyn DroneHandle) -> Result<()> {
        debug!(position = %self.position, orientation = %self.orientation, "pose command");
        drone.set_pose(self.position, self.orientation)?;
        println!("Pose set: position {}", self.position);
        Ok(())
    }
}
