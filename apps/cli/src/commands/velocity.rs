//! 速度指令

use super::parse_vector3;
use aeris_sdk::{DroneHandle, Vector3};
use anyhow::Result;
use clap::Args;
use tracing::debug;

#[derive(Args, Debug)]
pub struct VelocityCommand {
    /// 线速度 "x,y,z"（米/秒）
    #[arg(long, value_parser = parse_vector3)]
    linear: Vector3,

    /// 角速度 "x,y,z"（弧度/秒）
    #[arg(long, value_parser = parse_vector3, default_value = "0,0,0")]
    angular: Vector3,
}

impl VelocityCommand {
    pub fn execute(self, drone: &dyn DroneHandle) -> Result<()> {
        debug!(linear = %self.linear, angular = %self.angular, "velocity command");
        drone.set_velocity(self.linear, self.angular)?;
        println!("Velocity set: {}", drone.velocity());
        Ok(())
    }
}
