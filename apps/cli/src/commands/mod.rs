//! 子命令实现

mod frame;
mod gimbal;
mod pose;
mod velocity;

pub use frame::FrameCommand;
pub use gimbal::GimbalCommand;
pub use pose::PoseCommand;
pub use velocity::VelocityCommand;

use aeris_sdk::{DroneHandle, Vector3};
use anyhow::{Result, bail};

/// 查询并打印当前位置与姿态
pub fn status(drone: &dyn DroneHandle) -> Result<()> {
    let pose = drone.pose()?;
    let (roll, pitch, yaw) = pose.orientation.to_euler();
    println!("model:       {}", drone.model_name());
    println!("position:    {}", pose.position);
    println!(
        "orientation: roll {:.3} rad, pitch {:.3} rad, yaw {:.3} rad",
        roll.0, pitch.0, yaw.0
    );
    println!("velocity:    {}", drone.velocity());
    println!("gimbal:      {}", drone.gimbal());
    Ok(())
}

/// 解析 "x,y,z" 形式的向量参数
pub(crate) fn parse_vector3(s: &str) -> Result<Vector3> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        bail!("expected 3 comma-separated components, got {}", parts.len());
    }
    let parse = |p: &str| -> Result<f64> {
        p.trim()
            .parse::<f64>()
            .map_err(|e| anyhow::anyhow!("invalid component '{}': {}", p, e))
    };
    Ok(Vector3::new(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vector3() {
        let v = parse_vector3("1,0,-0.5").unwrap();
        assert_eq!(v, Vector3::new(1.0, 0.0, -0.5));

        let v = parse_vector3(" 0.1 , 0.2 , 0.3 ").unwrap();
        assert_eq!(v, Vector3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_parse_vector3_rejects_bad_input() {
        assert!(parse_vector3("1,2").is_err());
        assert!(parse_vector3("1,2,3,4").is_err());
        assert!(parse_vector3("a,b,c").is_err());
    }
}
