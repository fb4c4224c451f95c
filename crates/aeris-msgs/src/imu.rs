//! IMU 采样消息
//!
//! 对应 sensor_msgs/Imu 的核心字段：姿态、角速度、线加速度。
//! 协方差矩阵对本 SDK 的消费者没有用处，不搬运。

use crate::geometry::{Quaternion, Vector3};

/// IMU 采样
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImuSample {
    /// 姿态（四元数）
    pub orientation: Quaternion,
    /// 角速度（弧度/秒）
    pub angular_velocity: Vector3,
    /// 线加速度（米/秒²）
    pub linear_acceleration: Vector3,
}

impl ImuSample {
    /// 创建新的 IMU 采样
    pub const fn new(
        orientation: Quaternion,
        angular_velocity: Vector3,
        linear_acceleration: Vector3,
    ) -> Self {
        ImuSample {
            orientation,
            angular_velocity,
            linear_acceleration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imu_sample_default() {
        let sample = ImuSample::default();
        assert_eq!(sample.orientation, Quaternion::IDENTITY);
        assert_eq!(sample.angular_velocity, Vector3::ZERO);
        assert_eq!(sample.linear_acceleration, Vector3::ZERO);
    }
}
