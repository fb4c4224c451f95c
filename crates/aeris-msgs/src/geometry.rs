//! 几何类型
//!
//! 提供 3D 向量、速度指令（Twist）、四元数和位姿的表示。
//!
//! # 设计目标
//!
//! - **线格式一致**: 字段名与中间件消息形状一一对应
//!   （`{linear: {x, y, z}, angular: {x, y, z}}`）
//! - **数值稳定**: 四元数归一化防止 NaN 传播
//! - **易用转换**: 欧拉角 ↔ 四元数

use crate::units::Rad;
use std::fmt;

/// 四元数归一化阈值（避免除零）
const QUATERNION_NORM_THRESHOLD: f64 = 1e-10;

/// 三维向量
///
/// 单位由上下文决定：位置为米，线速度为米/秒，角速度为弧度/秒。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    /// X 分量
    pub x: f64,
    /// Y 分量
    pub y: f64,
    /// Z 分量
    pub z: f64,
}

impl Vector3 {
    /// 零向量
    pub const ZERO: Self = Vector3::new(0.0, 0.0, 0.0);

    /// 创建新的三维向量
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    /// 计算向量长度（范数）
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// 速度指令（线速度 + 角速度）
///
/// 对应 geometry_msgs/Twist 的消息形状。句柄层缓存最近一次下发的
/// Twist 作为读回值（非传感器确认值）。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Twist {
    /// 线速度（米/秒）
    pub linear: Vector3,
    /// 角速度（弧度/秒）
    pub angular: Vector3,
}

impl Twist {
    /// 零速度
    pub const ZERO: Self = Twist {
        linear: Vector3::ZERO,
        angular: Vector3::ZERO,
    };

    /// 创建新的速度指令
    pub const fn new(linear: Vector3, angular: Vector3) -> Self {
        Twist { linear, angular }
    }
}

impl fmt::Display for Twist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Twist(linear: {}, angular: {})", self.linear, self.angular)
    }
}

/// 四元数（用于表示 3D 旋转）
///
/// 完整的单位四元数表示；欧拉角入口统一走 [`Quaternion::from_euler`]，
/// 不允许手填分量构造退化四元数（如 w=0 的全零姿态）。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    /// 虚部 i
    pub x: f64,
    /// 虚部 j
    pub y: f64,
    /// 虚部 k
    pub z: f64,
    /// 实部
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::IDENTITY
    }
}

impl Quaternion {
    /// 单位四元数（无旋转）
    pub const IDENTITY: Self = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// 从欧拉角创建四元数（Roll-Pitch-Yaw，ZYX 顺序）
    ///
    /// # 参数
    ///
    /// - `roll`: 绕 X 轴旋转
    /// - `pitch`: 绕 Y 轴旋转
    /// - `yaw`: 绕 Z 轴旋转
    pub fn from_euler(roll: Rad, pitch: Rad, yaw: Rad) -> Self {
        let cr = (roll.0 / 2.0).cos();
        let sr = (roll.0 / 2.0).sin();
        let cp = (pitch.0 / 2.0).cos();
        let sp = (pitch.0 / 2.0).sin();
        let cy = (yaw.0 / 2.0).cos();
        let sy = (yaw.0 / 2.0).sin();

        Quaternion {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
        }
    }

    /// 转换为欧拉角（Roll-Pitch-Yaw）
    ///
    /// 返回 `(roll, pitch, yaw)`
    pub fn to_euler(self) -> (Rad, Rad, Rad) {
        // Roll (x-axis rotation)
        let sinr_cosp = 2.0 * (self.w * self.x + self.y * self.z);
        let cosr_cosp = 1.0 - 2.0 * (self.x * self.x + self.y * self.y);
        let roll = Rad(sinr_cosp.atan2(cosr_cosp));

        // Pitch (y-axis rotation)
        let sinp = 2.0 * (self.w * self.y - self.z * self.x);
        let pitch = if sinp.abs() >= 1.0 {
            // Gimbal lock
            Rad(std::f64::consts::FRAC_PI_2.copysign(sinp))
        } else {
            Rad(sinp.asin())
        };

        // Yaw (z-axis rotation)
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        let yaw = Rad(siny_cosp.atan2(cosy_cosp));

        (roll, pitch, yaw)
    }

    /// 归一化（确保单位四元数）
    ///
    /// 如果四元数的模接近 0（< 1e-10），返回单位四元数以避免除零和
    /// NaN 扩散。仿真器在模型尚未初始化时可能返回全零姿态。
    pub fn normalize(&self) -> Self {
        let norm_sq = self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z;

        if norm_sq < QUATERNION_NORM_THRESHOLD {
            tracing::warn!(
                "Normalizing near-zero quaternion (norm²={:.2e}), returning identity",
                norm_sq
            );
            return Quaternion::IDENTITY;
        }

        let norm = norm_sq.sqrt();
        Quaternion {
            x: self.x / norm,
            y: self.y / norm,
            z: self.z / norm,
            w: self.w / norm,
        }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q({:.3}, {:.3}, {:.3}, {:.3})",
            self.w, self.x, self.y, self.z
        )
    }
}

/// 位姿（位置 + 姿态）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// 位置（米）
    pub position: Vector3,
    /// 姿态（四元数）
    pub orientation: Quaternion,
}

impl Pose {
    /// 从位置和欧拉角创建
    pub fn from_position_euler(position: Vector3, roll: Rad, pitch: Rad, yaw: Rad) -> Self {
        Pose {
            position,
            orientation: Quaternion::from_euler(roll, pitch, yaw),
        }
    }

    /// 零位姿（原点，无旋转）
    pub const ZERO: Self = Pose {
        position: Vector3::ZERO,
        orientation: Quaternion::IDENTITY,
    };
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pose(pos: {}, quat: {})", self.position, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_vector3_basic() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vector3_norm() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert!((v.norm() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_twist_zero() {
        assert_eq!(Twist::ZERO.linear, Vector3::ZERO);
        assert_eq!(Twist::ZERO.angular, Vector3::ZERO);
    }

    #[test]
    fn test_quaternion_identity() {
        let q = Quaternion::IDENTITY;
        assert_eq!(q.w, 1.0);
        assert_eq!(q.x, 0.0);
        assert_eq!(Quaternion::default(), q);
    }

    #[test]
    fn test_quaternion_euler_round_trip() {
        let quat = Quaternion::from_euler(Rad(0.1), Rad(0.2), Rad(0.3));
        let (roll, pitch, yaw) = quat.to_euler();

        assert!((roll.0 - 0.1).abs() < 1e-10);
        assert!((pitch.0 - 0.2).abs() < 1e-10);
        assert!((yaw.0 - 0.3).abs() < 1e-10);
    }

    #[test]
    fn test_quaternion_from_euler_is_unit() {
        let q = Quaternion::from_euler(Rad(1.0), Rad(-0.5), Rad(PI / 3.0));
        let norm_sq = q.w * q.w + q.x * q.x + q.y * q.y + q.z * q.z;
        assert!((norm_sq - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quaternion_near_zero_stability() {
        let zero = Quaternion {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 0.0,
        };
        let normalized = zero.normalize();
        assert!(!normalized.w.is_nan());
        assert_eq!(normalized, Quaternion::IDENTITY);
    }

    #[test]
    fn test_pose_from_position_euler() {
        let pose = Pose::from_position_euler(
            Vector3::new(1.0, 2.0, 3.0),
            Rad::ZERO,
            Rad::ZERO,
            Rad::ZERO,
        );
        assert_eq!(pose.position.z, 3.0);
        assert_eq!(pose.orientation, Quaternion::IDENTITY);
    }
}
