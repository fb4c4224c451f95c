//! # Aeris 消息类型层
//!
//! 本模块提供仿真无人机 SDK 的消息和单位类型，包括：
//! - 强类型角度单位（`Rad` / `Deg`）
//! - 几何类型（`Vector3`、`Twist`、`Quaternion`、`Pose`）
//! - 云台朝向（`GimbalOrientation`，构造即限幅）
//! - 仿真器服务消息（`ModelState` 等，gazebo_msgs 形状）
//! - 话题/服务名称构造（`topics` 模块）
//!
//! # 使用场景
//!
//! 消息类型在传输层（`aeris-bus`）和句柄层（`aeris-sdk`）之间共享。
//! 所有类型在启用 `serde` feature 时可直接序列化为网关 JSON 线格式。

mod geometry;
mod gimbal;
mod image;
mod imu;
mod model;
pub mod topics;
mod units;

pub use geometry::{Pose, Quaternion, Twist, Vector3};
pub use gimbal::GimbalOrientation;
pub use image::CompressedImage;
pub use imu::ImuSample;
pub use model::{GetModelStateRequest, GetModelStateResponse, ModelState, SetModelStateRequest};
pub use units::{Deg, Rad};

/// 话题消息（可发布/订阅的消息集合）
///
/// 对应原生中间件上按话题传输的消息类型。服务调用（模型状态读写）
/// 不经过此枚举，见 [`SetModelStateRequest`] / [`GetModelStateRequest`]。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TopicMessage {
    /// 速度指令（geometry_msgs/Twist）
    Twist(Twist),
    /// 标量指令（std_msgs/Float64，云台控制器输入）
    Float64(Float64),
    /// 压缩图像（sensor_msgs/CompressedImage）
    CompressedImage(CompressedImage),
    /// IMU 采样（sensor_msgs/Imu）
    Imu(ImuSample),
}

/// std_msgs/Float64 的消息形状
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Float64 {
    /// 标量值
    pub data: f64,
}

impl Float64 {
    /// 创建新的标量消息
    pub const fn new(data: f64) -> Self {
        Float64 { data }
    }
}

impl From<f64> for Float64 {
    fn from(data: f64) -> Self {
        Float64 { data }
    }
}
