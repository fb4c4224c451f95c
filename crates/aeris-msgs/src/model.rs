//! 仿真器模型状态服务消息
//!
//! 对应 gazebo_msgs 的 SetModelState / GetModelState 服务形状。
//! 写入方向携带完整 [`ModelState`]；读取方向按模型名查询，仿真器
//! 返回权威位姿（ground truth）与瞬时速度。

use crate::geometry::{Pose, Twist};

/// 模型状态（写入仿真器的完整状态）
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelState {
    /// 仿真器命名空间内的模型名
    pub model_name: String,
    /// 目标位姿
    pub pose: Pose,
    /// 目标速度
    pub twist: Twist,
}

impl ModelState {
    /// 创建新的模型状态
    pub fn new(model_name: impl Into<String>, pose: Pose, twist: Twist) -> Self {
        ModelState {
            model_name: model_name.into(),
            pose,
            twist,
        }
    }
}

/// 设置模型状态的服务请求
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetModelStateRequest {
    /// 要写入的模型状态
    pub model_state: ModelState,
}

impl SetModelStateRequest {
    /// 创建新的设置请求
    pub fn new(model_state: ModelState) -> Self {
        SetModelStateRequest { model_state }
    }
}

/// 查询模型状态的服务请求
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GetModelStateRequest {
    /// 要查询的模型名
    pub model_name: String,
    /// 参考实体名（空串表示世界坐标系）
    pub relative_entity_name: String,
}

impl GetModelStateRequest {
    /// 以世界坐标系查询模型
    pub fn in_world_frame(model_name: impl Into<String>) -> Self {
        GetModelStateRequest {
            model_name: model_name.into(),
            relative_entity_name: String::new(),
        }
    }
}

/// 查询模型状态的服务响应
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GetModelStateResponse {
    /// 权威位姿
    pub pose: Pose,
    /// 瞬时速度
    pub twist: Twist,
    /// 查询是否命中
    pub success: bool,
    /// 失败时的说明
    pub status_message: String,
}
