//! 无人机句柄契约
//!
//! [`DroneHandle`] 是面向调用方的统一能力面，对象安全，
//! 与具体传输无关。两种传输（进程内总线、网关客户端）共用
//! 同一实现 [`crate::SimDrone`]，构造时选择。

use crate::camera::CameraFrame;
use crate::error::DroneError;
use aeris_msgs::{Deg, GimbalOrientation, ImuSample, Pose, Rad, Twist, Vector3};
use std::sync::Arc;

/// 仿真无人机句柄
///
/// # 语义要点
/// - 速度是"设什么读什么"的缓存回显，不经传感器确认
/// - 位置/姿态查询是同步的 ground-truth 服务往返
/// - 云台角度一律先换算后截断，存储值保证在合法区间内
/// - 相机帧/IMU 是异步到达的最新值快照，首条到达前为空
pub trait DroneHandle: Send {
    /// 模型在仿真命名空间中的名字
    fn model_name(&self) -> &str;

    /// 发布一条速度指令并缓存
    ///
    /// 发后即忘：不校验、不等待确认。传输失败时向上传播。
    fn set_velocity(&self, linear: Vector3, angular: Vector3) -> Result<(), DroneError>;

    /// 上次设置的速度（缓存回显，无往返）
    fn velocity(&self) -> Twist;

    /// 瞬移到指定位置与姿态（欧拉角 roll/pitch/yaw，弧度）
    fn set_pose(&self, position: Vector3, orientation: Vector3) -> Result<(), DroneError>;

    /// 瞬移到指定完整位姿（四元数姿态）
    fn set_pose_full(&self, pose: &Pose) -> Result<(), DroneError>;

    /// 查询当前真实位置（一次服务往返）
    fn position(&self) -> Result<Vector3, DroneError>;

    /// 查询当前真实姿态，以欧拉角返回（一次服务往返）
    fn orientation(&self) -> Result<Vector3, DroneError>;

    /// 查询当前完整位姿（一次服务往返，取两半）
    fn pose(&self) -> Result<Pose, DroneError>;

    /// 设置云台角度（弧度）
    ///
    /// 超出区间的输入被截断到 pitch ∈ [0, π]、yaw ∈ [−2π, 2π]，
    /// 截断是策略而不是错误。
    fn set_gimbal(&self, pitch: Rad, yaw: Rad) -> Result<(), DroneError>;

    /// 设置云台角度（度）；先换算成弧度再截断
    fn set_gimbal_deg(&self, pitch: Deg, yaw: Deg) -> Result<(), DroneError> {
        self.set_gimbal(pitch.to_rad(), yaw.to_rad())
    }

    /// 上次设置的云台角度（截断后的存储值）
    fn gimbal(&self) -> GimbalOrientation;

    /// 最新解码的相机帧；首帧到达前为 `None`
    fn camera_frame(&self) -> Option<Arc<CameraFrame>>;

    /// 最新 IMU 采样；首条到达前为 `Ok(None)`
    fn imu(&self) -> Result<Option<ImuSample>, DroneError>;

    /// 起飞（仿真环境不支持）
    fn take_off(&self) -> Result<(), DroneError> {
        Err(DroneError::Unsupported("take_off"))
    }

    /// 降落（仿真环境不支持）
    fn land(&self) -> Result<(), DroneError> {
        Err(DroneError::Unsupported("land"))
    }

    /// 仿真时钟（仿真环境不提供）
    fn simulation_time(&self) -> Result<f64, DroneError> {
        Err(DroneError::Unsupported("simulation_time"))
    }

    /// 复位到初始悬停状态
    ///
    /// 序列：向上速度脉冲 `[0,0,1]` → 停止 `[0,0,0]` → 位姿写回
    /// 位置 `[0,0,1]`、零姿态。不检查成功与否；结束后速度缓存为零。
    fn reset(&self) -> Result<(), DroneError> {
        self.set_velocity(Vector3::new(0.0, 0.0, 1.0), Vector3::ZERO)?;
        self.set_velocity(Vector3::ZERO, Vector3::ZERO)?;
        self.set_pose(Vector3::new(0.0, 0.0, 1.0), Vector3::ZERO)
    }
}
