//! 仿真无人机句柄实现
//!
//! [`SimDrone`] 对任意 [`DroneBus`] 传输实现 [`DroneHandle`]：
//! 指令路径持锁走总线；相机帧与 IMU 采样由传输线程异步写入
//! 单槽缓存，读侧拿快照。

use crate::camera::{CameraFrame, FrameCell};
use crate::error::DroneError;
use crate::handle::DroneHandle;
use aeris_bus::DroneBus;
use aeris_msgs::{
    Float64, GetModelStateRequest, GimbalOrientation, ImuSample, ModelState, Pose, Rad,
    SetModelStateRequest, TopicMessage, Twist, Vector3, topics,
};
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace};

/// 仿真无人机句柄（泛型于传输）
pub struct SimDrone<B: DroneBus> {
    model_name: String,
    bus: Mutex<B>,
    velocity: Mutex<Twist>,
    gimbal: Mutex<GimbalOrientation>,
    frame: Arc<FrameCell>,
    imu: Arc<ArcSwapOption<ImuSample>>,
}

impl<B: DroneBus> SimDrone<B> {
    /// 在给定传输上创建句柄并注册遥测订阅
    ///
    /// # 参数
    /// - `model_name`: 模型在仿真命名空间中的名字（决定所有话题名）
    /// - `bus`: 传输实现，句柄独占持有
    ///
    /// # 错误
    /// - `DroneError::Bus`: 相机或 IMU 话题订阅失败
    pub fn new(model_name: impl Into<String>, mut bus: B) -> Result<Self, DroneError> {
        let model_name = model_name.into();
        let frame = Arc::new(FrameCell::new());
        let imu: Arc<ArcSwapOption<ImuSample>> = Arc::new(ArcSwapOption::empty());

        let frame_sink = frame.clone();
        bus.subscribe(
            &topics::camera_compressed(&model_name),
            Box::new(move |msg| {
                if let TopicMessage::CompressedImage(img) = msg {
                    frame_sink.ingest(img);
                }
            }),
        )?;

        let imu_sink = imu.clone();
        bus.subscribe(
            &topics::imu(&model_name),
            Box::new(move |msg| {
                if let TopicMessage::Imu(sample) = msg {
                    imu_sink.store(Some(Arc::new(*sample)));
                }
            }),
        )?;

        debug!(model = %model_name, "Drone handle created");
        Ok(SimDrone {
            model_name,
            bus: Mutex::new(bus),
            velocity: Mutex::new(Twist::ZERO),
            gimbal: Mutex::new(GimbalOrientation::default()),
            frame,
            imu,
        })
    }

    fn fetch_pose(&self) -> Result<Pose, DroneError> {
        let resp = self
            .bus
            .lock()
            .get_model_state(&GetModelStateRequest::in_world_frame(&self.model_name))?;
        Ok(Pose {
            position: resp.pose.position,
            orientation: resp.pose.orientation.normalize(),
        })
    }
}

impl<B: DroneBus> DroneHandle for SimDrone<B> {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn set_velocity(&self, linear: Vector3, angular: Vector3) -> Result<(), DroneError> {
        let twist = Twist::new(linear, angular);
        trace!(model = %self.model_name, %twist, "set_velocity");
        self.bus
            .lock()
            .publish(&topics::cmd_vel(&self.model_name), &TopicMessage::Twist(twist))?;
        *self.velocity.lock() = twist;
        Ok(())
    }

    fn velocity(&self) -> Twist {
        *self.velocity.lock()
    }

    fn set_pose(&self, position: Vector3, orientation: Vector3) -> Result<(), DroneError> {
        let pose = Pose::from_position_euler(
            position,
            Rad(orientation.x),
            Rad(orientation.y),
            Rad(orientation.z),
        );
        self.set_pose_full(&pose)
    }

    fn set_pose_full(&self, pose: &Pose) -> Result<(), DroneError> {
        trace!(model = %self.model_name, %pose, "set_pose");
        let state = ModelState::new(self.model_name.clone(), *pose, Twist::ZERO);
        self.bus
            .lock()
            .set_model_state(&SetModelStateRequest::new(state))?;
        Ok(())
    }

    fn position(&self) -> Result<Vector3, DroneError> {
        Ok(self.fetch_pose()?.position)
    }

    fn orientation(&self) -> Result<Vector3, DroneError> {
        let (roll, pitch, yaw) = self.fetch_pose()?.orientation.to_euler();
        Ok(Vector3::new(roll.0, pitch.0, yaw.0))
    }

    fn pose(&self) -> Result<Pose, DroneError> {
        self.fetch_pose()
    }

    fn set_gimbal(&self, pitch: Rad, yaw: Rad) -> Result<(), DroneError> {
        let target = GimbalOrientation::new(pitch, yaw);
        trace!(model = %self.model_name, %target, "set_gimbal");

        let mut bus = self.bus.lock();
        bus.publish(
            &topics::gimbal_pitch_command(&self.model_name),
            &TopicMessage::Float64(Float64::new(target.pitch().0)),
        )?;
        bus.publish(
            &topics::gimbal_yaw_command(&self.model_name),
            &TopicMessage::Float64(Float64::new(target.yaw().0)),
        )?;
        drop(bus);

        *self.gimbal.lock() = target;
        Ok(())
    }

    fn gimbal(&self) -> GimbalOrientation {
        *self.gimbal.lock()
    }

    fn camera_frame(&self) -> Option<Arc<CameraFrame>> {
        self.frame.latest()
    }

    fn imu(&self) -> Result<Option<ImuSample>, DroneError> {
        Ok(self.imu.load_full().map(|sample| *sample))
    }
}
