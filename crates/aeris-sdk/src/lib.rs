//! # Aeris SDK
//!
//! 面向仿真环境的无人机客户端 SDK。提供统一的句柄抽象
//! [`DroneHandle`]，覆盖速度指令、位姿读写、云台控制、相机帧
//! 与 IMU 遥测；传输可选进程内总线或网关客户端，构造时通过
//! [`DroneBuilder`] 选定。
//!
//! # 快速上手
//!
//! ```no_run
//! use aeris_sdk::{DroneBuilder, DroneHandle, Vector3};
//!
//! let drone = DroneBuilder::new("uav1").connect_gateway("127.0.0.1:9090")?;
//!
//! // 前向 1 m/s，带 0.5 rad/s 偏航
//! drone.set_velocity(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.5))?;
//!
//! let position = drone.position()?;
//! println!("at {position}");
//! # Ok::<(), aeris_sdk::DroneError>(())
//! ```

pub mod builder;
pub mod camera;
pub mod drone;
pub mod error;
pub mod handle;

pub use builder::DroneBuilder;
pub use camera::{CameraFrame, FrameCell};
pub use drone::SimDrone;
pub use error::DroneError;
pub use handle::DroneHandle;

// 消息层类型直接转出，调用方不必另行依赖 aeris-msgs
pub use aeris_bus::{BusError, DroneBus, LoopbackBus, RosbridgeClient};
pub use aeris_msgs::{
    CompressedImage, Deg, Float64, GimbalOrientation, ImuSample, Pose, Quaternion, Rad,
    TopicMessage, Twist, Vector3,
};
