//! # Aeris 传输抽象层
//!
//! 提供指令/遥测总线的统一接口抽象 [`DroneBus`]，以及两个实现：
//! - [`LoopbackBus`]：进程内总线，持有按模型名索引的仿真 ground truth，
//!   用于测试和作为原生中间件的替身
//! - [`RosbridgeClient`]：经网关进程转发的客户端连接
//!   （TCP 上的按行分隔 JSON，op 标签协议）
//!
//! 句柄层（`aeris-sdk`）只面向 [`DroneBus`] 编程，构造时选择传输。

use aeris_msgs::{GetModelStateRequest, GetModelStateResponse, SetModelStateRequest, TopicMessage};
use thiserror::Error;

pub mod loopback;
pub mod rosbridge;

pub use loopback::LoopbackBus;
pub use rosbridge::RosbridgeClient;

/// 传输层统一错误类型
#[derive(Error, Debug)]
pub enum BusError {
    /// 底层 IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 线格式编解码失败
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// 连接已断开（网关退出或对端关闭）
    #[error("Transport disconnected")]
    Disconnected,

    /// 服务调用超时
    #[error("Service call timeout")]
    Timeout,

    /// 服务调用被对端拒绝
    #[error("Service '{service}' failed: {message}")]
    Service {
        /// 服务名
        service: String,
        /// 对端返回的说明
        message: String,
    },
}

/// 订阅回调
///
/// 在传输驱动的线程上逐条消息调用，可能与指令调用任意交错。
/// 回调内不要做阻塞操作。
pub type SubscriberFn = Box<dyn FnMut(&TopicMessage) + Send>;

/// 指令/遥测总线接口
///
/// 对应中间件提供的四个原语：
/// - 发后即忘的话题发布（一次调用一条消息，无重试、无背压）
/// - 同步写入模型状态（远程服务调用）
/// - 同步查询模型状态（ground truth）
/// - 话题订阅（回调按消息触发）
pub trait DroneBus: Send {
    /// 向命名话题发布一条消息（发后即忘）
    fn publish(&mut self, topic: &str, msg: &TopicMessage) -> Result<(), BusError>;

    /// 同步写入模型状态
    fn set_model_state(&mut self, req: &SetModelStateRequest) -> Result<(), BusError>;

    /// 同步查询模型状态
    fn get_model_state(
        &mut self,
        req: &GetModelStateRequest,
    ) -> Result<GetModelStateResponse, BusError>;

    /// 订阅命名话题，注册逐消息回调
    fn subscribe(&mut self, topic: &str, callback: SubscriberFn) -> Result<(), BusError>;
}
