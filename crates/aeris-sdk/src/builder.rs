//! 句柄构造器
//!
//! 传输在构造时选定，之后调用方只面向 [`DroneHandle`]。

use crate::drone::SimDrone;
use crate::error::DroneError;
use aeris_bus::{DroneBus, LoopbackBus, RosbridgeClient};
use std::net::ToSocketAddrs;
use std::time::Duration;

/// 无人机句柄构造器
///
/// # 示例
///
/// ```no_run
/// use aeris_sdk::DroneBuilder;
///
/// let drone = DroneBuilder::new("uav1")
///     .connect_gateway("127.0.0.1:9090")?;
/// # Ok::<(), aeris_sdk::DroneError>(())
/// ```
pub struct DroneBuilder {
    model_name: String,
    call_timeout: Option<Duration>,
}

impl DroneBuilder {
    /// 创建构造器；模型名是必填项，库内没有默认模型
    pub fn new(model_name: impl Into<String>) -> Self {
        DroneBuilder {
            model_name: model_name.into(),
            call_timeout: None,
        }
    }

    /// 网关服务调用超时（仅对网关传输生效，默认 5 秒）
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// 在任意传输上创建句柄
    pub fn connect<B: DroneBus>(self, bus: B) -> Result<SimDrone<B>, DroneError> {
        SimDrone::new(self.model_name, bus)
    }

    /// 在进程内回环总线上创建句柄（测试/演示）
    ///
    /// 总线按克隆共享状态，调用方保留的那份可用于观察和注入。
    pub fn connect_loopback(self, bus: &LoopbackBus) -> Result<SimDrone<LoopbackBus>, DroneError> {
        SimDrone::new(self.model_name, bus.clone())
    }

    /// 连接网关进程并在其上创建句柄
    ///
    /// # 错误
    /// - `DroneError::Bus`: TCP 连接失败或订阅发送失败
    pub fn connect_gateway(
        self,
        addr: impl ToSocketAddrs,
    ) -> Result<SimDrone<RosbridgeClient>, DroneError> {
        let mut client = RosbridgeClient::connect(addr).map_err(DroneError::Bus)?;
        if let Some(timeout) = self.call_timeout {
            client = client.with_call_timeout(timeout);
        }
        SimDrone::new(self.model_name, client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::DroneHandle;

    #[test]
    fn test_builder_keeps_model_name() {
        let bus = LoopbackBus::new();
        bus.spawn_model("quadrotor");
        let drone = DroneBuilder::new("quadrotor")
            .connect_loopback(&bus)
            .expect("create drone");
        assert_eq!(drone.model_name(), "quadrotor");
    }
}
