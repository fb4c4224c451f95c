//! 句柄层错误类型

use aeris_bus::BusError;
use thiserror::Error;

/// 句柄层统一错误类型
#[derive(Error, Debug)]
pub enum DroneError {
    /// 传输层失败（连接断开、服务调用失败、编解码错误）
    #[error("Transport error: {0}")]
    Bus(#[from] BusError),

    /// 相机帧解码失败
    ///
    /// 只出现在入站解码路径上，指令调用永远不会返回这个变体。
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// 仿真环境不支持的操作
    ///
    /// 显式失败而不是静默空操作，调用方能区分"做了"和"做不了"。
    #[error("Operation not supported in simulation: {0}")]
    Unsupported(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = DroneError::Unsupported("take_off");
        assert_eq!(
            format!("{}", err),
            "Operation not supported in simulation: take_off"
        );
    }

    #[test]
    fn test_from_bus_error() {
        let err: DroneError = BusError::Timeout.into();
        assert!(matches!(err, DroneError::Bus(BusError::Timeout)));
    }
}
