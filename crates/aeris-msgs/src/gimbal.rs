//! 云台朝向
//!
//! 相机云台的 pitch/yaw 朝向，内部始终以弧度存储。
//!
//! # 限幅策略
//!
//! 构造时**先完成单位转换、再对转换后的值限幅**。该策略对弧度和
//! 角度两个入口完全一致，任何输入的限幅结果都是唯一的确定值。

use crate::units::{Deg, Rad};
use std::fmt;

/// 云台朝向（pitch/yaw，内部为弧度）
///
/// 不变量：`pitch ∈ [0, π]`，`yaw ∈ [-2π, 2π]`。构造函数保证该不变量，
/// 因此持有该类型的值即可认为范围有效。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GimbalOrientation {
    pitch: Rad,
    yaw: Rad,
}

impl GimbalOrientation {
    /// pitch 下限
    pub const PITCH_MIN: Rad = Rad::ZERO;
    /// pitch 上限
    pub const PITCH_MAX: Rad = Rad::PI;
    /// yaw 下限
    pub const YAW_MIN: Rad = Rad(-std::f64::consts::TAU);
    /// yaw 上限
    pub const YAW_MAX: Rad = Rad::TAU;

    /// 从弧度创建云台朝向（超界输入限幅，不拒绝）
    pub fn new(pitch: Rad, yaw: Rad) -> Self {
        GimbalOrientation {
            pitch: pitch.clamp(Self::PITCH_MIN, Self::PITCH_MAX),
            yaw: yaw.clamp(Self::YAW_MIN, Self::YAW_MAX),
        }
    }

    /// 从角度创建云台朝向（先转弧度，再限幅）
    pub fn from_deg(pitch: Deg, yaw: Deg) -> Self {
        Self::new(pitch.to_rad(), yaw.to_rad())
    }

    /// pitch（弧度）
    #[inline]
    pub fn pitch(&self) -> Rad {
        self.pitch
    }

    /// yaw（弧度）
    #[inline]
    pub fn yaw(&self) -> Rad {
        self.yaw
    }

    /// pitch（角度）
    #[inline]
    pub fn pitch_deg(&self) -> Deg {
        self.pitch.to_deg()
    }

    /// yaw（角度）
    #[inline]
    pub fn yaw_deg(&self) -> Deg {
        self.yaw.to_deg()
    }
}

impl fmt::Display for GimbalOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gimbal(pitch: {}, yaw: {})", self.pitch, self.yaw)
    }
}
