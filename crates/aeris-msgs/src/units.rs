//! 强类型角度单位
//!
//! 使用 NewType 模式防止弧度/角度混淆：裸 `f64` 在转换和限幅之间
//! 容易拿错变量，这类错误在类型层面消除。
//!
//! # 示例
//!
//! ```rust
//! use aeris_msgs::{Deg, Rad};
//!
//! let pitch = Deg(90.0).to_rad();
//! assert!((pitch.0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
//! assert!((pitch.to_deg().0 - 90.0).abs() < 1e-12);
//! ```

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// 弧度（NewType）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Rad(pub f64);

impl Rad {
    /// 零弧度常量
    pub const ZERO: Self = Rad(0.0);

    /// π 弧度（180 度）
    pub const PI: Self = Rad(std::f64::consts::PI);

    /// 2π 弧度（360 度）
    pub const TAU: Self = Rad(std::f64::consts::TAU);

    /// 创建新的弧度值
    #[inline]
    pub const fn new(value: f64) -> Self {
        Rad(value)
    }

    /// 转换为角度
    #[inline]
    pub fn to_deg(self) -> Deg {
        Deg(self.0.to_degrees())
    }

    /// 获取原始值
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// 限制范围
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Rad(self.0.clamp(min.0, max.0))
    }
}

impl fmt::Display for Rad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

impl Add for Rad {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Rad(self.0 + rhs.0)
    }
}

impl Sub for Rad {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Rad(self.0 - rhs.0)
    }
}

impl Neg for Rad {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Rad(-self.0)
    }
}

impl From<Deg> for Rad {
    #[inline]
    fn from(deg: Deg) -> Self {
        deg.to_rad()
    }
}

/// 角度（NewType）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Deg(pub f64);

impl Deg {
    /// 零角度常量
    pub const ZERO: Self = Deg(0.0);

    /// 180 度
    pub const DEG_180: Self = Deg(180.0);

    /// 360 度
    pub const DEG_360: Self = Deg(360.0);

    /// 创建新的角度值
    #[inline]
    pub const fn new(value: f64) -> Self {
        Deg(value)
    }

    /// 转换为弧度
    #[inline]
    pub fn to_rad(self) -> Rad {
        Rad(self.0.to_radians())
    }

    /// 获取原始值
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// 限制范围
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Deg(self.0.clamp(min.0, max.0))
    }
}

impl fmt::Display for Deg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.0)
    }
}

impl Add for Deg {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Deg(self.0 + rhs.0)
    }
}

impl Sub for Deg {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Deg(self.0 - rhs.0)
    }
}

impl Neg for Deg {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Deg(-self.0)
    }
}

impl From<Rad> for Deg {
    #[inline]
    fn from(rad: Rad) -> Self {
        rad.to_deg()
    }
}
