//! 切片方向.

use std::fmt;

use crate::Idx3d;

/// 体数据的三个坐标轴. 体数据统一按照 (x, y, z) 顺序组织.
///
/// 该值同时决定切片方向和切片个数 (即体数据在该方向上的长度).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// 第一维.
    X,

    /// 第二维.
    Y,

    /// 第三维, 也是默认切片方向.
    #[default]
    Z,
}

impl Axis {
    /// 全部坐标轴, 按 x, y, z 排列.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// 对应 `ndarray` 中的维度序号.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// 从三维形状中取出该轴方向上的长度.
    #[inline]
    pub const fn pick(self, (x, y, z): Idx3d) -> usize {
        match self {
            Self::X => x,
            Self::Y => y,
            Self::Z => z,
        }
    }

    /// 小写名称.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl From<Axis> for ndarray::Axis {
    #[inline]
    fn from(value: Axis) -> Self {
        ndarray::Axis(value.index())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
