//! 通用常量.

use num::Zero;

/// one-hot 矩阵文件的字节常量.
pub mod one_hot {
    /// 列分隔符.
    pub const SEPARATOR: u8 = b'\t';

    /// 行结束符.
    pub const LINE_END: u8 = b'\n';

    /// 指示位 "是".
    pub const ON: u8 = b'1';

    /// 指示位 "否".
    pub const OFF: u8 = b'0';
}

/// 标签是否代表前景? 任意大于零的值都视为前景.
#[inline]
pub fn is_present<T: PartialOrd + Zero>(label: T) -> bool {
    label > T::zero()
}

/// 体素二分类类型.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ElemType {
    /// 标签不大于零, 代表背景.
    Background,

    /// 标签大于零, 代表前景.
    Foreground,
}

impl ElemType {
    /// 由标签值判断类型.
    #[inline]
    pub fn from_label<T: PartialOrd + Zero>(label: T) -> Self {
        if is_present(label) {
            Self::Foreground
        } else {
            Self::Background
        }
    }

    /// 是否为前景.
    #[inline]
    pub fn is_foreground(&self) -> bool {
        matches!(self, Self::Foreground)
    }

    /// 是否为背景.
    #[inline]
    pub fn is_background(&self) -> bool {
        !self.is_foreground()
    }

    /// 二分类取值: 前景为 1, 背景为 0.
    #[inline]
    pub fn bit(&self) -> u8 {
        u8::from(self.is_foreground())
    }
}
