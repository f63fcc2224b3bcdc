use std::ops::Index;

use ndarray::{Array3, ArrayBase, ArrayView3, Data, Ix3};
use num::Zero;

use crate::consts::is_present;
use crate::error::RocResult;
use crate::Idx3d;

pub mod axis;
mod io;
pub mod slice;

pub use axis::Axis;
pub use io::VolumeFormat;
pub use slice::{PosIter, VolumeSlice};

/// 3D 标签体数据的最小能力集合.
///
/// 分类流程只依赖形状和逐体素读取两种能力, 不关心数据来源.
/// 所有体数据统一按照 (x, y, z) 顺序访问.
pub trait Volume {
    /// 体素标签类型. 只有其是否大于零有意义.
    type Label: Copy + PartialOrd + Zero;

    /// 获取数据形状大小 (x, y, z).
    fn shape(&self) -> Idx3d;

    /// 获取给定位置的体素标签. 越界时返回 `None`.
    fn get(&self, pos: Idx3d) -> Option<Self::Label>;

    /// 获取 `axis` 方向上的长度.
    #[inline]
    fn extent(&self, axis: Axis) -> usize {
        axis.pick(self.shape())
    }

    /// 获取数据体素个数.
    #[inline]
    fn size(&self) -> usize {
        let (x, y, z) = self.shape();
        x * y * z
    }

    /// 给定位置的体素是否为前景 (标签大于零)? 越界视为背景.
    #[inline]
    fn is_present(&self, pos: Idx3d) -> bool {
        self.get(pos).is_some_and(is_present)
    }
}

impl<V: Volume + ?Sized> Volume for &V {
    type Label = V::Label;

    #[inline]
    fn shape(&self) -> Idx3d {
        (**self).shape()
    }

    #[inline]
    fn get(&self, pos: Idx3d) -> Option<Self::Label> {
        (**self).get(pos)
    }
}

/// 任意 `ndarray` 三维数组 (包括视图) 都可以直接作为体数据使用.
impl<S, T> Volume for ArrayBase<S, Ix3>
where
    S: Data<Elem = T>,
    T: Copy + PartialOrd + Zero,
{
    type Label = T;

    #[inline]
    fn shape(&self) -> Idx3d {
        self.dim()
    }

    #[inline]
    fn get(&self, pos: Idx3d) -> Option<T> {
        ArrayBase::get(self, pos).copied()
    }
}

/// 拥有所有权的 3D 标签体数据. 标签值以 `i32` 保存, 按照 (x, y, z) 组织.
///
/// 该结构加载后即只读.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVolume {
    data: Array3<i32>,
}

impl Volume for LabelVolume {
    type Label = i32;

    #[inline]
    fn shape(&self) -> Idx3d {
        self.data.dim()
    }

    #[inline]
    fn get(&self, pos: Idx3d) -> Option<i32> {
        self.data.get(pos).copied()
    }
}

impl Index<Idx3d> for LabelVolume {
    type Output = i32;

    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

impl From<Array3<i32>> for LabelVolume {
    #[inline]
    fn from(data: Array3<i32>) -> Self {
        Self { data }
    }
}

impl LabelVolume {
    /// 直接由 (x, y, z) 组织的数组创建.
    #[inline]
    pub fn new(data: Array3<i32>) -> Self {
        Self { data }
    }

    /// 由任意数值类型的三维数组创建. 数值向上取整后转换为 `i32`,
    /// 因此小数形式的正值仍然被视为前景.
    pub fn from_array<S, T>(data: &ArrayBase<S, Ix3>) -> Self
    where
        S: Data<Elem = T>,
        T: Copy + num::ToPrimitive,
    {
        Self {
            data: data.mapv(io::to_label),
        }
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView3<'_, i32> {
        self.data.view()
    }

    /// 取出底层数组.
    #[inline]
    pub fn into_inner(self) -> Array3<i32> {
        self.data
    }

    /// 获取 `axis` 方向上第 `index` 层切片.
    ///
    /// 当 `index` 越界时返回 `Err`.
    #[inline]
    pub fn slice_at(&self, axis: Axis, index: usize) -> RocResult<VolumeSlice<'_, i32>> {
        slice::slice_at(self.data.view(), axis, index)
    }

    /// 获取能按升序迭代 `axis` 方向所有切片的迭代器.
    #[inline]
    pub fn slice_iter(&self, axis: Axis) -> impl ExactSizeIterator<Item = VolumeSlice<'_, i32>> {
        slice::slice_iter(self.data.view(), axis)
    }

    /// 获取前景 (标签大于零) 体素个数.
    #[inline]
    pub fn count_present(&self) -> usize {
        self.data.iter().filter(|&&p| is_present(p)).count()
    }
}
