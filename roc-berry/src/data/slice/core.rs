use ndarray::{ArrayView3, Slice};
use num::Zero;

use crate::data::{Axis, Volume};
use crate::error::{RocError, RocResult};
use crate::Idx3d;

/// 不可变、借用的体数据切片.
///
/// 切片仍然是三维的: 在切片方向上长度为 1, 其余两个方向保持原长度.
/// 切片内坐标从 0 开始, 与原体数据的坐标只在切片方向上相差 `index`.
#[derive(Debug, Clone, Copy)]
pub struct VolumeSlice<'a, T> {
    axis: Axis,
    index: usize,

    /// 底层数据的轻量级视图, 借用于原体数据.
    data: ArrayView3<'a, T>,
}

impl<'a, T> VolumeSlice<'a, T> {
    #[inline]
    fn new(axis: Axis, index: usize, data: ArrayView3<'a, T>) -> Self {
        debug_assert_eq!(data.len_of(axis.into()), 1);
        Self { axis, index, data }
    }

    /// 切片方向.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// 切片在原体数据中的序号.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// 获得 **底层** 数据的一份不可变 shallow copy.
    #[inline]
    pub fn array_view(&self) -> ArrayView3<'a, T> {
        self.data
    }

    /// 将切片内坐标转换为原体数据中的坐标.
    #[inline]
    pub fn to_parent(&self, (x, y, z): Idx3d) -> Idx3d {
        match self.axis {
            Axis::X => (x + self.index, y, z),
            Axis::Y => (x, y + self.index, z),
            Axis::Z => (x, y, z + self.index),
        }
    }
}

impl<T> Volume for VolumeSlice<'_, T>
where
    T: Copy + PartialOrd + Zero,
{
    type Label = T;

    #[inline]
    fn shape(&self) -> Idx3d {
        self.data.dim()
    }

    #[inline]
    fn get(&self, pos: Idx3d) -> Option<T> {
        self.data.get(pos).copied()
    }
}

/// 获取 `view` 在 `axis` 方向上第 `index` 层切片.
///
/// 结果在另外两个方向上保持完整长度. 当 `index` 越界时返回 `Err`.
pub fn slice_at<T>(
    view: ArrayView3<'_, T>,
    axis: Axis,
    index: usize,
) -> RocResult<VolumeSlice<'_, T>> {
    let extent = view.len_of(axis.into());
    if index >= extent {
        return Err(RocError::SliceOutOfBound {
            axis,
            index,
            extent,
        });
    }
    let mut data = view;
    data.slice_axis_inplace(axis.into(), Slice::from(index..index + 1));
    Ok(VolumeSlice::new(axis, index, data))
}

/// 获取能按升序迭代 `view` 在 `axis` 方向上所有切片的迭代器.
pub fn slice_iter<T>(
    view: ArrayView3<'_, T>,
    axis: Axis,
) -> impl ExactSizeIterator<Item = VolumeSlice<'_, T>> {
    let extent = view.len_of(axis.into());
    (0..extent).map(move |index| {
        let mut data = view;
        data.slice_axis_inplace(axis.into(), Slice::from(index..index + 1));
        VolumeSlice::new(axis, index, data)
    })
}
