//! 逐体素二分类与累积.

use crate::consts::ElemType;
use crate::data::{Axis, PosIter, Volume};
use crate::error::{RocError, RocResult};

use super::ConfusionMatrix;

/// 跨切片累积的二分类序列.
///
/// 内部同时持有 `target` (真值) 与 `output` (待测结果) 两条序列.
/// 二者只能通过 [`Classification::push`] 同步增长, 因此任意时刻长度相等,
/// 且同一下标描述同一个体素.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    target: Vec<u8>,
    output: Vec<u8>,
}

impl Classification {
    /// 创建空序列.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建空序列, 并预留 `capacity` 个观测的空间.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            target: Vec::with_capacity(capacity),
            output: Vec::with_capacity(capacity),
        }
    }

    /// 观测个数.
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.target.len(), self.output.len());
        self.target.len()
    }

    /// 是否没有任何观测?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 真值序列.
    #[inline]
    pub fn target(&self) -> &[u8] {
        &self.target
    }

    /// 待测结果序列.
    #[inline]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// 同步追加一个观测.
    #[inline]
    pub fn push(&mut self, ground_truth: ElemType, test: ElemType) {
        self.target.push(ground_truth.bit());
        self.output.push(test.bit());
    }

    /// 统计当前序列的混淆矩阵.
    pub fn confusion(&self) -> ConfusionMatrix {
        self.target
            .iter()
            .zip(self.output.iter())
            .map(|(&gt, &test)| (gt > 0, test > 0))
            .collect()
    }

    /// 对一组 (待测, 真值, 可选区域) 切片分类, 并追加到序列末尾.
    ///
    /// 按照 x → y → z (z 变化最快) 的顺序访问每个体素. 若给出了区域掩码,
    /// 且其在 x 方向上长度非零, 则只有掩码大于零的体素会被记录; 否则记录全部体素.
    ///
    /// 返回本次追加的观测个数. 若三者形状不一致则返回 `Err`, 且不追加任何内容.
    pub fn accumulate<T, G, R>(
        &mut self,
        test: &T,
        gt: &G,
        region: Option<&R>,
    ) -> RocResult<usize>
    where
        T: Volume + ?Sized,
        G: Volume + ?Sized,
        R: Volume + ?Sized,
    {
        let shape = test.shape();
        if gt.shape() != shape {
            return Err(RocError::ShapeMismatch {
                what: "ground truth",
                expected: shape,
                found: gt.shape(),
            });
        }
        // x 方向长度为零的区域掩码等同于没有掩码.
        let region = region.filter(|r| r.extent(Axis::X) > 0);
        if let Some(r) = region {
            if r.shape() != shape {
                return Err(RocError::ShapeMismatch {
                    what: "region",
                    expected: shape,
                    found: r.shape(),
                });
            }
        }

        let before = self.len();
        for pos in PosIter::new(shape) {
            if region.is_some_and(|r| !r.is_present(pos)) {
                continue;
            }
            let ground_truth = ElemType::from_label(gt.get(pos).unwrap_or_else(num::zero));
            let output = ElemType::from_label(test.get(pos).unwrap_or_else(num::zero));
            self.push(ground_truth, output);
        }
        Ok(self.len() - before)
    }
}

/// 对一组 (待测, 真值, 可选区域) 切片分类, 并追加到 `acc`.
///
/// 等价于 [`Classification::accumulate`].
#[inline]
pub fn classify<T, G, R>(
    test: &T,
    gt: &G,
    region: Option<&R>,
    acc: &mut Classification,
) -> RocResult<usize>
where
    T: Volume + ?Sized,
    G: Volume + ?Sized,
    R: Volume + ?Sized,
{
    acc.accumulate(test, gt, region)
}
