//! 完整流程: 逐切片分类累积, 然后写出两个 one-hot 矩阵.

use std::io::Write;
use std::path::Path;

use ndarray::ArrayView3;
use num::Zero;

use super::{Classification, ConfusionMatrix, OneHotFormat, OneHotWrite};
use crate::data::slice::slice_at;
use crate::data::{Axis, LabelVolume, Volume};
use crate::error::{RocError, RocResult};
use crate::Idx3d;

/// 一次运行的统计信息.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocSummary {
    /// 切片方向.
    pub axis: Axis,

    /// 访问的切片个数, 即体数据在 `axis` 方向上的长度.
    pub slices: usize,

    /// 观测个数, 即矩阵的列数.
    pub observations: usize,

    /// 被区域掩码排除的体素个数.
    pub excluded: usize,

    /// 全部观测的混淆矩阵.
    pub confusion: ConfusionMatrix,
}

/// 检查 `found` 是否与基准形状 `expected` 一致.
#[inline]
fn ensure_shape(what: &'static str, expected: Idx3d, found: Idx3d) -> RocResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(RocError::ShapeMismatch {
            what,
            expected,
            found,
        })
    }
}

/// x 方向长度为零的区域掩码视为不存在.
fn effective_region<R: Volume>(region: Option<R>) -> Option<R> {
    region.filter(|r| {
        let usable = r.extent(Axis::X) > 0;
        if !usable {
            log::warn!("region mask has zero extent along x, ignoring it");
        }
        usable
    })
}

/// 沿 `axis` 方向逐切片分类, 返回累积的序列和统计信息.
///
/// 三个体数据的形状必须一致 (区域掩码被忽略时除外), 否则在访问任何切片之前返回 `Err`.
pub fn accumulate_along<T, G, R>(
    test: ArrayView3<'_, T>,
    gt: ArrayView3<'_, G>,
    region: Option<ArrayView3<'_, R>>,
    axis: Axis,
) -> RocResult<(Classification, RocSummary)>
where
    T: Copy + PartialOrd + Zero,
    G: Copy + PartialOrd + Zero,
    R: Copy + PartialOrd + Zero,
{
    let shape = test.dim();
    ensure_shape("ground truth", shape, gt.dim())?;
    let region = effective_region(region);
    if let Some(r) = &region {
        ensure_shape("region", shape, r.dim())?;
    }

    let max_s = test.extent(axis);
    log::info!("slicing along {axis}: {max_s} slices, volume shape {shape:?}");

    let mut acc = Classification::with_capacity(test.len());
    let mut excluded = 0;
    for s in 0..max_s {
        let test_s = slice_at(test, axis, s)?;
        let gt_s = slice_at(gt, axis, s)?;
        let region_s = region.map(|r| slice_at(r, axis, s)).transpose()?;

        let n = acc.accumulate(&test_s, &gt_s, region_s.as_ref())?;
        excluded += test_s.size() - n;
        log::debug!("slice {axis}={s}: {n} observations");
    }

    let summary = RocSummary {
        axis,
        slices: max_s,
        observations: acc.len(),
        excluded,
        confusion: acc.confusion(),
    };
    Ok((acc, summary))
}

/// 完整流程: 逐切片分类, 然后依次将 `target` 和 `output` 序列写成 one-hot 矩阵.
pub fn compute_roc<T, G, R, W1, W2>(
    test: ArrayView3<'_, T>,
    gt: ArrayView3<'_, G>,
    region: Option<ArrayView3<'_, R>>,
    axis: Axis,
    target: W1,
    output: W2,
    format: OneHotFormat,
) -> RocResult<RocSummary>
where
    T: Copy + PartialOrd + Zero,
    G: Copy + PartialOrd + Zero,
    R: Copy + PartialOrd + Zero,
    W1: Write,
    W2: Write,
{
    let (acc, summary) = accumulate_along(test, gt, region, axis)?;
    acc.target().write_one_hot(target, format)?;
    acc.output().write_one_hot(output, format)?;
    Ok(summary)
}

/// 一次运行的全部输入. 该结构拥有三个体数据, 其余组件只借用它们.
///
/// 创建时即检查形状一致性.
#[derive(Debug, Clone)]
pub struct RocInputs {
    test: LabelVolume,
    ground_truth: LabelVolume,
    region: Option<LabelVolume>,
}

impl RocInputs {
    /// 由已加载的体数据创建. 若形状不一致则返回 `Err`.
    pub fn new(
        test: LabelVolume,
        ground_truth: LabelVolume,
        region: Option<LabelVolume>,
    ) -> RocResult<Self> {
        let shape = test.shape();
        ensure_shape("ground truth", shape, ground_truth.shape())?;
        let region = effective_region(region);
        if let Some(r) = &region {
            ensure_shape("region", shape, r.shape())?;
        }
        Ok(Self {
            test,
            ground_truth,
            region,
        })
    }

    /// 分别打开待测结果、真值和可选区域掩码文件.
    /// 如果任一文件打开失败或形状不一致, 则返回 `Err`.
    pub fn open<P: AsRef<Path>>(test: P, ground_truth: P, region: Option<P>) -> RocResult<Self> {
        let open = |what: &str, path: &Path| {
            log::info!("loading {what} from {}", path.display());
            LabelVolume::open(path)
        };
        let test = open("test", test.as_ref())?;
        let ground_truth = open("ground truth", ground_truth.as_ref())?;
        let region = region.map(|p| open("region", p.as_ref())).transpose()?;
        Self::new(test, ground_truth, region)
    }

    /// 数据形状大小 (x, y, z).
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.test.shape()
    }

    /// 待测结果.
    #[inline]
    pub fn test(&self) -> &LabelVolume {
        &self.test
    }

    /// 真值.
    #[inline]
    pub fn ground_truth(&self) -> &LabelVolume {
        &self.ground_truth
    }

    /// 区域掩码 (若有).
    #[inline]
    pub fn region(&self) -> Option<&LabelVolume> {
        self.region.as_ref()
    }

    /// 沿 `axis` 方向逐切片分类.
    pub fn classify(&self, axis: Axis) -> RocResult<(Classification, RocSummary)> {
        accumulate_along(
            self.test.data(),
            self.ground_truth.data(),
            self.region.as_ref().map(LabelVolume::data),
            axis,
        )
    }

    /// 沿 `axis` 方向逐切片分类, 然后写出两个 one-hot 矩阵.
    pub fn compute_roc<W1: Write, W2: Write>(
        &self,
        axis: Axis,
        target: W1,
        output: W2,
        format: OneHotFormat,
    ) -> RocResult<RocSummary> {
        compute_roc(
            self.test.data(),
            self.ground_truth.data(),
            self.region.as_ref().map(LabelVolume::data),
            axis,
            target,
            output,
            format,
        )
    }

    /// 与 [`RocInputs::compute_roc`] 相同, 但直接写入文件. 已存在的文件会被覆盖.
    ///
    /// 文件只在分类全部完成后才会创建.
    pub fn save_roc<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        axis: Axis,
        target_path: P,
        output_path: Q,
        format: OneHotFormat,
    ) -> RocResult<RocSummary> {
        let (acc, summary) = self.classify(axis)?;
        acc.target().save_one_hot(target_path, format)?;
        acc.output().save_one_hot(output_path, format)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::{accumulate_along, compute_roc, RocInputs};
    use crate::data::{Axis, LabelVolume, Volume};
    use crate::error::RocError;
    use crate::roc::OneHotFormat;
    use ndarray::{arr3, Array3, ArrayView3};

    fn no_region<'a>() -> Option<ArrayView3<'a, i32>> {
        None
    }

    fn two_corners() -> Array3<i32> {
        // [x][y][z], 仅 (0, 0, 0) 与 (1, 1, 1) 为前景.
        arr3(&[[[1, 0], [0, 0]], [[0, 0], [0, 1]]])
    }

    #[test]
    fn test_scenario_identical_volumes_along_z() {
        let v = two_corners();
        let (acc, summary) = accumulate_along(v.view(), v.view(), no_region(), Axis::Z).unwrap();
        assert_eq!(acc.target(), &[1, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(acc.output(), &[1, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(summary.slices, 2);
        assert_eq!(summary.observations, 8);
        assert_eq!(summary.excluded, 0);

        let (mut t, mut o) = (Vec::new(), Vec::new());
        compute_roc(
            v.view(),
            v.view(),
            no_region(),
            Axis::Z,
            &mut t,
            &mut o,
            OneHotFormat::default(),
        )
        .unwrap();
        assert_eq!(t, b"1\t0\t0\t0\t0\t0\t0\t1\t\n0\t1\t1\t1\t1\t1\t1\t0\t");
        assert_eq!(t, o);
    }

    #[test]
    fn test_axis_changes_order_not_content() {
        // 沿 x 切片时, 每个切片内仍然按 y → z 访问.
        let v = Array3::from_shape_fn((2, 3, 4), |(x, y, z)| ((x + 2 * y + z) % 3 == 0) as i32);
        let (by_x, _) = accumulate_along(v.view(), v.view(), no_region(), Axis::X).unwrap();
        let expected: Vec<u8> = v.iter().map(|&p| p as u8).collect();
        assert_eq!(by_x.target(), expected.as_slice());

        for axis in Axis::ALL {
            let (acc, summary) = accumulate_along(v.view(), v.view(), no_region(), axis).unwrap();
            assert_eq!(summary.slices, v.extent(axis));
            assert_eq!(acc.len(), 24);
            assert_eq!(
                acc.target().iter().filter(|&&b| b == 1).count(),
                expected.iter().filter(|&&b| b == 1).count()
            );
        }
    }

    #[test]
    fn test_scenario_zero_region() {
        let v = two_corners();
        let region = Array3::<i32>::zeros((2, 2, 2));
        let (acc, summary) =
            accumulate_along(v.view(), v.view(), Some(region.view()), Axis::Z).unwrap();
        assert!(acc.is_empty());
        assert_eq!(summary.excluded, 8);

        let (mut t, mut o) = (Vec::new(), Vec::new());
        compute_roc(
            v.view(),
            v.view(),
            Some(region.view()),
            Axis::Z,
            &mut t,
            &mut o,
            OneHotFormat::default(),
        )
        .unwrap();
        assert_eq!(t, b"\n");
        assert_eq!(o, b"\n");
    }

    #[test]
    fn test_scenario_all_zero_test() {
        let test = Array3::<u8>::zeros((3, 2, 2));
        let gt = Array3::<u8>::from_elem((3, 2, 2), 2);
        let (acc, summary) =
            accumulate_along(test.view(), gt.view(), no_region(), Axis::Y).unwrap();
        assert!(acc.target().iter().all(|&b| b == 1));
        assert!(acc.output().iter().all(|&b| b == 0));
        assert_eq!(summary.confusion.false_negative, 12);
        assert_eq!(summary.confusion.sensitivity(), Some(0.0));
    }

    #[test]
    fn test_inputs_reject_mismatch() {
        let test = LabelVolume::new(Array3::zeros((2, 2, 2)));
        let gt = LabelVolume::new(Array3::zeros((2, 2, 3)));
        let err = RocInputs::new(test.clone(), gt, None).unwrap_err();
        assert!(matches!(
            err,
            RocError::ShapeMismatch {
                what: "ground truth",
                found: (2, 2, 3),
                ..
            }
        ));

        let region = LabelVolume::new(Array3::ones((1, 2, 2)));
        let err = RocInputs::new(test.clone(), test.clone(), Some(region)).unwrap_err();
        assert!(matches!(
            err,
            RocError::ShapeMismatch { what: "region", .. }
        ));
    }

    #[test]
    fn test_inputs_drop_empty_region() {
        let test = LabelVolume::new(Array3::ones((2, 2, 2)));
        let region = LabelVolume::new(Array3::zeros((0, 2, 2)));
        let inputs = RocInputs::new(test.clone(), test, Some(region)).unwrap();
        assert!(inputs.region().is_none());
        let (acc, _) = inputs.classify(Axis::X).unwrap();
        assert_eq!(acc.len(), 8);
    }

    #[test]
    fn test_save_roc_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let (t, o) = (dir.path().join("t.txt"), dir.path().join("o.txt"));
        let test = LabelVolume::new(two_corners());
        let gt = LabelVolume::new(arr3(&[[[1, 1], [0, 0]], [[0, 0], [0, 0]]]));
        let region = LabelVolume::new(arr3(&[[[1, 1], [1, 1]], [[1, 0], [0, 1]]]));
        let inputs = RocInputs::new(test, gt, Some(region)).unwrap();

        let first = inputs
            .save_roc(Axis::Z, &t, &o, OneHotFormat::default())
            .unwrap();
        let bytes = (std::fs::read(&t).unwrap(), std::fs::read(&o).unwrap());
        let second = inputs
            .save_roc(Axis::Z, &t, &o, OneHotFormat::default())
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(bytes.0, std::fs::read(&t).unwrap());
        assert_eq!(bytes.1, std::fs::read(&o).unwrap());

        assert_eq!(first.observations, 6);
        assert_eq!(first.excluded, 2);
        // 按 z 切片: (0,0,0) (0,1,0) (1,0,0) | (0,0,1) (0,1,1) (1,1,1).
        assert_eq!(bytes.0, b"1\t0\t0\t1\t0\t0\t\n0\t1\t1\t0\t1\t1\t");
        assert_eq!(bytes.1, b"1\t0\t0\t0\t0\t1\t\n0\t1\t1\t1\t1\t0\t");
    }
}
