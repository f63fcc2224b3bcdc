//! 从磁盘加载体数据.

use std::path::{Path, PathBuf};

use ndarray::{Array3, ArrayD};
use ndarray_npy::{ReadNpyError, ReadableElement};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use num::ToPrimitive;

use super::LabelVolume;
use crate::error::{RocError, RocResult};
use crate::Idx3d;

/// 支持的体数据文件格式. 由文件扩展名判断.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VolumeFormat {
    /// `.nii`, `.nii.gz`, `.hdr`, `.img` (及其 `.gz` 形式).
    Nifti,

    /// NumPy `.npy`.
    Npy,
}

impl VolumeFormat {
    /// 根据文件名判断格式. 无法识别时返回 `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if [".nii", ".hdr", ".img"]
            .iter()
            .any(|ext| name.ends_with(ext))
        {
            Some(Self::Nifti)
        } else if name.ends_with(".npy") {
            Some(Self::Npy)
        } else {
            None
        }
    }
}

/// 将任意数值转换为 `i32` 标签. 先向上取整, 保证 `(0, 1)` 内的值仍为正.
///
/// `as` 对超范围值饱和, 对 NaN 取 0.
#[inline]
pub(crate) fn to_label<T: ToPrimitive>(value: T) -> i32 {
    value.to_f64().map_or(0, |f| f.ceil() as i32)
}

/// 将任意维度的形状归约为 (x, y, z). 缺失的维度补 1, 多余的维度必须为 1.
fn shape_3d(path: &Path, dims: &[usize]) -> RocResult<Idx3d> {
    let unsupported = || RocError::UnsupportedDimensions {
        path: path.to_owned(),
        dims: dims.to_vec(),
    };
    match *dims {
        [x] => Ok((x, 1, 1)),
        [x, y] => Ok((x, y, 1)),
        [x, y, z, ref rest @ ..] if rest.iter().all(|&d| d == 1) => Ok((x, y, z)),
        _ => Err(unsupported()),
    }
}

/// Analyze 格式的 `.img` (`.img.gz`) 只保存体素, 需要改为打开同名的 `.hdr` (`.hdr.gz`).
/// 其余路径原样返回.
fn header_path(path: &Path) -> PathBuf {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return path.to_owned();
    };
    let lower = name.to_ascii_lowercase();
    let stem = if lower.ends_with(".img.gz") {
        &name[..name.len() - 7]
    } else if lower.ends_with(".img") {
        &name[..name.len() - 4]
    } else {
        return path.to_owned();
    };
    ["hdr", "hdr.gz"]
        .iter()
        .map(|ext| path.with_file_name(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
        .unwrap_or_else(|| path.with_file_name(format!("{stem}.hdr")))
}

/// 将任意维度的数组经 `label` 逐元素转换为 3D 标签.
fn into_labels<T, F>(path: &Path, data: ArrayD<T>, label: F) -> RocResult<Array3<i32>>
where
    T: Copy,
    F: FnMut(T) -> i32,
{
    let shape = shape_3d(path, data.shape())?;
    // 去掉 / 补上长度为 1 的维度不改变行优先序列.
    data.mapv(label)
        .as_standard_layout()
        .into_owned()
        .into_shape(shape)
        .map_err(|_| RocError::UnsupportedDimensions {
            path: path.to_owned(),
            dims: vec![shape.0, shape.1, shape.2],
        })
}

/// 尝试以元素类型 `T` 读取 npy 文件. 类型不符时返回 `Ok(None)`.
fn read_npy_as<T, F>(path: &Path, label: F) -> RocResult<Option<Array3<i32>>>
where
    T: ReadableElement + Copy,
    F: FnMut(T) -> i32,
{
    match ndarray_npy::read_npy::<_, ArrayD<T>>(path) {
        Ok(data) => into_labels(path, data, label).map(Some),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(source) => Err(RocError::Npy {
            path: PathBuf::from(path),
            source,
        }),
    }
}

impl LabelVolume {
    /// 打开体数据文件, 格式由扩展名决定 (见 [`VolumeFormat`]).
    /// 如果打开成功, 则返回 `Ok(Self)`, 否则返回 `Err`.
    pub fn open<P: AsRef<Path>>(path: P) -> RocResult<Self> {
        let path = path.as_ref();
        match VolumeFormat::from_path(path) {
            Some(VolumeFormat::Nifti) => Self::open_nifti(path),
            Some(VolumeFormat::Npy) => Self::open_npy(path),
            None => Err(RocError::UnsupportedFormat(path.to_owned())),
        }
    }

    /// 打开 nifti 文件. 体素值经过 header 中的 scl_slope / scl_inter 缩放后,
    /// 向上取整保存.
    ///
    /// 给出 `.img` 数据文件时, 实际读取同目录下的同名 `.hdr`.
    pub fn open_nifti<P: AsRef<Path>>(path: P) -> RocResult<Self> {
        let path = header_path(path.as_ref());
        let path = path.as_path();
        let obj = ReaderOptions::new().read_file(path)?;

        // nifti 的 [W, H, z] 恰好就是 (x, y, z).
        let data = obj.into_volume().into_ndarray::<f64>()?;
        let data = into_labels(path, data, to_label)?;
        log::debug!(
            "loaded nifti {} with shape {:?}",
            path.display(),
            data.dim()
        );
        Ok(Self::new(data))
    }

    /// 打开 npy 文件. 数组的三个维度依次视为 (x, y, z).
    ///
    /// 支持的元素类型为 bool, u8, i8, u16, i16, u32, i32, u64, i64, f32 和 f64.
    /// 其他元素类型返回 [`RocError::UnsupportedDtype`].
    pub fn open_npy<P: AsRef<Path>>(path: P) -> RocResult<Self> {
        let path = path.as_ref();

        macro_rules! first_readable {
            ($($ty: ty),+) => {
                $(
                    if let Some(data) = read_npy_as::<$ty, _>(path, to_label::<$ty>)? {
                        log::debug!(
                            "loaded npy {} as {} with shape {:?}",
                            path.display(),
                            stringify!($ty),
                            data.dim()
                        );
                        return Ok(Self::new(data));
                    }
                )+
            };
        }

        if let Some(data) = read_npy_as::<bool, _>(path, i32::from)? {
            log::debug!("loaded npy {} as bool mask", path.display());
            return Ok(Self::new(data));
        }
        first_readable!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
        Err(RocError::UnsupportedDtype(path.to_owned()))
    }
}
