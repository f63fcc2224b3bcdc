//! 运行时错误.

use std::path::PathBuf;

use thiserror::Error;

use crate::{Axis, Idx3d};

/// 加载、切片、分类及写出过程中的错误.
#[derive(Debug, Error)]
pub enum RocError {
    /// 底层 I/O 错误.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 读取 nifti 文件错误.
    #[error("failed to read nifti volume: {0}")]
    Nifti(#[from] nifti::NiftiError),

    /// 读取 npy 文件错误.
    #[error("failed to read npy volume from {path}: {source}")]
    Npy {
        /// 文件路径.
        path: PathBuf,
        /// 底层错误.
        #[source]
        source: ndarray_npy::ReadNpyError,
    },

    /// 无法识别的体数据文件格式.
    #[error("unsupported volume format: {0}")]
    UnsupportedFormat(PathBuf),

    /// npy 文件的元素类型不受支持.
    #[error("unsupported element type in {0}")]
    UnsupportedDtype(PathBuf),

    /// 体数据不是 3D 的 (存在长度大于 1 的第四维或更高维).
    #[error("{path} is not a 3D volume (dims: {dims:?})")]
    UnsupportedDimensions {
        /// 文件路径.
        path: PathBuf,
        /// 文件中的原始形状.
        dims: Vec<usize>,
    },

    /// 两个体数据 (或其切片) 形状不一致.
    ///
    /// `what` 指出与基准 (测试体数据) 不一致的那个输入.
    #[error("{what} shape {found:?} does not match {expected:?}")]
    ShapeMismatch {
        /// 不一致的输入名称.
        what: &'static str,
        /// 基准形状.
        expected: Idx3d,
        /// 实际形状.
        found: Idx3d,
    },

    /// 切片索引越界.
    #[error("slice index {index} out of bound along {axis} (extent {extent})")]
    SliceOutOfBound {
        /// 切片方向.
        axis: Axis,
        /// 请求的切片序号.
        index: usize,
        /// 该方向上的长度.
        extent: usize,
    },

    /// 输出文件无法创建或写入.
    #[error("failed to write {path}: {source}")]
    Write {
        /// 输出文件路径.
        path: PathBuf,
        /// 底层错误.
        #[source]
        source: std::io::Error,
    },
}

/// 本 crate 的运行时结果.
pub type RocResult<T> = Result<T, RocError>;
