#![warn(missing_docs)]

//! 核心库. 将待测分割结果与真值分割 (以及可选的区域掩码) 这一组 3D 标签体数据,
//! 逐切片转换成下游 ROC 分析所需的 one-hot 标签矩阵.
//!
//! 该 crate 目前仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 只关心标签是否大于零. 任意正值都视为前景, 因此多标签的分割结果会被折叠为二分类.
//! 2. 本 crate 不计算 ROC 曲线本身 (阈值扫描, AUC), 只生成供外部工具读取的矩阵.
//!
//! # 功能
//!
//! ### 体数据 ✅
//!
//! [`Volume`] trait 描述了分类所需的最小能力 (形状与逐体素读取),
//! 任意 `ndarray` 三维数组都实现了它. [`LabelVolume`] 可从 nifti 或 npy 文件加载.
//!
//! 实现位于 `roc-berry/src/data`.
//!
//! ### 切片 ✅
//!
//! 沿 x, y 或 z 方向取厚度为 1 的切片, 越界时返回错误而不是读越界数据.
//!
//! 实现位于 `roc-berry/src/data/slice`.
//!
//! ### 二分类累积与 one-hot 矩阵写出 ✅
//!
//! 1. 每个切片内按 x → y → z 顺序访问体素, z 变化最快.
//! 2. 区域掩码存在时只记录掩码内的体素.
//! 3. 矩阵文件默认与既有工具链逐字节兼容, 也可以选择严格的 TSV 布局.
//!
//! 实现位于 `roc-berry/src/roc`.
//!
//! ### 混淆矩阵 ✅
//!
//! 对累积的观测统计 TP/FP/TN/FN 及灵敏度、特异度, 仅作参考输出.

/// 三维索引 (x, y, z), 同时也可一定程度上用作非负整数向量.
pub type Idx3d = (usize, usize, usize);

/// 3D 标签体数据与切片.
pub mod data;

pub mod consts;
pub mod error;
pub mod prelude;
pub mod roc;

pub use data::{Axis, LabelVolume, Volume, VolumeFormat, VolumeSlice};

pub use error::{RocError, RocResult};

pub use roc::{
    classify, compute_roc, write_one_hot, Classification, ConfusionMatrix, OneHotFormat,
    OneHotWrite, RocInputs, RocSummary,
};
