//! ROC 标签矩阵生成.
//!
//! 流程分三步: 沿选定方向逐切片二分类并累积 ([`classify()`]),
//! 全部切片访问完后将真值序列与结果序列分别写成 one-hot 矩阵 ([`write_one_hot`]).
//! [`compute_roc`] 与 [`RocInputs`] 将它们串起来.

mod classify;
mod confusion;
mod one_hot;
mod pipeline;

pub use classify::{classify, Classification};
pub use confusion::ConfusionMatrix;
pub use one_hot::{write_one_hot, OneHotFormat, OneHotWrite};
pub use pipeline::{accumulate_along, compute_roc, RocInputs, RocSummary};
