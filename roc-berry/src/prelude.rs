//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::Idx3d;

pub use crate::data::{Axis, LabelVolume, Volume, VolumeSlice};

pub use crate::consts::{is_present, ElemType};

pub use crate::error::{RocError, RocResult};

pub use crate::roc::{
    Classification, ConfusionMatrix, OneHotFormat, OneHotWrite, RocInputs, RocSummary,
};
