//! 体数据切片.

mod core;
mod iter;

pub use core::{slice_at, slice_iter, VolumeSlice};

pub use iter::PosIter;
