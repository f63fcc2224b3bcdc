//! one-hot 标签矩阵的持久化存储.
//!
//! 对长度为 N 的二分类序列, 写出一个 2×N 矩阵: 第一行为 "前景" 指示位,
//! 第二行为 "背景" 指示位, 每列恰有一个 1. 下游 ROC 工具按
//! "类别数 × 观测数" 的形式读取它.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::consts::one_hot::*;
use crate::consts::is_present;
use crate::error::{RocError, RocResult};

/// 矩阵文件的字节布局.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneHotFormat {
    /// 每个值后面都跟一个分隔符 (包括行尾), 否则只在值之间放分隔符.
    pub trailing_separator: bool,

    /// 第二行之后是否写出行结束符.
    pub final_newline: bool,
}

impl Default for OneHotFormat {
    #[inline]
    fn default() -> Self {
        Self::legacy()
    }
}

impl OneHotFormat {
    /// 与既有 ROC 工具链逐字节兼容的布局: 每个值后跟 TAB,
    /// 第一行以 `\n` 结束, 第二行没有结束符.
    #[inline]
    pub const fn legacy() -> Self {
        Self {
            trailing_separator: true,
            final_newline: false,
        }
    }

    /// 严格的 TSV 布局: TAB 只出现在值之间, 每行都以 `\n` 结束.
    #[inline]
    pub const fn tidy() -> Self {
        Self {
            trailing_separator: false,
            final_newline: true,
        }
    }
}

/// 写出一行指示位. `positive` 为 `true` 时前景写 1, 否则背景写 1.
fn write_row<W: Write>(
    sequence: &[u8],
    w: &mut W,
    format: OneHotFormat,
    positive: bool,
) -> io::Result<()> {
    for (i, &v) in sequence.iter().enumerate() {
        let bit = if is_present(v) == positive { ON } else { OFF };
        if format.trailing_separator {
            w.write_all(&[bit, SEPARATOR])?;
        } else if i == 0 {
            w.write_all(&[bit])?;
        } else {
            w.write_all(&[SEPARATOR, bit])?;
        }
    }
    Ok(())
}

/// 将 `sequence` 展开成 2×N one-hot 矩阵写入 `w`.
///
/// 空序列在默认布局下只写出一个 `\n` (两行空行).
pub fn write_one_hot<W: Write>(
    sequence: &[u8],
    mut w: W,
    format: OneHotFormat,
) -> io::Result<()> {
    write_row(sequence, &mut w, format, true)?;
    w.write_all(&[LINE_END])?;
    write_row(sequence, &mut w, format, false)?;
    if format.final_newline {
        w.write_all(&[LINE_END])?;
    }
    Ok(())
}

/// 表明一个可以写成 one-hot 矩阵的二分类序列.
///
/// 与 [`write_one_hot`] 的区别在于, `save_one_hot` 会创建文件、缓冲写入并在结束时
/// flush, 任一步失败都报告为 [`RocError::Write`].
pub trait OneHotWrite {
    /// 写入任意输出流.
    fn write_one_hot<W: Write>(&self, w: W, format: OneHotFormat) -> io::Result<()>;

    /// 按照 `format` 将矩阵保存到 `path` 路径. 已存在的文件会被覆盖.
    fn save_one_hot<P: AsRef<Path>>(&self, path: P, format: OneHotFormat) -> RocResult<()> {
        let path = path.as_ref();
        let wrap = |source: io::Error| RocError::Write {
            path: path.to_owned(),
            source,
        };
        let file = File::create(path).map_err(wrap)?;
        let mut w = BufWriter::new(file);
        self.write_one_hot(&mut w, format).map_err(wrap)?;
        w.flush().map_err(wrap)
    }
}

impl OneHotWrite for [u8] {
    #[inline]
    fn write_one_hot<W: Write>(&self, w: W, format: OneHotFormat) -> io::Result<()> {
        write_one_hot(self, w, format)
    }
}
