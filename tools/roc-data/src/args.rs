//! 命令行参数.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use roc_berry::{Axis, OneHotFormat};
use thiserror::Error;

/// 原始命令行参数. 必选参数在这里均为 `Option`, 缺失时由 [`Config`] 报告,
/// 以便打印用法后正常退出.
#[derive(Debug, Parser)]
#[command(name = "roc-data", version)]
#[command(about = "Slice a test and a ground-truth segmentation and write one-hot ROC matrices")]
pub struct Cli {
    /// Test segmentation volume (.nii, .nii.gz, .npy)
    #[arg(short = 't', value_name = "TEST")]
    pub test: Option<PathBuf>,

    /// Ground-truth segmentation volume
    #[arg(short = 'g', value_name = "GROUND_TRUTH")]
    pub ground_truth: Option<PathBuf>,

    /// Optional region mask; only voxels with a positive mask value are classified
    #[arg(short = 'r', value_name = "REGION")]
    pub region: Option<PathBuf>,

    /// Output file for the ROC target (ground-truth) matrix, also accepted as `-o1`
    #[arg(long = "o1", value_name = "TARGET_FILE")]
    pub target_out: Option<PathBuf>,

    /// Output file for the ROC output (test) matrix, also accepted as `-o2`
    #[arg(long = "o2", value_name = "OUTPUT_FILE")]
    pub output_out: Option<PathBuf>,

    /// Slice along x
    #[arg(long = "x", overrides_with_all = ["x", "y", "z"])]
    pub x: bool,

    /// Slice along y
    #[arg(long = "y", overrides_with_all = ["x", "y", "z"])]
    pub y: bool,

    /// Slice along z (default)
    #[arg(long = "z", overrides_with_all = ["x", "y", "z"])]
    pub z: bool,

    /// Write strict TSV (no trailing tab, newline after both rows)
    #[arg(long)]
    pub tidy: bool,

    /// Print a run summary to stdout
    #[arg(long)]
    pub summary: bool,

    /// Log level
    #[arg(long, env = "ROC_LOG", default_value = "info", value_name = "LEVEL")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// 选定的切片方向. 多个方向参数同时出现时以最后一个为准.
    pub fn axis(&self) -> Axis {
        if self.x {
            Axis::X
        } else if self.y {
            Axis::Y
        } else {
            Axis::Z
        }
    }
}

/// 将单横线形式的 `-o1` / `-o2` 转换为 clap 能识别的 `--o1` / `--o2`.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some("-o1") => OsString::from("--o1"),
            Some("-o2") => OsString::from("--o2"),
            _ => arg,
        })
        .collect()
}

/// 参数不完整.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 缺少必选参数.
    #[error("missing required argument {0}")]
    MissingArgument(&'static str),
}

/// 检查完毕的运行配置.
#[derive(Debug, Clone)]
pub struct Config {
    pub test: PathBuf,
    pub ground_truth: PathBuf,
    pub region: Option<PathBuf>,
    pub target_out: PathBuf,
    pub output_out: PathBuf,
    pub axis: Axis,
    pub format: OneHotFormat,
    pub summary: bool,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let axis = cli.axis();
        let format = if cli.tidy {
            OneHotFormat::tidy()
        } else {
            OneHotFormat::legacy()
        };
        let required = |v: Option<PathBuf>, flag| v.ok_or(ConfigError::MissingArgument(flag));
        Ok(Self {
            test: required(cli.test, "-t")?,
            ground_truth: required(cli.ground_truth, "-g")?,
            target_out: required(cli.target_out, "-o1")?,
            output_out: required(cli.output_out, "-o2")?,
            region: cli.region,
            axis,
            format,
            summary: cli.summary,
        })
    }
}
