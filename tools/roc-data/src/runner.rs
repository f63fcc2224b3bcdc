//! 程序运行函数.

use crate::args::Config;
use roc_berry::{RocInputs, RocResult, RocSummary};

/// 实际运行: 加载三个体数据, 沿选定方向切片并写出两个矩阵文件.
pub fn run(config: &Config) -> RocResult<RocSummary> {
    let inputs = RocInputs::open(&config.test, &config.ground_truth, config.region.as_ref())?;
    if config.region.is_some() && inputs.region().is_none() {
        log::info!("every voxel is classified");
    }
    let summary = inputs.save_roc(
        config.axis,
        &config.target_out,
        &config.output_out,
        config.format,
    )?;

    log::info!(
        "wrote {} observations to {} and {}",
        summary.observations,
        config.target_out.display(),
        config.output_out.display()
    );
    log::debug!("{}", summary.confusion);
    Ok(summary)
}
