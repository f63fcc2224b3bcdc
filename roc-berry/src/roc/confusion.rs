//! 单一工作点上的 TP/FP/TN/FN 统计.
//!
//! 二值体数据只对应 ROC 曲线上的一个点. 这里只做计数, 不做阈值扫描.

use std::fmt;

/// 混淆矩阵.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionMatrix {
    /// 真值为前景, 结果为前景.
    pub true_positive: u64,

    /// 真值为背景, 结果为前景.
    pub false_positive: u64,

    /// 真值为背景, 结果为背景.
    pub true_negative: u64,

    /// 真值为前景, 结果为背景.
    pub false_negative: u64,
}

#[inline]
fn ratio(num: u64, den: u64) -> Option<f64> {
    (den != 0).then(|| num as f64 / den as f64)
}

impl ConfusionMatrix {
    /// 记录一个 (真值, 结果) 观测.
    #[inline]
    pub fn record(&mut self, ground_truth: bool, test: bool) {
        match (ground_truth, test) {
            (true, true) => self.true_positive += 1,
            (false, true) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (true, false) => self.false_negative += 1,
        }
    }

    /// 观测总数.
    #[inline]
    pub fn total(&self) -> u64 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    /// 灵敏度 (真阳性率) TP / (TP + FN). 分母为零时返回 `None`.
    #[inline]
    pub fn sensitivity(&self) -> Option<f64> {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    /// 特异度 (真阴性率) TN / (TN + FP). 分母为零时返回 `None`.
    #[inline]
    pub fn specificity(&self) -> Option<f64> {
        ratio(self.true_negative, self.true_negative + self.false_positive)
    }

    /// 假阳性率 FP / (FP + TN), 即 ROC 图的横坐标.
    #[inline]
    pub fn false_positive_rate(&self) -> Option<f64> {
        self.specificity().map(|s| 1.0 - s)
    }

    /// 精确率 TP / (TP + FP).
    #[inline]
    pub fn precision(&self) -> Option<f64> {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// 准确率 (TP + TN) / 总数.
    #[inline]
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    /// Dice 系数 2TP / (2TP + FP + FN).
    #[inline]
    pub fn dice(&self) -> Option<f64> {
        ratio(
            2 * self.true_positive,
            2 * self.true_positive + self.false_positive + self.false_negative,
        )
    }
}

impl FromIterator<(bool, bool)> for ConfusionMatrix {
    /// 每个元素为 (真值是否为前景, 结果是否为前景).
    fn from_iter<I: IntoIterator<Item = (bool, bool)>>(iter: I) -> Self {
        let mut ans = Self::default();
        for (gt, test) in iter {
            ans.record(gt, test);
        }
        ans
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TP={} FP={} TN={} FN={}",
            self.true_positive, self.false_positive, self.true_negative, self.false_negative
        )
    }
}
