//! 运行结果.

use roc_berry::RocSummary;
use std::io::{self, Write};

/// 将 `summary` 的结果写进 `w` 中.
pub fn describe_into<W: Write>(s: &RocSummary, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    #[inline]
    fn f64_to_display(f: Option<f64>) -> String {
        match f {
            Some(f) => format!("{f:.6}"),
            None => "/".to_string(),
        }
    }

    let c = &s.confusion;
    writeln!(w, "Summary along `{}`:", s.axis)?;
    writeln!(w, "{S4}Slices: {}", s.slices)?;
    writeln!(w, "{S4}Observations: {}", s.observations)?;
    writeln!(w, "{S4}Excluded by region: {}", s.excluded)?;
    writeln!(w, "{S4}Confusion: {c}")?;
    writeln!(w, "{S4}Sensitivity: {}", f64_to_display(c.sensitivity()))?;
    writeln!(w, "{S4}Specificity: {}", f64_to_display(c.specificity()))?;
    writeln!(w, "{S4}Dice: {}", f64_to_display(c.dice()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::describe_into;
    use roc_berry::{Axis, ConfusionMatrix, RocSummary};

    #[test]
    fn test_describe() {
        let s = RocSummary {
            axis: Axis::Y,
            slices: 3,
            observations: 4,
            excluded: 2,
            confusion: [(true, true), (false, false), (false, false), (false, true)]
                .into_iter()
                .collect::<ConfusionMatrix>(),
        };
        let mut buf = Vec::new();
        describe_into(&s, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Summary along `y`:\n"));
        assert!(text.contains("    Observations: 4\n"));
        assert!(text.contains("    Confusion: TP=1 FP=1 TN=2 FN=0\n"));
        assert!(text.contains("    Sensitivity: 1.000000\n"));
        assert!(text.contains("    Specificity: 0.666667\n"));
    }

    #[test]
    fn test_describe_undefined_rates() {
        let s = RocSummary {
            axis: Axis::Z,
            slices: 0,
            observations: 0,
            excluded: 0,
            confusion: ConfusionMatrix::default(),
        };
        let mut buf = Vec::new();
        describe_into(&s, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("    Sensitivity: /\n"));
        assert!(text.contains("    Dice: /\n"));
    }
}
