use ndarray::Array3;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use roc_berry::roc::accumulate_along;
use roc_berry::{compute_roc, Axis, LabelVolume, OneHotFormat, RocInputs};

fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);
    ProptestConfig::with_cases(cases)
}

/// 形状相同的 (待测, 真值, 区域) 三个体数据. 标签值包括负数, 零和多种正值.
fn arb_triplet() -> impl Strategy<Value = (Array3<i32>, Array3<i32>, Array3<i32>)> {
    (1usize..5, 1usize..5, 1usize..5).prop_flat_map(|shape| {
        let n = shape.0 * shape.1 * shape.2;
        let labels = || prop::collection::vec(-2i32..4, n);
        (labels(), labels(), labels()).prop_map(move |(t, g, r)| {
            (
                Array3::from_shape_vec(shape, t).unwrap(),
                Array3::from_shape_vec(shape, g).unwrap(),
                Array3::from_shape_vec(shape, r).unwrap(),
            )
        })
    })
}

fn arb_axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
}

/// 解析严格 TSV 布局的矩阵文件.
fn parse_tidy(bytes: &[u8]) -> Vec<Vec<u8>> {
    let text = std::str::from_utf8(bytes).unwrap();
    text.split_terminator('\n')
        .map(|row| {
            if row.is_empty() {
                Vec::new()
            } else {
                row.split('\t').map(|v| v.parse().unwrap()).collect()
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn every_voxel_observed_without_region(
        (test, gt, _) in arb_triplet(),
        axis in arb_axis(),
    ) {
        let (acc, summary) =
            accumulate_along(test.view(), gt.view(), None::<ndarray::ArrayView3<i32>>, axis)
                .unwrap();
        prop_assert_eq!(acc.target().len(), test.len());
        prop_assert_eq!(acc.output().len(), test.len());
        prop_assert_eq!(summary.slices, test.len_of(ndarray::Axis::from(axis)));
        prop_assert_eq!(summary.excluded, 0);
    }

    #[test]
    fn region_excludes_exactly_non_positive_voxels(
        (test, gt, region) in arb_triplet(),
        axis in arb_axis(),
    ) {
        let inside = region.iter().filter(|&&r| r > 0).count();
        let (acc, summary) =
            accumulate_along(test.view(), gt.view(), Some(region.view()), axis).unwrap();
        prop_assert_eq!(acc.len(), inside);
        prop_assert_eq!(summary.excluded, test.len() - inside);

        let expected_tp = test
            .iter()
            .zip(gt.iter())
            .zip(region.iter())
            .filter(|((&t, &g), &r)| r > 0 && t > 0 && g > 0)
            .count();
        prop_assert_eq!(summary.confusion.true_positive as usize, expected_tp);
    }

    #[test]
    fn one_hot_rows_are_complementary(
        (test, gt, region) in arb_triplet(),
        axis in arb_axis(),
    ) {
        let (mut t, mut o) = (Vec::new(), Vec::new());
        let summary = compute_roc(
            test.view(),
            gt.view(),
            Some(region.view()),
            axis,
            &mut t,
            &mut o,
            OneHotFormat::tidy(),
        )
        .unwrap();

        for bytes in [&t, &o] {
            let rows = parse_tidy(bytes);
            prop_assert_eq!(rows.len(), 2);
            prop_assert_eq!(rows[0].len(), summary.observations);
            prop_assert_eq!(rows[1].len(), summary.observations);
            for (a, b) in rows[0].iter().zip(rows[1].iter()) {
                prop_assert_eq!(a + b, 1);
            }
        }
    }

    #[test]
    fn legacy_layout_only_differs_in_separators(
        (test, gt, _) in arb_triplet(),
        axis in arb_axis(),
    ) {
        let render = |format: OneHotFormat| {
            let (mut t, mut o) = (Vec::new(), Vec::new());
            compute_roc(
                test.view(),
                gt.view(),
                None::<ndarray::ArrayView3<i32>>,
                axis,
                &mut t,
                &mut o,
                format,
            )
            .unwrap();
            (t, o)
        };
        let (legacy, _) = render(OneHotFormat::legacy());
        let (tidy, _) = render(OneHotFormat::tidy());

        let legacy = String::from_utf8(legacy).unwrap();
        let tidy = String::from_utf8(tidy).unwrap();
        prop_assert!(!legacy.ends_with('\n'));
        prop_assert_eq!(legacy.matches('\n').count(), 1);
        let tidy_with_trailing_tabs = tidy.trim_end_matches('\n').to_string() + "\t";
        prop_assert_eq!(legacy.replace("\t\n", "\n"), tidy_with_trailing_tabs);
    }

    #[test]
    fn slicing_axis_keeps_class_counts(
        (test, gt, region) in arb_triplet(),
    ) {
        let inputs = RocInputs::new(
            LabelVolume::new(test),
            LabelVolume::new(gt),
            Some(LabelVolume::new(region)),
        )
        .unwrap();
        let (_, by_z) = inputs.classify(Axis::Z).unwrap();
        for axis in [Axis::X, Axis::Y] {
            let (_, other) = inputs.classify(axis).unwrap();
            prop_assert_eq!(other.observations, by_z.observations);
            prop_assert_eq!(other.confusion, by_z.confusion);
        }
    }

    #[test]
    fn output_is_idempotent(
        (test, gt, region) in arb_triplet(),
        axis in arb_axis(),
    ) {
        let inputs = RocInputs::new(
            LabelVolume::new(test),
            LabelVolume::new(gt),
            Some(LabelVolume::new(region)),
        )
        .unwrap();
        let run = || {
            let (mut t, mut o) = (Vec::new(), Vec::new());
            inputs.compute_roc(axis, &mut t, &mut o, OneHotFormat::default()).unwrap();
            (t, o)
        };
        prop_assert_eq!(run(), run());
    }
}
