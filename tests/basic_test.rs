use proptest::prelude::*;
use student_support_dashboard::analytics::{FilteredView, SupportMode};
use student_support_dashboard::data::{Dataset, GradeRange, Record, SupportFlag};

fn record(study_time: u32, final_grade: u32, flags: [bool; 3]) -> Record {
    Record {
        study_time,
        final_grade,
        family_support: flags[0],
        school_support: flags[1],
        romantic_relationship: flags[2],
    }
}

fn sample_dataset() -> Dataset {
    Dataset::from_records(vec![
        record(1, 10, [true, false, false]),
        record(2, 12, [true, true, false]),
        record(2, 14, [false, false, true]),
    ])
    .unwrap()
}

#[test]
fn test_filter_selects_inclusive_range() {
    let dataset = sample_dataset();
    let range = GradeRange::new(12, 14).unwrap();
    let view = FilteredView::new(&dataset, range);

    assert_eq!(view.range(), range);
    assert_eq!(view.len(), 2);
    let grades: Vec<u32> = view.records().iter().map(|r| r.final_grade).collect();
    assert_eq!(grades, vec![12, 14]);
}

#[test]
fn test_percentages_use_filtered_rows_only() {
    let dataset = sample_dataset();
    let view = FilteredView::new(&dataset, GradeRange::new(12, 14).unwrap());
    let summary = view.support_summary(SupportMode::Percent);

    assert_eq!(summary.total, 2);
    let family = &summary.bars[0];
    assert_eq!(family.flag, SupportFlag::Family);
    assert_eq!(family.label, "Family Support");
    assert_eq!(family.count, 1);
    assert_eq!(family.percentage, 50.0);
    assert_eq!(family.value, 50.0);

    let romantic = &summary.bars[2];
    assert_eq!(romantic.label, "Romantic Relationships");
    assert_eq!(romantic.percentage, 50.0);
}

#[test]
fn test_count_mode_plots_raw_counts() {
    let dataset = sample_dataset();
    let view = FilteredView::new(&dataset, dataset.grade_bounds());
    let summary = view.support_summary(SupportMode::Count);

    assert_eq!(summary.y_label, "Students");
    let values: Vec<f64> = summary.bars.iter().map(|b| b.value).collect();
    assert_eq!(values, vec![2.0, 1.0, 1.0]);
}

#[test]
fn test_empty_view_yields_defined_zero_result() {
    let dataset = sample_dataset();
    let view = FilteredView::new(&dataset, GradeRange::new(11, 11).unwrap());
    assert!(view.is_empty());

    let summary = view.support_summary(SupportMode::Percent);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.bars.len(), 3);
    assert!(summary.bars.iter().all(|b| b.count == 0 && b.percentage == 0.0));

    let heatmap = view.joint_distribution();
    assert_eq!(heatmap.total, 0);
    assert!(heatmap.study_times.is_empty());
    assert!(heatmap.grades.is_empty());
    assert!(heatmap.counts.is_empty());
}

#[test]
fn test_joint_distribution_grid() {
    let dataset = Dataset::from_records(vec![
        record(1, 10, [false; 3]),
        record(2, 10, [false; 3]),
        record(2, 10, [false; 3]),
        record(4, 15, [false; 3]),
    ])
    .unwrap();
    let heatmap = FilteredView::new(&dataset, dataset.grade_bounds()).joint_distribution();

    assert_eq!(heatmap.study_times, vec![1, 2, 4]);
    assert_eq!(heatmap.grades, vec![10, 15]);
    assert_eq!(heatmap.counts, vec![vec![1, 2, 0], vec![0, 0, 1]]);
    assert_eq!(heatmap.count_at(2, 10), 2);
    assert_eq!(heatmap.total, 4);
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (1u32..=4, 0u32..=20, any::<[bool; 3]>()).prop_map(|(s, g, f)| record(s, g, f)),
        1..60,
    )
}

proptest! {
    #[test]
    fn test_filtered_view_is_subset_within_range(
        records in arb_records(),
        a in 0u32..=20,
        b in 0u32..=20,
    ) {
        let dataset = Dataset::from_records(records).unwrap();
        let bounds = dataset.grade_bounds();
        let (lo, hi) = (bounds.clamp(a.min(b)), bounds.clamp(a.max(b)));
        let range = GradeRange::new(lo, hi).unwrap();
        let view = FilteredView::new(&dataset, range);

        prop_assert!(view.len() <= dataset.len());
        for r in view.records() {
            prop_assert!(lo <= r.final_grade && r.final_grade <= hi);
            prop_assert!(dataset.records().iter().any(|d| std::ptr::eq(d, *r)));
        }
        let expected = dataset.records().iter().filter(|r| range.contains(r.final_grade)).count();
        prop_assert_eq!(view.len(), expected);
    }

    #[test]
    fn test_full_bounds_selects_everything(records in arb_records()) {
        let dataset = Dataset::from_records(records).unwrap();
        let view = FilteredView::new(&dataset, dataset.grade_bounds());
        let selected: Vec<Record> = view.records().iter().map(|r| (*r).clone()).collect();
        prop_assert_eq!(selected.as_slice(), dataset.records());
    }

    #[test]
    fn test_aggregates_stay_within_limits(
        records in arb_records(),
        a in 0u32..=20,
        b in 0u32..=20,
    ) {
        let dataset = Dataset::from_records(records).unwrap();
        let range = GradeRange::new(a.min(b), a.max(b)).unwrap();
        let view = FilteredView::new(&dataset, range);

        let summary = view.support_summary(SupportMode::Percent);
        for bar in &summary.bars {
            prop_assert!((0.0..=100.0).contains(&bar.percentage));
            prop_assert!(bar.count <= view.len());
        }

        let heatmap = view.joint_distribution();
        let cells: u32 = heatmap.counts.iter().flatten().sum();
        prop_assert_eq!(cells as usize, view.len());
    }
}
