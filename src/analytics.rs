use std::collections::BTreeSet;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::{Dataset, GradeRange, Record, SupportFlag};

/// Study time / final grade joint counts for the heatmap.
#[derive(Serialize, Clone, Debug)]
pub struct JointDistribution {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub range: GradeRange,
    pub total: usize,
    /// Distinct study times in the view, ascending (x axis).
    pub study_times: Vec<u32>,
    /// Distinct final grades in the view, ascending (y axis).
    pub grades: Vec<u32>,
    /// `counts[y][x]`, indexed like `grades` and `study_times`.
    pub counts: Vec<Vec<u32>>,
}

impl JointDistribution {
    pub fn count_at(&self, study_time: u32, grade: u32) -> u32 {
        let x = self.study_times.binary_search(&study_time);
        let y = self.grades.binary_search(&grade);
        match (x, y) {
            (Ok(x), Ok(y)) => self.counts[y][x],
            _ => 0,
        }
    }
}

/// Which value the support bar chart plots.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SupportMode {
    #[default]
    Percent,
    Count,
}

#[derive(Serialize, Clone, Debug)]
pub struct SupportBar {
    pub flag: SupportFlag,
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
    /// `percentage` or `count`, depending on the requested mode.
    pub value: f64,
}

#[derive(Serialize, Clone, Debug)]
pub struct SupportSummary {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub range: GradeRange,
    pub mode: SupportMode,
    pub total: usize,
    pub bars: Vec<SupportBar>,
}

/// Grade slider configuration: bounds plus a mark every second grade.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SliderBounds {
    pub min: u32,
    pub max: u32,
    pub marks: Vec<u32>,
}

impl SliderBounds {
    pub fn new(bounds: GradeRange) -> Self {
        SliderBounds {
            min: bounds.min(),
            max: bounds.max(),
            marks: (bounds.min()..=bounds.max()).step_by(2).collect(),
        }
    }
}

/// Records of a dataset whose final grade lies in a range, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    range: GradeRange,
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a Dataset, range: GradeRange) -> Self {
        let records = dataset
            .records()
            .iter()
            .filter(|r| range.contains(r.final_grade))
            .collect();

        FilteredView { range, records }
    }

    pub fn range(&self) -> GradeRange {
        self.range
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Joint frequency of (study_time, final_grade). An empty view yields
    /// empty axes and no cells.
    pub fn joint_distribution(&self) -> JointDistribution {
        let study_times: Vec<u32> = self
            .records
            .iter()
            .map(|r| r.study_time)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let grades: Vec<u32> = self
            .records
            .iter()
            .map(|r| r.final_grade)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut grid = Array2::<u32>::zeros((grades.len(), study_times.len()));
        for record in &self.records {
            // Both axes were built from these same records
            if let (Ok(x), Ok(y)) = (
                study_times.binary_search(&record.study_time),
                grades.binary_search(&record.final_grade),
            ) {
                grid[[y, x]] += 1;
            }
        }

        JointDistribution {
            title: "Study Time vs Final Grades Heatmap",
            x_label: "Study Time (hours per week)",
            y_label: "Final Grade",
            range: self.range,
            total: self.records.len(),
            study_times,
            grades,
            counts: grid.outer_iter().map(|row| row.to_vec()).collect(),
        }
    }

    pub fn flag_count(&self, flag: SupportFlag) -> usize {
        self.records.iter().filter(|r| r.flag(flag)).count()
    }

    /// Per-flag "yes" counts and their share of the view. Percentages are
    /// zero for an empty view.
    pub fn support_summary(&self, mode: SupportMode) -> SupportSummary {
        let total = self.records.len();
        let bars = SupportFlag::ALL
            .iter()
            .map(|&flag| {
                let count = self.flag_count(flag);
                let percentage = percentage(count, total);
                SupportBar {
                    flag,
                    label: flag.label(),
                    count,
                    percentage,
                    value: match mode {
                        SupportMode::Percent => percentage,
                        SupportMode::Count => count as f64,
                    },
                }
            })
            .collect();

        SupportSummary {
            title: "Prevalence of Support Types Among Students",
            x_label: "Type of Support",
            y_label: match mode {
                SupportMode::Percent => "Percentage (%)",
                SupportMode::Count => "Students",
            },
            range: self.range,
            mode,
            total,
            bars,
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
