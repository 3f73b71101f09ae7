use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, RangeError};

/// One student's survey row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub study_time: u32,
    pub final_grade: u32,
    pub family_support: bool,
    pub school_support: bool,
    pub romantic_relationship: bool,
}

impl Record {
    pub fn flag(&self, flag: SupportFlag) -> bool {
        match flag {
            SupportFlag::Family => self.family_support,
            SupportFlag::School => self.school_support,
            SupportFlag::Romantic => self.romantic_relationship,
        }
    }
}

/// The yes/no support indicators tracked per student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportFlag {
    Family,
    School,
    Romantic,
}

impl SupportFlag {
    pub const ALL: [SupportFlag; 3] = [SupportFlag::Family, SupportFlag::School, SupportFlag::Romantic];

    pub fn label(self) -> &'static str {
        match self {
            SupportFlag::Family => "Family Support",
            SupportFlag::School => "School Support",
            SupportFlag::Romantic => "Romantic Relationships",
        }
    }

    fn column(self) -> &'static str {
        match self {
            SupportFlag::Family => "famsup",
            SupportFlag::School => "schoolsup",
            SupportFlag::Romantic => "romantic",
        }
    }
}

// Column names as they appear in the survey export
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "studytime")]
    study_time: u32,
    #[serde(rename = "G3")]
    final_grade: u32,
    famsup: String,
    schoolsup: String,
    romantic: String,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<Record, DataError> {
        Ok(Record {
            study_time: self.study_time,
            final_grade: self.final_grade,
            family_support: parse_flag(&self.famsup, row, SupportFlag::Family)?,
            school_support: parse_flag(&self.schoolsup, row, SupportFlag::School)?,
            romantic_relationship: parse_flag(&self.romantic, row, SupportFlag::Romantic)?,
        })
    }
}

fn parse_flag(value: &str, row: usize, flag: SupportFlag) -> Result<bool, DataError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("yes") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("no") {
        Ok(false)
    } else {
        Err(DataError::InvalidFlag {
            row,
            column: flag.column(),
            value: value.to_string(),
        })
    }
}

/// Inclusive `[min, max]` range of final grades. Always satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeRange {
    min: u32,
    max: u32,
}

impl GradeRange {
    pub fn new(min: u32, max: u32) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        Ok(GradeRange { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, grade: u32) -> bool {
        self.min <= grade && grade <= self.max
    }

    /// Pull a grade into this range.
    pub fn clamp(&self, grade: u32) -> u32 {
        grade.clamp(self.min, self.max)
    }
}

/// The survey table, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    bounds: GradeRange,
}

impl Dataset {
    pub fn load(path: &Path, delimiter: u8) -> Result<Self, DataError> {
        let file = File::open(path)?;
        Self::from_reader(file, delimiter)
    }

    /// Parse CSV with a header row. Rows are numbered from 1, header excluded.
    pub fn from_reader<R: io::Read>(reader: R, delimiter: u8) -> Result<Self, DataError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (i, result) in rdr.deserialize::<RawRecord>().enumerate() {
            let row = i + 1;
            let raw = result.map_err(|source| DataError::Csv { row, source })?;
            records.push(raw.into_record(row)?);
        }

        Self::from_records(records)
    }

    pub fn from_records(records: Vec<Record>) -> Result<Self, DataError> {
        let min = records.iter().map(|r| r.final_grade).min();
        let max = records.iter().map(|r| r.final_grade).max();
        match (min, max) {
            (Some(min), Some(max)) => Ok(Dataset {
                records,
                bounds: GradeRange { min, max },
            }),
            _ => Err(DataError::Empty),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a loaded dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed `[lowest, highest]` final grade.
    pub fn grade_bounds(&self) -> GradeRange {
        self.bounds
    }
}
