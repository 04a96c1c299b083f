//! # Worksheet Settings
//!
//! [`WorksheetSettings`] is the single input every generator call needs. The
//! host application owns it and passes it by reference; nothing in the core
//! keeps a global copy.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "grade": 3,
//!   "problem_type": "basic",
//!   "operation": "subtraction",
//!   "calculation_pattern": "with-borrow",
//!   "problem_count": 20,
//!   "layout_columns": 2,
//!   "title": "Subtraction practice",
//!   "student_name": null,
//!   "date": "2026-10-19",
//!   "show_answers": false
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{DrillError, DrillResult};
use crate::grade::Grade;
use crate::pattern::{self, CalculationPattern};
use crate::problem::{Operation, ProblemType};

/// Upper bound on problems per worksheet accepted by [`WorksheetSettings::validate`]
pub const MAX_PROBLEM_COUNT: usize = 100;

/// Number of problem columns on the printed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum LayoutColumns {
    One,
    #[default]
    Two,
    Three,
}

impl LayoutColumns {
    pub const ALL: [LayoutColumns; 3] = [LayoutColumns::One, LayoutColumns::Two, LayoutColumns::Three];

    pub fn count(self) -> usize {
        match self {
            LayoutColumns::One => 1,
            LayoutColumns::Two => 2,
            LayoutColumns::Three => 3,
        }
    }
}

impl TryFrom<u8> for LayoutColumns {
    type Error = DrillError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(LayoutColumns::One),
            2 => Ok(LayoutColumns::Two),
            3 => Ok(LayoutColumns::Three),
            _ => Err(DrillError::invalid_input(
                "layout_columns",
                value.to_string(),
                "Layout must have 1, 2 or 3 columns",
            )),
        }
    }
}

impl From<LayoutColumns> for u8 {
    fn from(columns: LayoutColumns) -> Self {
        columns.count() as u8
    }
}

impl FromStr for LayoutColumns {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.trim().parse().map_err(|_| {
            DrillError::invalid_input("layout_columns", s, "Layout must have 1, 2 or 3 columns")
        })?;
        LayoutColumns::try_from(value)
    }
}

impl fmt::Display for LayoutColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Everything needed to generate and print one worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetSettings {
    /// School grade (1–6)
    pub grade: Grade,

    /// Generator family
    pub problem_type: ProblemType,

    /// Operation for arithmetic families; word problems choose their own
    pub operation: Operation,

    /// Optional scenario discriminator; unknown names load as `None`
    #[serde(default, deserialize_with = "pattern::deserialize_lenient")]
    pub calculation_pattern: Option<CalculationPattern>,

    /// Number of problems per page
    pub problem_count: usize,

    /// Printed columns
    #[serde(default)]
    pub layout_columns: LayoutColumns,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub student_name: Option<String>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Print the answer key alongside the problems
    #[serde(default)]
    pub show_answers: bool,
}

impl Default for WorksheetSettings {
    fn default() -> Self {
        WorksheetSettings {
            grade: Grade::default(),
            problem_type: ProblemType::Basic,
            operation: Operation::Addition,
            calculation_pattern: None,
            problem_count: 20,
            layout_columns: LayoutColumns::Two,
            title: None,
            student_name: None,
            date: None,
            show_answers: false,
        }
    }
}

impl WorksheetSettings {
    /// Validate values that arrive from outside the type system.
    ///
    /// Generation accepts any count (zero yields an empty sheet); this check
    /// is for front ends that want to refuse absurdly large requests.
    pub fn validate(&self) -> DrillResult<()> {
        if self.problem_count > MAX_PROBLEM_COUNT {
            return Err(DrillError::invalid_input(
                "problem_count",
                self.problem_count.to_string(),
                format!("At most {} problems fit on one worksheet", MAX_PROBLEM_COUNT),
            ));
        }
        if let Some(title) = &self.title {
            if title.chars().count() > 80 {
                return Err(DrillError::invalid_input(
                    "title",
                    title.clone(),
                    "Title must be 80 characters or fewer",
                ));
            }
        }
        Ok(())
    }

    /// Heading printed at the top of the sheet
    pub fn heading(&self) -> String {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title.clone(),
            _ => match &self.calculation_pattern {
                Some(pattern) => format!(
                    "Grade {} {} ({})",
                    self.grade, self.problem_type, pattern
                ),
                None => format!(
                    "Grade {} {} {}",
                    self.grade, self.problem_type, self.operation
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = WorksheetSettings::default();
        assert_eq!(settings.grade.value(), 1);
        assert_eq!(settings.layout_columns.count(), 2);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_serialization() {
        let settings = WorksheetSettings {
            grade: Grade::new(3).unwrap(),
            problem_type: ProblemType::WordEn,
            calculation_pattern: Some(CalculationPattern::AllowanceGoal),
            layout_columns: LayoutColumns::Three,
            ..WorksheetSettings::default()
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("\"word-en\""));
        assert!(json.contains("\"allowance-goal\""));
        assert!(json.contains("\"layout_columns\": 3"));

        let roundtrip: WorksheetSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, settings);
    }

    #[test]
    fn test_unknown_pattern_loads_as_none() {
        let json = r#"{
            "grade": 2,
            "problem_type": "word",
            "operation": "addition",
            "calculation_pattern": "lottery-winnings-jap",
            "problem_count": 5
        }"#;
        let settings: WorksheetSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.calculation_pattern, None);
        assert_eq!(settings.layout_columns, LayoutColumns::Two);
    }

    #[test]
    fn test_invalid_columns_rejected() {
        let json = r#"{
            "grade": 2, "problem_type": "basic", "operation": "addition",
            "problem_count": 5, "layout_columns": 4
        }"#;
        assert!(serde_json::from_str::<WorksheetSettings>(json).is_err());
        assert!("0".parse::<LayoutColumns>().is_err());
    }

    #[test]
    fn test_validate_problem_count() {
        let settings = WorksheetSettings {
            problem_count: MAX_PROBLEM_COUNT + 1,
            ..WorksheetSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_heading() {
        let mut settings = WorksheetSettings::default();
        assert_eq!(settings.heading(), "Grade 1 basic addition");
        settings.title = Some("Warm-up".into());
        assert_eq!(settings.heading(), "Warm-up");
    }
}
