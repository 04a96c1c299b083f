//! # Problem Model
//!
//! Every generated problem is one variant of [`Problem`]. The enum serializes
//! with a `"type"` discriminator so a front end can switch on it directly:
//!
//! ```json
//! { "type": "basic", "id": "…", "operation": "addition",
//!   "operand1": 12, "operand2": null, "answer": 30,
//!   "missing_position": "operand2" }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use drill_core::problem::{ArithmeticProblem, Operation, Problem};
//!
//! let problem = Problem::Basic(ArithmeticProblem::complete("p-1", Operation::Addition, 12, 18));
//! assert_eq!(problem.question_text(), "12 + 18 =");
//! assert_eq!(problem.answer_text(), "30");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DrillError;
use crate::math::Ratio;

/// Placeholder shown in the blank slot of a missing-number problem
pub const BLANK: &str = "□";

/// The four arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    /// Printed operator symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }

    /// Stable lowercase name, matching the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
        }
    }

    /// Apply to two integers. Division is only defined when exact.
    pub fn apply(&self, a: i64, b: i64) -> Option<i64> {
        match self {
            Operation::Addition => a.checked_add(b),
            Operation::Subtraction => a.checked_sub(b),
            Operation::Multiplication => a.checked_mul(b),
            Operation::Division => {
                if b != 0 && a % b == 0 {
                    Some(a / b)
                } else {
                    None
                }
            }
        }
    }
}

impl FromStr for Operation {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "addition" | "add" | "+" => Ok(Operation::Addition),
            "subtraction" | "sub" | "-" => Ok(Operation::Subtraction),
            "multiplication" | "mul" | "x" | "*" => Ok(Operation::Multiplication),
            "division" | "div" | "/" => Ok(Operation::Division),
            _ => Err(DrillError::invalid_input(
                "operation",
                s,
                "Expected addition, subtraction, multiplication or division",
            )),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which slot of `a ∘ b = c` is blanked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPosition {
    Operand1,
    Operand2,
    Answer,
}

impl MissingPosition {
    pub const ALL: [MissingPosition; 3] = [
        MissingPosition::Operand1,
        MissingPosition::Operand2,
        MissingPosition::Answer,
    ];
}

/// Worksheet problem family, matching the serialized `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemType {
    #[default]
    Basic,
    Hissan,
    Fraction,
    Decimal,
    Mixed,
    Word,
    WordEn,
}

impl ProblemType {
    pub const ALL: [ProblemType; 7] = [
        ProblemType::Basic,
        ProblemType::Hissan,
        ProblemType::Fraction,
        ProblemType::Decimal,
        ProblemType::Mixed,
        ProblemType::Word,
        ProblemType::WordEn,
    ];

    /// Serialized name (e.g. "word-en")
    pub fn name(&self) -> &'static str {
        match self {
            ProblemType::Basic => "basic",
            ProblemType::Hissan => "hissan",
            ProblemType::Fraction => "fraction",
            ProblemType::Decimal => "decimal",
            ProblemType::Mixed => "mixed",
            ProblemType::Word => "word",
            ProblemType::WordEn => "word-en",
        }
    }

    /// True for the two word-problem families
    pub fn is_word(&self) -> bool {
        matches!(self, ProblemType::Word | ProblemType::WordEn)
    }
}

impl FromStr for ProblemType {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ProblemType::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| {
                DrillError::invalid_input(
                    "problem_type",
                    s,
                    "Expected basic, hissan, fraction, decimal, mixed, word or word-en",
                )
            })
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer problem shared by the `basic` and `hissan` variants.
///
/// A `None` slot is the blank the student fills in. Division problems may
/// carry a remainder, in which case `operand1 = answer × operand2 + remainder`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithmeticProblem {
    pub id: String,
    pub operation: Operation,
    pub operand1: Option<i64>,
    pub operand2: Option<i64>,
    pub answer: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remainder: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_position: Option<MissingPosition>,
}

impl ArithmeticProblem {
    /// Build a complete problem, computing the answer.
    ///
    /// Division keeps the quotient and records any remainder.
    pub fn complete(id: impl Into<String>, operation: Operation, operand1: i64, operand2: i64) -> Self {
        let (answer, remainder) = match operation {
            Operation::Addition => (operand1 + operand2, None),
            Operation::Subtraction => (operand1 - operand2, None),
            Operation::Multiplication => (operand1 * operand2, None),
            Operation::Division => {
                let divisor = operand2.max(1);
                let r = operand1 % divisor;
                (operand1 / divisor, if r == 0 { None } else { Some(r) })
            }
        };
        ArithmeticProblem {
            id: id.into(),
            operation,
            operand1: Some(operand1),
            operand2: Some(operand2),
            answer: Some(answer),
            remainder,
            missing_position: None,
        }
    }

    /// Erase one slot, turning this into a missing-number problem.
    pub fn with_missing(mut self, position: MissingPosition) -> Self {
        match position {
            MissingPosition::Operand1 => self.operand1 = None,
            MissingPosition::Operand2 => self.operand2 = None,
            MissingPosition::Answer => self.answer = None,
        }
        self.missing_position = Some(position);
        self
    }

    /// Solve for the blank slot from the two visible values.
    ///
    /// Returns `None` when nothing is missing or the visible values do not
    /// determine an integer solution.
    pub fn solve_missing(&self) -> Option<i64> {
        let op = self.operation;
        match self.missing_position? {
            MissingPosition::Answer => op.apply(self.operand1?, self.operand2?),
            MissingPosition::Operand1 => {
                let (b, c) = (self.operand2?, self.answer?);
                match op {
                    Operation::Addition => c.checked_sub(b),
                    Operation::Subtraction => c.checked_add(b),
                    Operation::Multiplication => Operation::Division.apply(c, b),
                    Operation::Division => c.checked_mul(b),
                }
            }
            MissingPosition::Operand2 => {
                let (a, c) = (self.operand1?, self.answer?);
                match op {
                    Operation::Addition => c.checked_sub(a),
                    Operation::Subtraction => a.checked_sub(c),
                    Operation::Multiplication => Operation::Division.apply(c, a),
                    Operation::Division => Operation::Division.apply(a, c),
                }
            }
        }
    }

    /// Check that a fully populated problem is arithmetically correct.
    pub fn is_consistent(&self) -> bool {
        let (Some(a), Some(b), Some(c)) = (self.operand1, self.operand2, self.answer) else {
            return false;
        };
        match self.operation {
            Operation::Division => {
                let r = self.remainder.unwrap_or(0);
                b > 0 && r >= 0 && r < b && a == c * b + r
            }
            op => self.remainder.is_none() && op.apply(a, b) == Some(c),
        }
    }

    fn slot(value: Option<i64>) -> String {
        value.map_or_else(|| BLANK.to_string(), |v| v.to_string())
    }

    /// Question as printed on the worksheet
    pub fn question_text(&self) -> String {
        let a = Self::slot(self.operand1);
        let b = Self::slot(self.operand2);
        let sym = self.operation.symbol();
        if self.missing_position.is_some() {
            format!("{} {} {} = {}", a, sym, b, Self::slot(self.answer))
        } else {
            format!("{} {} {} =", a, sym, b)
        }
    }

    /// Value the student should write
    pub fn answer_text(&self) -> String {
        if self.missing_position.is_some() {
            return Self::slot(self.solve_missing());
        }
        match (self.answer, self.remainder) {
            (Some(q), Some(r)) => format!("{} R {}", q, r),
            (answer, _) => Self::slot(answer),
        }
    }
}

/// Fraction problem. The second operand is absent for unary problems
/// ("simplify 6/8").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionProblem {
    pub id: String,
    pub operation: Operation,
    pub numerator1: i64,
    pub denominator1: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numerator2: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denominator2: Option<i64>,
    pub answer_numerator: i64,
    pub answer_denominator: i64,
}

impl FractionProblem {
    /// True for single-fraction problems
    pub fn is_unary(&self) -> bool {
        self.numerator2.is_none() || self.denominator2.is_none()
    }

    pub fn answer_ratio(&self) -> Ratio {
        Ratio::new(self.answer_numerator, self.answer_denominator)
    }

    fn fmt_fraction(n: i64, d: i64) -> String {
        if d == 1 {
            n.to_string()
        } else {
            format!("{}/{}", n, d)
        }
    }

    pub fn question_text(&self) -> String {
        let first = format!("{}/{}", self.numerator1, self.denominator1);
        match (self.numerator2, self.denominator2) {
            (Some(n2), Some(d2)) => {
                format!("{} {} {}/{} =", first, self.operation.symbol(), n2, d2)
            }
            _ => format!("{} =", first),
        }
    }

    pub fn answer_text(&self) -> String {
        Self::fmt_fraction(self.answer_numerator, self.answer_denominator)
    }
}

/// Decimal problem. Values are exact to `decimal_places` digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecimalProblem {
    pub id: String,
    pub operation: Operation,
    pub operand1: f64,
    pub operand2: f64,
    pub answer: f64,
    pub decimal_places: u32,
}

impl DecimalProblem {
    pub fn question_text(&self) -> String {
        format!(
            "{} {} {} =",
            format_decimal(self.operand1, self.decimal_places),
            self.operation.symbol(),
            format_decimal(self.operand2, self.decimal_places)
        )
    }

    pub fn answer_text(&self) -> String {
        format_decimal(self.answer, self.decimal_places)
    }
}

/// Format a value to at most `places` decimals, dropping trailing zeros.
pub fn format_decimal(value: f64, places: u32) -> String {
    let text = format!("{:.*}", places as usize, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// A mixed number such as 2 1/3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixedNumber {
    pub whole: i64,
    pub numerator: i64,
    pub denominator: i64,
}

impl MixedNumber {
    /// Convert a non-negative ratio into whole + proper fraction
    pub fn from_ratio(value: Ratio) -> Self {
        let (whole, numerator, denominator) = value.to_mixed_parts();
        MixedNumber {
            whole,
            numerator,
            denominator,
        }
    }

    pub fn to_ratio(&self) -> Ratio {
        Ratio::new(self.whole * self.denominator + self.numerator, self.denominator)
    }
}

impl fmt::Display for MixedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.whole, self.numerator) {
            (w, 0) => write!(f, "{}", w),
            (0, n) => write!(f, "{}/{}", n, self.denominator),
            (w, n) => write!(f, "{} {}/{}", w, n, self.denominator),
        }
    }
}

/// Mixed-number problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedProblem {
    pub id: String,
    pub operation: Operation,
    pub operand1: MixedNumber,
    pub operand2: MixedNumber,
    pub answer: MixedNumber,
}

impl MixedProblem {
    pub fn question_text(&self) -> String {
        format!("{} {} {} =", self.operand1, self.operation.symbol(), self.operand2)
    }

    pub fn answer_text(&self) -> String {
        self.answer.to_string()
    }
}

/// Language of a word problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "en")]
    English,
}

/// Scenario family of a word problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordCategory {
    Time,
    Calendar,
    Shopping,
    Allowance,
    UnitConversion,
    MapScale,
    TransportChange,
    Speed,
}

/// Answer to a word problem: a number, or text such as a clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WordAnswer {
    Number(f64),
    Text(String),
}

/// Unit marker for Malaysian ringgit, printed before the amount
pub const RINGGIT_UNIT: &str = "RM";

/// Free-text word problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordProblem {
    pub id: String,
    pub operation: Operation,
    pub problem_text: String,
    pub answer: WordAnswer,
    pub unit: String,
    pub category: WordCategory,
    pub language: Language,
}

impl WordProblem {
    pub fn answer_text(&self) -> String {
        match &self.answer {
            WordAnswer::Text(text) => text.clone(),
            WordAnswer::Number(value) if self.unit == RINGGIT_UNIT => {
                format!("{}{:.2}", RINGGIT_UNIT, value)
            }
            WordAnswer::Number(value) => {
                let number = format_decimal(*value, 2);
                match (self.unit.as_str(), self.language) {
                    ("", _) => number,
                    (unit, Language::Japanese) => format!("{}{}", number, unit),
                    (unit, Language::English) => format!("{} {}", number, unit),
                }
            }
        }
    }
}

/// A generated worksheet problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Problem {
    #[serde(rename = "basic")]
    Basic(ArithmeticProblem),
    #[serde(rename = "hissan")]
    Hissan(ArithmeticProblem),
    #[serde(rename = "fraction")]
    Fraction(FractionProblem),
    #[serde(rename = "decimal")]
    Decimal(DecimalProblem),
    #[serde(rename = "mixed")]
    Mixed(MixedProblem),
    #[serde(rename = "word")]
    Word(WordProblem),
    #[serde(rename = "word-en")]
    WordEn(WordProblem),
}

impl Problem {
    pub fn id(&self) -> &str {
        match self {
            Problem::Basic(p) | Problem::Hissan(p) => &p.id,
            Problem::Fraction(p) => &p.id,
            Problem::Decimal(p) => &p.id,
            Problem::Mixed(p) => &p.id,
            Problem::Word(p) | Problem::WordEn(p) => &p.id,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Problem::Basic(p) | Problem::Hissan(p) => p.operation,
            Problem::Fraction(p) => p.operation,
            Problem::Decimal(p) => p.operation,
            Problem::Mixed(p) => p.operation,
            Problem::Word(p) | Problem::WordEn(p) => p.operation,
        }
    }

    pub fn problem_type(&self) -> ProblemType {
        match self {
            Problem::Basic(_) => ProblemType::Basic,
            Problem::Hissan(_) => ProblemType::Hissan,
            Problem::Fraction(_) => ProblemType::Fraction,
            Problem::Decimal(_) => ProblemType::Decimal,
            Problem::Mixed(_) => ProblemType::Mixed,
            Problem::Word(_) => ProblemType::Word,
            Problem::WordEn(_) => ProblemType::WordEn,
        }
    }

    /// Text printed in the problem cell
    pub fn question_text(&self) -> String {
        match self {
            Problem::Basic(p) | Problem::Hissan(p) => p.question_text(),
            Problem::Fraction(p) => p.question_text(),
            Problem::Decimal(p) => p.question_text(),
            Problem::Mixed(p) => p.question_text(),
            Problem::Word(p) | Problem::WordEn(p) => p.problem_text.clone(),
        }
    }

    /// Text printed on the answer key
    pub fn answer_text(&self) -> String {
        match self {
            Problem::Basic(p) | Problem::Hissan(p) => p.answer_text(),
            Problem::Fraction(p) => p.answer_text(),
            Problem::Decimal(p) => p.answer_text(),
            Problem::Mixed(p) => p.answer_text(),
            Problem::Word(p) | Problem::WordEn(p) => p.answer_text(),
        }
    }
}
