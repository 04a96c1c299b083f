//! Worksheet assembly and multi-page batches.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::DrillResult;
use crate::generators::generate_problems;
use crate::layout::{check_a4_overflow, A4Overflow, RenderMode};
use crate::problem::Problem;
use crate::settings::WorksheetSettings;

/// One generated page: a settings snapshot and its problems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetData {
    pub settings: WorksheetSettings,
    pub problems: Vec<Problem>,
    pub generated_at: DateTime<Utc>,
}

impl WorksheetData {
    /// Generate a fresh page from `settings`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, settings: &WorksheetSettings) -> Self {
        WorksheetData {
            settings: settings.clone(),
            problems: generate_problems(rng, settings),
            generated_at: Utc::now(),
        }
    }
}

/// Current settings and problems of a front end.
///
/// Changing settings regenerates the problems so the two never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetSession {
    settings: WorksheetSettings,
    problems: Vec<Problem>,
}

impl WorksheetSession {
    /// Validate `settings` and generate the first set of problems.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, settings: WorksheetSettings) -> DrillResult<Self> {
        settings.validate()?;
        let problems = generate_problems(rng, &settings);
        Ok(WorksheetSession { settings, problems })
    }

    pub fn settings(&self) -> &WorksheetSettings {
        &self.settings
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Replace the settings and regenerate.
    pub fn update_settings<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        settings: WorksheetSettings,
    ) -> DrillResult<()> {
        settings.validate()?;
        self.settings = settings;
        self.regenerate(rng);
        Ok(())
    }

    /// New problems for the same settings.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.problems = generate_problems(rng, &self.settings);
        debug!(count = self.problems.len(), "Worksheet regenerated");
    }

    /// A4 warning for the preview, if any
    pub fn overflow(&self) -> Option<A4Overflow> {
        check_a4_overflow(&self.settings, RenderMode::Preview)
    }

    /// Snapshot for printing or export.
    pub fn worksheet_data(&self) -> WorksheetData {
        WorksheetData {
            settings: self.settings.clone(),
            problems: self.problems.clone(),
            generated_at: Utc::now(),
        }
    }
}

/// Build `page_count` pages for batch printing.
///
/// When `base` is given it becomes page 1 unchanged, so the page the user
/// previewed is the page that prints. Every other page gets its own copy of
/// the settings and freshly generated problems.
pub fn build_worksheet_batch<R: Rng + ?Sized>(
    rng: &mut R,
    settings: &WorksheetSettings,
    page_count: usize,
    base: Option<&WorksheetData>,
) -> Vec<WorksheetData> {
    let mut pages = Vec::with_capacity(page_count);
    if page_count == 0 {
        return pages;
    }
    if let Some(first) = base {
        pages.push(first.clone());
    }
    while pages.len() < page_count {
        let page_settings = settings.clone();
        pages.push(WorksheetData::generate(rng, &page_settings));
    }
    info!(
        pages = pages.len(),
        reused_base = base.is_some(),
        problem_type = %settings.problem_type,
        "Worksheet batch built"
    );
    pages
}
