//! Lesson domain types
//!
//! Grade levels, the content tools offered by the picker, fetch parameters
//! and the generation request handed to the service.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Grade level a lesson is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "Pre-K")]
    PreK,
    #[serde(rename = "Elementary")]
    Elementary,
    #[serde(rename = "Middle School")]
    MiddleSchool,
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "College")]
    College,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 5] = [
        GradeLevel::PreK,
        GradeLevel::Elementary,
        GradeLevel::MiddleSchool,
        GradeLevel::HighSchool,
        GradeLevel::College,
    ];

    /// Label shown in the UI and sent to the service
    pub fn label(self) -> &'static str {
        match self {
            GradeLevel::PreK => "Pre-K",
            GradeLevel::Elementary => "Elementary",
            GradeLevel::MiddleSchool => "Middle School",
            GradeLevel::HighSchool => "High School",
            GradeLevel::College => "College",
        }
    }

    /// Parse a label, case-insensitively
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|grade| grade.label().eq_ignore_ascii_case(label))
    }

    /// Cycle forward through the grades, passing through "unset"
    pub fn cycle_next(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::ALL[0]),
            Some(grade) => {
                let index = Self::ALL.iter().position(|g| *g == grade).unwrap_or(0);
                Self::ALL.get(index + 1).copied()
            }
        }
    }

    /// Cycle backward through the grades, passing through "unset"
    pub fn cycle_previous(current: Option<Self>) -> Option<Self> {
        match current {
            None => Self::ALL.last().copied(),
            Some(grade) => {
                let index = Self::ALL.iter().position(|g| *g == grade).unwrap_or(0);
                index.checked_sub(1).map(|i| Self::ALL[i])
            }
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Content tools offered by the picker
///
/// Every tool drives the same dialog; only the title differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    LessonPlan,
    LessonBuilder,
    WorkbookGenerator,
    BloomsTaxonomy,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::LessonPlan,
        Tool::LessonBuilder,
        Tool::WorkbookGenerator,
        Tool::BloomsTaxonomy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::LessonPlan => "Lesson Plan",
            Tool::LessonBuilder => "Lesson Builder",
            Tool::WorkbookGenerator => "Workbook Generator",
            Tool::BloomsTaxonomy => "Bloom's Taxonomy Generator",
        }
    }

    pub fn dialog_title(self) -> &'static str {
        match self {
            Tool::LessonPlan => "Create Lesson Plan",
            Tool::LessonBuilder => "Build Your Lesson",
            Tool::WorkbookGenerator => "Generate Workbook",
            Tool::BloomsTaxonomy => "Generate Bloom's Taxonomy",
        }
    }
}

/// Parameters a suggestion fetch was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub topic: String,
    pub grade: GradeLevel,
}

/// Everything needed to generate a lesson plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub grade: GradeLevel,
    pub learning_outcomes: Vec<String>,
    pub disambiguation_tags: Vec<String>,
    /// Attached reference document, shown alongside the plan
    pub document: Option<PathBuf>,
    pub notes: Option<String>,
}
