//! Generated plan editor

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::error::PlannerError;
use crate::lesson::{GenerationRequest, Tool};

pub struct PlanView {
    pub editor: TextArea<'static>,
    tool: Tool,
    topic: String,
    notes: Option<String>,
    document: Option<PathBuf>,
}

impl PlanView {
    pub fn new(plan: &str, tool: Tool, topic: &str) -> Self {
        let mut editor = TextArea::new(plan.lines().map(str::to_string).collect());
        editor.set_cursor_line_style(Style::default());

        Self {
            editor,
            tool,
            topic: topic.to_string(),
            notes: None,
            document: None,
        }
    }

    /// Carry the notes and document of the request that produced the plan
    pub fn with_request(mut self, request: &GenerationRequest) -> Self {
        self.notes = request.notes.clone();
        self.document = request.document.clone();
        self
    }

    /// One-line summary of notes and document, if the request had any
    pub fn context_line(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(notes) = &self.notes {
            parts.push(format!("Notes: {}", notes.replace('\n', " ")));
        }
        if let Some(document) = &self.document {
            let name = document
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| document.display().to_string());
            parts.push(format!("Document: {}", name));
        }
        (!parts.is_empty()).then(|| parts.join(" • "))
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Current editor contents
    pub fn text(&self) -> String {
        self.editor.lines().join("\n")
    }
}

/// `lesson-plan-20250314-093000.md`
pub fn plan_file_name(now: DateTime<Local>) -> String {
    format!("lesson-plan-{}.md", now.format("%Y%m%d-%H%M%S"))
}

/// Write the plan into `dir` under a timestamped name
pub fn save_plan(dir: &Path, text: &str, now: DateTime<Local>) -> Result<PathBuf, PlannerError> {
    let path = dir.join(plan_file_name(now));
    let mut contents = text.to_string();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    fs::write(&path, contents)?;
    Ok(path)
}
