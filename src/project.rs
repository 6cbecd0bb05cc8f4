//! Payloads exchanged with the project store and the build service.
//!
//! These are the JSON bodies the editor sends: a saved project (the tree
//! document plus the sketch generated from it) and a request to compile and
//! flash a sketch onto a board. Only the shapes live here; no I/O is done.

use serde::{Deserialize, Serialize};

/// Project name used when a flash request does not name one.
pub const DEFAULT_PROJECT_NAME: &str = "blockly_project";

/// A saved project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The tree document as saved by the editor.
    pub blocks_xml: String,
    /// Sketch generated from `blocks_xml`.
    pub code: String,
}

impl ProjectRecord {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, blocks_xml: String, code: String) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            description: None,
            blocks_xml,
            code,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request to build a sketch and flash it onto a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashRequest {
    pub code: String,
    /// Target board; `None` lets the service pick a free one.
    #[serde(default)]
    pub board_id: Option<String>,
    #[serde(default = "default_project_name")]
    pub project_name: String,
}

fn default_project_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

impl FlashRequest {
    pub fn new(code: String) -> Self {
        Self {
            code,
            board_id: None,
            project_name: default_project_name(),
        }
    }

    pub fn with_board(mut self, board_id: impl Into<String>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }
}
