use serde::{Deserialize, Serialize};

use crate::domain::prompts::version::PromptVersion;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiffOp {
    Unchanged,
    Added,
    Removed,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub op: DiffOp,
    pub line_number_a: Option<u32>,
    pub line_number_b: Option<u32>,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct TextDiffResult {
    pub lines: Vec<DiffLine>,
    pub added: usize,
    pub removed: usize,
}

impl TextDiffResult {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

#[derive(Debug, Clone)]
pub struct VersionDiffResult {
    /// Side A. `None` when diffing the first version against its (empty)
    /// predecessor.
    pub base: Option<PromptVersion>,
    pub target: PromptVersion,
    pub diff: TextDiffResult,
}
