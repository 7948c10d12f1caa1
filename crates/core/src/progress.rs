//! Analysis progress reported over the WebSocket channel.

use serde::Serialize;

/// WebSocket message type for an intermediate progress update.
pub const MSG_TYPE_ANALYSIS_PROGRESS: &str = "analysis_progress";

/// WebSocket message type sent once the result is available.
pub const MSG_TYPE_ANALYSIS_COMPLETED: &str = "analysis_completed";

/// WebSocket message type sent when the upload could not be analyzed.
pub const MSG_TYPE_ANALYSIS_FAILED: &str = "analysis_failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Received,
    Decoded,
    SkinExtracted,
    Matched,
    Completed,
}

impl AnalysisStage {
    pub fn percent(self) -> u8 {
        match self {
            AnalysisStage::Received => 10,
            AnalysisStage::Decoded => 30,
            AnalysisStage::SkinExtracted => 60,
            AnalysisStage::Matched => 90,
            AnalysisStage::Completed => 100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisStage::Received => "received",
            AnalysisStage::Decoded => "decoded",
            AnalysisStage::SkinExtracted => "skin_extracted",
            AnalysisStage::Matched => "matched",
            AnalysisStage::Completed => "completed",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AnalysisStage::Received => "Image received",
            AnalysisStage::Decoded => "Image decoded",
            AnalysisStage::SkinExtracted => "Skin regions extracted",
            AnalysisStage::Matched => "Matched against the Monk scale",
            AnalysisStage::Completed => "Analysis complete",
        }
    }
}
