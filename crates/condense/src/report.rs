// ABOUTME: Response payloads of a summarization request: a success report XOR an error message.
// ABOUTME: Serializable with serde so the CLI (or any transport) can emit them as JSON.

use serde::{Deserialize, Serialize};

use condense_summary::TextStats;

use crate::error::PipelineError;

/// Everything a successful run returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub status: String,
    pub original_text: String,
    pub extractive_summary: String,
    pub abstractive_summary: String,
    pub original_stats: TextStats,
    pub extractive_stats: TextStats,
}

/// Failure payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

/// Outcome of a request as handed to the output consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Success(SummaryReport),
    Failure(ErrorBody),
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// The error message of a failed run.
    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Failure(body) => Some(&body.error),
            Response::Success(_) => None,
        }
    }
}

impl From<Result<SummaryReport, PipelineError>> for Response {
    fn from(outcome: Result<SummaryReport, PipelineError>) -> Self {
        match outcome {
            Ok(report) => Response::Success(report),
            Err(err) => Response::Failure(ErrorBody {
                error: err.to_string(),
                kind: err.kind().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_serializes_error_only() {
        let response = Response::from(Err(PipelineError::EmptyContent));
        assert!(!response.is_success());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value["error"],
            "No valid text or URL content could be retrieved."
        );
        assert_eq!(value["kind"], "empty_content");
        assert!(value.get("extractive_summary").is_none());
    }

    #[test]
    fn test_success_round_trips_through_json() {
        let report = SummaryReport {
            status: "success".to_string(),
            original_text: "A. B.".to_string(),
            extractive_summary: "A. B.".to_string(),
            abstractive_summary: "x".to_string(),
            original_stats: TextStats {
                word_count: 2,
                sentence_count: 2,
            },
            extractive_stats: TextStats {
                word_count: 2,
                sentence_count: 2,
            },
        };
        let json = serde_json::to_string(&Response::Success(report.clone())).unwrap();
        assert!(!json.contains("\"error\""));
        let back: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Response::Success(report));
        assert_eq!(back.error(), None);
    }
}
