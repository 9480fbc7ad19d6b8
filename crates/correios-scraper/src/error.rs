use thiserror::Error;

/// What was wrong with a status list that was found but could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureProblem {
    #[error("status list has no status label")]
    MissingStatusLabel,

    #[error("status list has {found} items, expected at least {expected}")]
    TooFewItems { expected: usize, found: usize },

    #[error("{field} is empty")]
    EmptyField { field: &'static str },
}

/// Failure to read a tracking record out of a page body.
///
/// Every variant is an expected outcome of carrier markup drift or of a code
/// with no tracking history yet; none of them is fatal to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("tracking container not found")]
    ContainerNotFound,

    #[error("status list not found inside tracking container")]
    StatusListNotFound,

    #[error("unexpected status list structure: {0}")]
    UnexpectedStructure(StructureProblem),

    #[error("invalid date/time token \"{token}\": {reason}")]
    DateTimeFormat { token: String, reason: String },
}

impl ExtractionError {
    /// Short name of the parse stage that failed, for log fields.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            ExtractionError::ContainerNotFound => "container",
            ExtractionError::StatusListNotFound => "status_list",
            ExtractionError::UnexpectedStructure(_) => "structure",
            ExtractionError::DateTimeFormat { .. } => "date_time",
        }
    }
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tracking {code} timed out after {secs}s")]
    Timeout { code: String, secs: u64 },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("tracking page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid tracking URL for code \"{code}\": {reason}")]
    InvalidTrackingUrl { code: String, reason: String },

    #[error("could not extract tracking data for {code}: {source}")]
    Extraction {
        code: String,
        #[source]
        source: ExtractionError,
    },
}

impl ScraperError {
    /// Short name of the stage that failed, for log fields.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            ScraperError::Http(_)
            | ScraperError::Timeout { .. }
            | ScraperError::RateLimited { .. }
            | ScraperError::NotFound { .. }
            | ScraperError::UnexpectedStatus { .. } => "transport",
            ScraperError::InvalidTrackingUrl { .. } => "url",
            ScraperError::Extraction { source, .. } => source.stage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_stages_are_distinct() {
        let stages = [
            ExtractionError::ContainerNotFound.stage(),
            ExtractionError::StatusListNotFound.stage(),
            ExtractionError::UnexpectedStructure(StructureProblem::MissingStatusLabel).stage(),
            ExtractionError::DateTimeFormat {
                token: "x".to_owned(),
                reason: "y".to_owned(),
            }
            .stage(),
        ];
        let unique: std::collections::HashSet<_> = stages.iter().collect();
        assert_eq!(unique.len(), stages.len());
    }

    #[test]
    fn scraper_error_reports_extraction_stage() {
        let err = ScraperError::Extraction {
            code: "QB123456789BR".to_owned(),
            source: ExtractionError::StatusListNotFound,
        };
        assert_eq!(err.stage(), "status_list");
        assert!(err.to_string().contains("QB123456789BR"));
    }

    #[test]
    fn too_few_items_message_names_counts() {
        let err = ExtractionError::UnexpectedStructure(StructureProblem::TooFewItems {
            expected: 4,
            found: 3,
        });
        assert_eq!(
            err.to_string(),
            "unexpected status list structure: status list has 3 items, expected at least 4"
        );
    }
}
