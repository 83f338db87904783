//! Request types for the fleet payroll API.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::ingestion::ImportFile;
use crate::models::{EntryFilter, Period};

/// Request body for `POST /imports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Reference period, `YYYY-MM`.
    pub period: String,
    /// Files of the batch, processed in order.
    pub files: Vec<ImportFileRequest>,
}

/// One spreadsheet of an import request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportFileRequest {
    /// Original file name.
    pub name: String,
    /// File contents as text.
    pub content: String,
}

impl From<ImportFileRequest> for ImportFile {
    fn from(file: ImportFileRequest) -> Self {
        ImportFile::new(file.name, file.content)
    }
}

/// Query string accepted by every entry and report endpoint.
///
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    /// Period, `YYYY-MM`.
    #[serde(default)]
    pub period: Option<String>,
    /// Company name.
    #[serde(default)]
    pub company: Option<String>,
    /// Branch name.
    #[serde(default)]
    pub branch: Option<String>,
}

impl FilterQuery {
    /// Validates the query into an [`EntryFilter`].
    pub fn into_filter(self) -> EngineResult<EntryFilter> {
        let period = match non_empty(self.period) {
            Some(value) => Some(Period::parse(&value)?),
            None => None,
        };

        Ok(EntryFilter {
            period,
            company: non_empty(self.company),
            branch: non_empty(self.branch),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_import_request_deserialization() {
        let json = r#"{
            "period": "2024-03",
            "files": [{"name": "embu.csv", "content": "NOME;ADIANTAMENTO\nAna;100"}]
        }"#;
        let request: ImportRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.period, "2024-03");
        let file: ImportFile = request.files[0].clone().into();
        assert_eq!(file.name, "embu.csv");
        assert!(file.contents.starts_with(b"NOME;"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let filter = FilterQuery::default().into_filter().unwrap();
        assert_eq!(filter, EntryFilter::default());
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let query = FilterQuery {
            period: Some(String::new()),
            company: Some(" ".to_string()),
            branch: Some("EMBU".to_string()),
        };
        let filter = query.into_filter().unwrap();

        assert!(filter.period.is_none());
        assert!(filter.company.is_none());
        assert_eq!(filter.branch.as_deref(), Some("EMBU"));
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        let query = FilterQuery {
            period: Some("03/2024".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.into_filter(),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }
}
