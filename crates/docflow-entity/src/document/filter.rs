//! Document list filter.

use serde::{Deserialize, Serialize};

use docflow_core::types::ProjectId;

use super::kind::DocumentType;
use super::model::Document;
use super::status::WorkflowStatus;

/// Criteria for listing documents. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    /// Restrict to one project.
    pub project_id: Option<ProjectId>,
    /// Restrict to one type.
    pub doc_type: Option<DocumentType>,
    /// Restrict to one current status.
    pub status: Option<WorkflowStatus>,
    /// Exact discipline.
    pub discipline: Option<String>,
    /// Case-insensitive substring of the current version label.
    pub version_contains: Option<String>,
    /// Case-insensitive substring of the code or title.
    pub text: Option<String>,
    /// Only transmittals and documents awaiting the client.
    #[serde(default)]
    pub transmittal_view: bool,
}

impl DocumentFilter {
    /// Filter for a single project.
    pub fn for_project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
            ..Self::default()
        }
    }

    /// Whether `doc` satisfies every set criterion.
    pub fn matches(&self, doc: &Document) -> bool {
        if self.project_id.is_some_and(|p| p != doc.project_id) {
            return false;
        }
        if self.doc_type.is_some_and(|t| t != doc.doc_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != doc.current_status) {
            return false;
        }
        if self
            .discipline
            .as_deref()
            .is_some_and(|d| d != doc.discipline)
        {
            return false;
        }
        if let Some(needle) = self.version_contains.as_deref() {
            if !contains_ignore_case(doc.current_version.as_str(), needle) {
                return false;
            }
        }
        if let Some(needle) = self.text.as_deref() {
            if !contains_ignore_case(&doc.code, needle) && !contains_ignore_case(&doc.title, needle)
            {
                return false;
            }
        }
        if self.transmittal_view
            && !(doc.is_transmittal() || doc.current_status == WorkflowStatus::AnalysisClient)
        {
            return false;
        }
        true
    }

    /// Keep matching documents, most recently modified first.
    ///
    /// Ties fall back to the id, newest first.
    pub fn apply(&self, docs: impl IntoIterator<Item = Document>) -> Vec<Document> {
        let mut matched: Vec<Document> = docs.into_iter().filter(|d| self.matches(d)).collect();
        matched.sort_by(|a, b| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| b.id.cmp(&a.id))
        });
        matched
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use docflow_core::types::DocumentId;

    use crate::document::Qualification;

    fn doc(code: &str, doc_type: DocumentType, status: WorkflowStatus, hours: i64) -> Document {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        Document {
            id: DocumentId::new(),
            project_id: ProjectId::new(),
            code: code.to_string(),
            title: format!("Title of {code}"),
            doc_type,
            discipline: "Electrical - EL".to_string(),
            nature: "Test Report - RT".to_string(),
            issuer: "Internal Engineering".to_string(),
            current_version: doc_type.initial_version(),
            current_status: status,
            current_qualification: Qualification::None,
            is_locked: false,
            versions: Vec::new(),
            last_modified: base + Duration::hours(hours),
            forecast_date: None,
            informative: false,
            as_built: false,
            taf_tac: None,
            ge_code: None,
            access_code: None,
        }
    }

    fn sample() -> Vec<Document> {
        vec![
            doc("EL-001", DocumentType::Technical, WorkflowStatus::Draft, 1),
            doc("EL-002", DocumentType::Technical, WorkflowStatus::AnalysisClient, 3),
            doc("MG-010", DocumentType::Managerial, WorkflowStatus::Execution, 2),
            doc("GRD-0001", DocumentType::Transmittal, WorkflowStatus::AnalysisClient, 4),
        ]
    }

    fn codes(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.code.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_sorts_newest_first() {
        let listed = DocumentFilter::default().apply(sample());
        assert_eq!(codes(&listed), vec!["GRD-0001", "EL-002", "MG-010", "EL-001"]);
    }

    #[test]
    fn test_equal_timestamps_sort_by_id() {
        let docs = vec![
            doc("GRD-0001", DocumentType::Transmittal, WorkflowStatus::AnalysisClient, 2),
            doc("XV-EL-101", DocumentType::Technical, WorkflowStatus::AnalysisClient, 2),
            doc("XV-EL-102", DocumentType::Technical, WorkflowStatus::AnalysisClient, 2),
        ];
        let filter = DocumentFilter::default();

        let forward = filter.apply(docs.clone());
        let reversed = filter.apply(docs.into_iter().rev());
        assert_eq!(forward, reversed);
        assert!(forward.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[test]
    fn test_criteria_combine() {
        let filter = DocumentFilter {
            doc_type: Some(DocumentType::Technical),
            text: Some("el-00".to_string()),
            version_contains: Some("0a".to_string()),
            ..DocumentFilter::default()
        };
        assert_eq!(codes(&filter.apply(sample())), vec!["EL-002", "EL-001"]);

        let filter = DocumentFilter {
            status: Some(WorkflowStatus::Execution),
            ..DocumentFilter::default()
        };
        assert_eq!(codes(&filter.apply(sample())), vec!["MG-010"]);

        let filter = DocumentFilter {
            discipline: Some("Civil - CV".to_string()),
            ..DocumentFilter::default()
        };
        assert!(filter.apply(sample()).is_empty());
    }

    #[test]
    fn test_transmittal_view() {
        let filter = DocumentFilter {
            transmittal_view: true,
            ..DocumentFilter::default()
        };
        assert_eq!(codes(&filter.apply(sample())), vec!["GRD-0001", "EL-002"]);
    }

    #[test]
    fn test_project_filter() {
        let docs = sample();
        let project_id = docs[2].project_id;
        let listed = DocumentFilter::for_project(project_id).apply(docs);
        assert_eq!(codes(&listed), vec!["MG-010"]);
    }
}
