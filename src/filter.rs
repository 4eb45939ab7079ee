//! Filter View
//!
//! Derives the displayed subset of the store: free-text search across
//! several fields plus an optional status filter.

use crate::models::{Patent, PatentStatus};

/// Fields covered by the free-text search, in match order
fn search_fields(p: &Patent) -> [&str; 5] {
    [&p.name, &p.app_number, &p.pub_number, &p.country, &p.patentee]
}

/// True when the patent survives both the search term and the status filter.
///
/// The search is literal case-sensitive substring containment; an empty
/// term matches everything. `None` status means "no filter".
pub fn matches(p: &Patent, term: &str, status: Option<PatentStatus>) -> bool {
    if let Some(wanted) = status {
        if p.status != wanted {
            return false;
        }
    }
    term.is_empty() || search_fields(p).iter().any(|f| f.contains(term))
}

/// Ordered subsequence of the store matching the current search/filter.
/// Insertion order is preserved, never re-sorted.
pub fn filter_patents(patents: &[Patent], term: &str, status: Option<PatentStatus>) -> Vec<Patent> {
    patents
        .iter()
        .filter(|p| matches(p, term, status))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatentDraft;

    fn patent(id: u32, name: &str, country: &str, status: PatentStatus) -> Patent {
        let mut p = PatentDraft {
            name: name.to_string(),
            country: country.to_string(),
            app_number: format!("11200{}", id),
            ..Default::default()
        }
        .into_patent(id);
        p.status = status;
        p
    }

    #[test]
    fn empty_term_and_no_filter_returns_everything_in_order() {
        let patents = vec![
            patent(1, "浇灌装置", "CN", PatentStatus::Active),
            patent(2, "连接器", "US", PatentStatus::Expired),
            patent(3, "显示面板", "JP", PatentStatus::UnderExamination),
        ];
        let out = filter_patents(&patents, "", None);
        assert_eq!(out.len(), 3);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn search_is_a_multi_field_or() {
        let patents = vec![
            patent(1, "浇灌装置", "CN", PatentStatus::Active),
            patent(2, "连接器", "US", PatentStatus::Active),
        ];
        // term only matches the country field
        let out = filter_patents(&patents, "US", None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
        // term matches the application number
        let out = filter_patents(&patents, "112001", None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn search_is_case_sensitive_substring() {
        let patents = vec![patent(1, "Foo", "CN", PatentStatus::Active)];
        assert_eq!(filter_patents(&patents, "Fo", None).len(), 1);
        assert_eq!(filter_patents(&patents, "fo", None).len(), 0);
    }

    #[test]
    fn status_filter_combines_with_search() {
        let patents = vec![
            patent(1, "浇灌装置", "CN", PatentStatus::Active),
            patent(2, "浇灌系统", "CN", PatentStatus::Expired),
        ];
        let out = filter_patents(&patents, "浇灌", Some(PatentStatus::Expired));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
    }
}
