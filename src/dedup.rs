//! Import Deduplicator
//!
//! Partitions an imported batch against the existing store using a
//! two-tier identity rule: application number first, record name second,
//! accept unconditionally when both are blank.

use std::collections::HashSet;

use crate::models::{Patent, PatentDraft};

/// Result of partitioning one batch
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Drafts to add, in batch order
    pub accepted: Vec<PatentDraft>,
    /// Number of records rejected as duplicates
    pub rejected: usize,
}

impl ImportOutcome {
    pub fn report(&self) -> ImportReport {
        ImportReport { accepted: self.accepted.len(), rejected: self.rejected }
    }
}

/// Counts surfaced to the user after a merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub accepted: usize,
    pub rejected: usize,
}

impl ImportReport {
    /// Informational message shown after an import (never an error)
    pub fn message(&self) -> String {
        if self.accepted == 0 {
            format!("导入完成：没有新增记录，{} 条与现有专利重复", self.rejected)
        } else if self.rejected == 0 {
            format!("导入完成：新增 {} 条专利", self.accepted)
        } else {
            format!("导入完成：新增 {} 条，忽略重复 {} 条", self.accepted, self.rejected)
        }
    }
}

/// Apply the two-tier dedup rule to each incoming record, in order.
///
/// Tier 1 keys on the trimmed application number, tier 2 on the trimmed
/// name; each tier checks existing records and earlier acceptances from
/// the same batch, and registers only the key it matched on. Records
/// with both keys blank are accepted unconditionally.
pub fn partition_imports(existing: &[Patent], batch: Vec<PatentDraft>) -> ImportOutcome {
    let mut seen_numbers: HashSet<String> = existing
        .iter()
        .filter_map(|p| non_blank(&p.app_number))
        .collect();
    let mut seen_names: HashSet<String> = existing
        .iter()
        .filter_map(|p| non_blank(&p.name))
        .collect();

    let mut accepted = Vec::new();
    let mut rejected = 0;
    for draft in batch {
        if let Some(number) = non_blank(&draft.app_number) {
            if seen_numbers.insert(number) {
                accepted.push(draft);
            } else {
                rejected += 1;
            }
        } else if let Some(name) = non_blank(&draft.name) {
            if seen_names.insert(name) {
                accepted.push(draft);
            } else {
                rejected += 1;
            }
        } else {
            // Both keys blank: duplicate risk accepted by design
            accepted.push(draft);
        }
    }
    ImportOutcome { accepted, rejected }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, app_number: &str) -> PatentDraft {
        PatentDraft {
            name: name.to_string(),
            app_number: app_number.to_string(),
            ..Default::default()
        }
    }

    fn stored(id: u32, name: &str, app_number: &str) -> Patent {
        draft(name, app_number).into_patent(id)
    }

    #[test]
    fn duplicate_numbers_within_one_batch_keep_only_the_first() {
        let out = partition_imports(&[], vec![draft("A", "112001"), draft("B", "112001")]);
        assert_eq!(out.accepted.len(), 1);
        assert_eq!(out.accepted[0].name, "A");
        assert_eq!(out.rejected, 1);
    }

    #[test]
    fn number_collision_with_existing_record_rejects() {
        let existing = vec![stored(1, "A", "112001")];
        let out = partition_imports(&existing, vec![draft("B", "112001")]);
        assert_eq!(out.accepted.len(), 0);
        assert_eq!(out.rejected, 1);
    }

    #[test]
    fn number_is_trimmed_before_comparison() {
        let existing = vec![stored(1, "A", "112001")];
        let out = partition_imports(&existing, vec![draft("B", "  112001  ")]);
        assert_eq!(out.rejected, 1);
    }

    #[test]
    fn blank_number_falls_back_to_name_key() {
        let existing = vec![stored(1, "浇灌装置", "112001")];
        let out = partition_imports(&existing, vec![draft("浇灌装置", "")]);
        assert_eq!(out.accepted.len(), 0);
        assert_eq!(out.rejected, 1);
    }

    #[test]
    fn records_with_both_keys_blank_never_cross_reject() {
        let out = partition_imports(
            &[],
            vec![draft("", ""), draft("", ""), draft("", "")],
        );
        assert_eq!(out.accepted.len(), 3);
        assert_eq!(out.rejected, 0);
    }

    #[test]
    fn reimporting_the_same_record_is_idempotent() {
        let first = partition_imports(&[], vec![draft("A", "112001")]);
        assert_eq!(first.accepted.len(), 1);
        let existing: Vec<Patent> = first
            .accepted
            .into_iter()
            .enumerate()
            .map(|(i, d)| d.into_patent(i as u32 + 1))
            .collect();
        let second = partition_imports(&existing, vec![draft("A", "112001")]);
        assert_eq!(second.accepted.len(), 0);
        assert_eq!(second.rejected, 1);
    }

    #[test]
    fn report_message_distinguishes_outcomes() {
        let all_dupes = ImportReport { accepted: 0, rejected: 2 };
        assert!(all_dupes.message().contains("没有新增"));
        let mixed = ImportReport { accepted: 3, rejected: 1 };
        assert!(mixed.message().contains("3"));
        assert!(mixed.message().contains("1"));
    }
}
