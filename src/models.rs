//! Frontend Models
//!
//! Patent record types shared by the store, the spreadsheet boundary and
//! the AI assistant.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Legal status of a patent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatentStatus {
    Active,
    Expired,
    UnderExamination,
}

impl PatentStatus {
    pub const ALL: [PatentStatus; 3] = [
        PatentStatus::Active,
        PatentStatus::Expired,
        PatentStatus::UnderExamination,
    ];

    /// Display label (Chinese, matches export headers)
    pub fn label(&self) -> &'static str {
        match self {
            PatentStatus::Active => "有效",
            PatentStatus::Expired => "失效",
            PatentStatus::UnderExamination => "审查中",
        }
    }

    /// Stable identifier used in select values and AI JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            PatentStatus::Active => "Active",
            PatentStatus::Expired => "Expired",
            PatentStatus::UnderExamination => "UnderExamination",
        }
    }

    /// Accepts both the stable identifier and the Chinese label
    /// (spreadsheet cells and AI replies use either).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Active" | "有效" => Some(PatentStatus::Active),
            "Expired" | "失效" => Some(PatentStatus::Expired),
            "UnderExamination" | "审查中" | "实质审查" => Some(PatentStatus::UnderExamination),
            _ => None,
        }
    }
}

/// Kind of patent right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatentType {
    Invention,
    Utility,
    Design,
}

impl PatentType {
    pub const ALL: [PatentType; 3] = [
        PatentType::Invention,
        PatentType::Utility,
        PatentType::Design,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PatentType::Invention => "发明",
            PatentType::Utility => "实用新型",
            PatentType::Design => "外观设计",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatentType::Invention => "Invention",
            PatentType::Utility => "Utility",
            PatentType::Design => "Design",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Invention" | "发明" | "发明专利" => Some(PatentType::Invention),
            "Utility" | "实用新型" => Some(PatentType::Utility),
            "Design" | "外观设计" | "外观" => Some(PatentType::Design),
            _ => None,
        }
    }
}

/// Patent record, the single domain entity of the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patent {
    pub id: u32,
    pub name: String,
    pub patentee: String,
    pub country: String,
    pub inventor: String,
    pub status: PatentStatus,
    pub patent_type: PatentType,
    pub app_number: String,
    pub pub_number: String,
    pub app_date: String,
    pub pub_date: String,
    pub duration: String,
    /// Annuity payment deadline; the only machine-read date (90-day window)
    pub annuity_date: Option<NaiveDate>,
    /// Which renewal cycle is pending (e.g. 3 = third-year fee)
    pub annuity_year: Option<u32>,
    pub notify_emails: Vec<String>,
    pub link: String,
    pub summary: String,
}

/// Partial patent record, before the store assigns an id.
///
/// Shared by spreadsheet rows, AI parse results and the create form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatentDraft {
    pub name: String,
    pub patentee: String,
    pub country: String,
    pub inventor: String,
    pub status: Option<PatentStatus>,
    pub patent_type: Option<PatentType>,
    pub app_number: String,
    pub pub_number: String,
    pub app_date: String,
    pub pub_date: String,
    pub duration: String,
    pub annuity_date: Option<NaiveDate>,
    pub annuity_year: Option<u32>,
    pub notify_emails: Vec<String>,
    pub link: String,
    pub summary: String,
}

impl PatentDraft {
    /// A draft with no content at all is treated as "no result" by callers.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.patentee.trim().is_empty()
            && self.country.trim().is_empty()
            && self.inventor.trim().is_empty()
            && self.status.is_none()
            && self.patent_type.is_none()
            && self.app_number.trim().is_empty()
            && self.pub_number.trim().is_empty()
            && self.app_date.trim().is_empty()
            && self.pub_date.trim().is_empty()
            && self.duration.trim().is_empty()
            && self.annuity_date.is_none()
            && self.annuity_year.is_none()
            && self.notify_emails.is_empty()
            && self.link.trim().is_empty()
            && self.summary.trim().is_empty()
    }

    /// Promote to a full record with a store-assigned id.
    /// Missing classification defaults to Active / Invention.
    pub fn into_patent(self, id: u32) -> Patent {
        Patent {
            id,
            name: self.name,
            patentee: self.patentee,
            country: self.country,
            inventor: self.inventor,
            status: self.status.unwrap_or(PatentStatus::Active),
            patent_type: self.patent_type.unwrap_or(PatentType::Invention),
            app_number: self.app_number,
            pub_number: self.pub_number,
            app_date: self.app_date,
            pub_date: self.pub_date,
            duration: self.duration,
            annuity_date: self.annuity_date,
            annuity_year: self.annuity_year,
            notify_emails: self.notify_emails,
            link: self.link,
            summary: self.summary,
        }
    }
}

impl From<&Patent> for PatentDraft {
    fn from(p: &Patent) -> Self {
        PatentDraft {
            name: p.name.clone(),
            patentee: p.patentee.clone(),
            country: p.country.clone(),
            inventor: p.inventor.clone(),
            status: Some(p.status),
            patent_type: Some(p.patent_type),
            app_number: p.app_number.clone(),
            pub_number: p.pub_number.clone(),
            app_date: p.app_date.clone(),
            pub_date: p.pub_date.clone(),
            duration: p.duration.clone(),
            annuity_date: p.annuity_date,
            annuity_year: p.annuity_year,
            notify_emails: p.notify_emails.clone(),
            link: p.link.clone(),
            summary: p.summary.clone(),
        }
    }
}

/// Parse the date formats seen in spreadsheet cells and AI replies.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    None
}

/// Who said a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the assistant conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_identifier_and_label() {
        assert_eq!(PatentStatus::parse("Active"), Some(PatentStatus::Active));
        assert_eq!(PatentStatus::parse(" 审查中 "), Some(PatentStatus::UnderExamination));
        assert_eq!(PatentStatus::parse("unknown"), None);
    }

    #[test]
    fn empty_draft_is_empty_but_named_draft_is_not() {
        assert!(PatentDraft::default().is_empty());
        let draft = PatentDraft { name: "灌溉装置".to_string(), ..Default::default() };
        assert!(!draft.is_empty());
    }

    #[test]
    fn flexible_date_accepts_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        for s in ["2026-09-01", "2026/09/01", "2026年09月01日", " 2026-09-01 "] {
            assert_eq!(parse_flexible_date(s), Some(expected), "input {:?}", s);
        }
        assert_eq!(parse_flexible_date("下周三"), None);
        assert_eq!(parse_flexible_date(""), None);
    }

    #[test]
    fn draft_promotion_defaults_classification() {
        let patent = PatentDraft::default().into_patent(7);
        assert_eq!(patent.id, 7);
        assert_eq!(patent.status, PatentStatus::Active);
        assert_eq!(patent.patent_type, PatentType::Invention);
    }
}
