//! AI Assistant Adapter
//!
//! Forwards patent-law questions (plus optional patent context) to the
//! Gemini generateContent endpoint, and parses pasted text or uploaded
//! documents into best-effort patent drafts. Every failure path resolves
//! to a fallback string or a `None` draft; nothing here returns an error
//! to the rendering layer.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use gloo_timers::future::TimeoutFuture;
use serde_json::{json, Value};

use crate::models::{parse_flexible_date, Patent, PatentDraft, PatentStatus, PatentType};

const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Shown when no API key is configured (fallback mode, clearly labelled)
pub const MISSING_KEY_REPLY: &str =
    "AI 助手当前处于离线模式：未配置 GEMINI_API_KEY，无法联网回答。\
     您仍可以正常管理专利、导入导出数据。";

/// Shown when the service call itself fails
pub const FAILURE_REPLY: &str = "抱歉，AI 助手暂时无法回答，请稍后重试。";

const CHAT_SYSTEM_PROMPT: &str = "你是一名专利事务助手，熟悉各国专利法、年费缴纳和审查流程。\
     请用简体中文简明作答，可使用 Markdown 列表。";

const PARSE_PROMPT: &str = "从下面的专利资料中提取字段，只输出一个 JSON 对象，不要输出其他文字。\
     键名：name, patentee, country, status, type, appNumber, pubNumber, \
     appDate, pubDate, duration, annuityDate, annuityYear, inventor, abstract。\
     status 取 Active/Expired/UnderExamination，type 取 Invention/Utility/Design，\
     日期用 YYYY-MM-DD，缺失的字段省略。";

/// Thin client over the generative-text service.
///
/// The key is baked in at build time; a missing key degrades every call
/// to the labelled fallback reply instead of crashing.
#[derive(Clone)]
pub struct AiClient {
    key: Option<&'static str>,
    http: reqwest::Client,
}

impl AiClient {
    pub fn from_env() -> Self {
        Self::with_key(option_env!("GEMINI_API_KEY"))
    }

    fn with_key(key: Option<&'static str>) -> Self {
        Self {
            key: key.filter(|k| !k.is_empty()),
            http: reqwest::Client::new(),
        }
    }

    /// The fixed reply for a missing credential, or `None` when a real
    /// request is possible. Reply selection lives here, outside the
    /// async timer decoration, so the contract is unit-testable.
    pub fn offline_reply(&self) -> Option<&'static str> {
        self.key.is_none().then_some(MISSING_KEY_REPLY)
    }

    /// Answer a chat question. Always resolves to a displayable string;
    /// `Failed` and `Answered` only differ in content.
    pub async fn ask(&self, question: &str, context: &[Patent]) -> String {
        if let Some(offline) = self.offline_reply() {
            // keep the "thinking" rhythm of a real reply in offline mode
            TimeoutFuture::new(600).await;
            return offline.to_string();
        }
        let prompt = build_chat_prompt(question, context);
        match self.generate(vec![json!({ "text": prompt })]).await {
            Ok(reply) => reply,
            Err(err) => {
                web_sys::console::warn_1(&format!("[AI] chat failed: {}", err).into());
                FAILURE_REPLY.to_string()
            }
        }
    }

    /// Parse pasted free text into a draft; `None` means "population
    /// failed, leave the form blank", never a zero-value record.
    pub async fn parse_patent_text(&self, text: &str) -> Option<PatentDraft> {
        self.key?;
        let prompt = format!("{}\n\n专利资料：\n{}", PARSE_PROMPT, text);
        match self.generate(vec![json!({ "text": prompt })]).await {
            Ok(reply) => draft_from_reply(&reply),
            Err(err) => {
                web_sys::console::warn_1(&format!("[AI] text parse failed: {}", err).into());
                None
            }
        }
    }

    /// Parse an uploaded document (base64 inline payload + MIME type).
    pub async fn parse_patent_file(
        &self,
        bytes: &[u8],
        mime: &str,
        file_name: &str,
    ) -> Option<PatentDraft> {
        self.key?;
        let mime = if mime.is_empty() {
            mime_guess::from_path(file_name)
                .first_or_octet_stream()
                .to_string()
        } else {
            mime.to_string()
        };
        let parts = vec![
            json!({ "inlineData": { "mimeType": mime, "data": BASE64.encode(bytes) } }),
            json!({ "text": PARSE_PROMPT }),
        ];
        match self.generate(parts).await {
            Ok(reply) => draft_from_reply(&reply),
            Err(err) => {
                web_sys::console::warn_1(&format!("[AI] file parse failed: {}", err).into());
                None
            }
        }
    }

    /// Whether real answers are possible (otherwise fallback mode)
    pub fn is_online(&self) -> bool {
        self.key.is_some()
    }

    async fn generate(&self, parts: Vec<Value>) -> Result<String, String> {
        let Some(key) = self.key else {
            return Err("missing credential".to_string());
        };
        let body = json!({ "contents": [{ "parts": parts }] });
        let response = self
            .http
            .post(ENDPOINT)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("status {}", response.status()));
        }
        let value: Value = response.json().await.map_err(|e| e.to_string())?;
        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| "empty candidate".to_string())
    }
}

/// Compact one-line context summary prepended before the user question.
pub fn format_context_line(p: &Patent) -> String {
    format!(
        "- [#{}] {} | 状态:{} | 类型:{} | 国家:{} | 申请号:{} | 年费截止:{} | 年费年度:{}",
        p.id,
        if p.name.is_empty() { "(未命名)" } else { &p.name },
        p.status.label(),
        p.patent_type.label(),
        if p.country.is_empty() { "-" } else { &p.country },
        if p.app_number.is_empty() { "-" } else { &p.app_number },
        p.annuity_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string()),
        p.annuity_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string()),
    )
}

fn build_chat_prompt(question: &str, context: &[Patent]) -> String {
    let mut prompt = String::from(CHAT_SYSTEM_PROMPT);
    if !context.is_empty() {
        prompt.push_str("\n\n当前专利数据：\n");
        for p in context {
            prompt.push_str(&format_context_line(p));
            prompt.push('\n');
        }
    }
    prompt.push_str("\n用户问题：");
    prompt.push_str(question);
    prompt
}

/// Reply text -> draft. Handles code-fenced JSON; malformed or
/// contentless replies become `None`.
pub fn draft_from_reply(reply: &str) -> Option<PatentDraft> {
    let value: Value = serde_json::from_str(strip_code_fence(reply)).ok()?;
    let obj = value.as_object()?;

    let text = |key: &str| -> String {
        obj.get(key)
            .map(|v| match v {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                _ => String::new(),
            })
            .unwrap_or_default()
    };

    let draft = PatentDraft {
        name: text("name"),
        patentee: text("patentee"),
        country: text("country"),
        inventor: text("inventor"),
        status: PatentStatus::parse(&text("status")),
        patent_type: PatentType::parse(&text("type")),
        app_number: text("appNumber"),
        pub_number: text("pubNumber"),
        app_date: text("appDate"),
        pub_date: text("pubDate"),
        duration: text("duration"),
        annuity_date: parse_reply_date(obj.get("annuityDate")),
        annuity_year: obj.get("annuityYear").and_then(parse_reply_year),
        notify_emails: Vec::new(),
        link: String::new(),
        summary: text("abstract"),
    };
    (!draft.is_empty()).then_some(draft)
}

/// annuityDate arrives as an ISO date string or a numeric unix
/// timestamp (seconds); anything else is dropped.
fn parse_reply_date(value: Option<&Value>) -> Option<chrono::NaiveDate> {
    match value? {
        Value::String(s) => {
            if let Some(date) = parse_flexible_date(s) {
                Some(date)
            } else {
                let secs: i64 = s.trim().parse().ok()?;
                chrono::DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
            }
        }
        Value::Number(n) => {
            let secs = n.as_i64()?;
            chrono::DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

fn parse_reply_year(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Models often wrap JSON in ```json fences; unwrap before parsing.
fn strip_code_fence(s: &str) -> &str {
    let trimmed = s.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn patent() -> Patent {
        let mut p = PatentDraft {
            name: "浇灌装置".to_string(),
            country: "CN".to_string(),
            app_number: "CN112001".to_string(),
            annuity_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            annuity_year: Some(3),
            ..Default::default()
        }
        .into_patent(3);
        p.status = PatentStatus::Active;
        p
    }

    #[test]
    fn missing_credential_selects_the_fixed_offline_reply() {
        let offline = AiClient::with_key(None);
        assert!(!offline.is_online());
        assert_eq!(offline.offline_reply(), Some(MISSING_KEY_REPLY));

        // a blank key counts as unconfigured, not as a usable credential
        let blank = AiClient::with_key(Some(""));
        assert!(!blank.is_online());
        assert_eq!(blank.offline_reply(), Some(MISSING_KEY_REPLY));

        let online = AiClient::with_key(Some("test-key"));
        assert!(online.is_online());
        assert_eq!(online.offline_reply(), None);
    }

    #[test]
    fn chat_prompt_prepends_one_line_per_context_patent() {
        let prompt = build_chat_prompt("第三年年费什么时候交？", &[patent()]);
        assert!(prompt.contains("[#3] 浇灌装置"));
        assert!(prompt.contains("年费截止:2026-09-01"));
        assert!(prompt.contains("用户问题：第三年年费什么时候交？"));
    }

    #[test]
    fn chat_prompt_without_context_omits_the_data_block() {
        let prompt = build_chat_prompt("什么是优先权日？", &[]);
        assert!(!prompt.contains("当前专利数据"));
    }

    #[test]
    fn fenced_json_reply_parses_into_a_draft() {
        let reply = "```json\n{\"name\":\"浇灌装置\",\"status\":\"Active\",\
                     \"appNumber\":\"CN112001\",\"annuityDate\":\"2026-09-01\",\
                     \"annuityYear\":3,\"type\":\"Invention\"}\n```";
        let draft = draft_from_reply(reply).unwrap();
        assert_eq!(draft.name, "浇灌装置");
        assert_eq!(draft.status, Some(PatentStatus::Active));
        assert_eq!(draft.annuity_date, NaiveDate::from_ymd_opt(2026, 9, 1));
        assert_eq!(draft.annuity_year, Some(3));
    }

    #[test]
    fn numeric_annuity_date_is_read_as_unix_seconds() {
        let reply = r#"{"name":"x","annuityDate":1788220800}"#;
        let draft = draft_from_reply(reply).unwrap();
        assert_eq!(draft.annuity_date, NaiveDate::from_ymd_opt(2026, 9, 1));
    }

    #[test]
    fn malformed_or_contentless_replies_are_no_result() {
        assert_eq!(draft_from_reply("抱歉，我无法识别这份资料。"), None);
        assert_eq!(draft_from_reply("{\"broken\":"), None);
        assert_eq!(draft_from_reply("{}"), None);
        assert_eq!(draft_from_reply("[1,2,3]"), None);
    }

    #[test]
    fn unknown_enum_values_fall_back_to_none_not_garbage() {
        let draft = draft_from_reply(r#"{"name":"x","status":"pending","type":"software"}"#).unwrap();
        assert_eq!(draft.status, None);
        assert_eq!(draft.patent_type, None);
    }
}
