//! Patent Form Panel
//!
//! Side panel for creating and editing records. The same form serves
//! both modes; an AI-assist section can pre-fill fields from pasted
//! text or an uploaded document, leaving the form untouched on failure.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::ai::AiClient;
use crate::context::{AppContext, EditTarget};
use crate::models::{parse_flexible_date, PatentDraft, PatentStatus, PatentType};
use crate::store::{
    store_get_patent, store_insert_patent, store_replace_patent, use_app_store,
};

/// Labelled single-line text input bound to one draft field
#[component]
fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label class="form-label">{label}</label>
            <input
                type="text"
                class="form-input"
                prop:value=move || value.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    on_input.run(input.value());
                }
            />
        </div>
    }
}

/// Overwrite form fields with whatever the AI parse returned; fields it
/// left out keep their current value.
fn apply_parsed(form: &mut PatentDraft, parsed: PatentDraft) {
    fn keep_text(dst: &mut String, src: String) {
        if !src.trim().is_empty() {
            *dst = src;
        }
    }
    keep_text(&mut form.name, parsed.name);
    keep_text(&mut form.patentee, parsed.patentee);
    keep_text(&mut form.country, parsed.country);
    keep_text(&mut form.inventor, parsed.inventor);
    keep_text(&mut form.app_number, parsed.app_number);
    keep_text(&mut form.pub_number, parsed.pub_number);
    keep_text(&mut form.app_date, parsed.app_date);
    keep_text(&mut form.pub_date, parsed.pub_date);
    keep_text(&mut form.duration, parsed.duration);
    keep_text(&mut form.link, parsed.link);
    keep_text(&mut form.summary, parsed.summary);
    if parsed.status.is_some() {
        form.status = parsed.status;
    }
    if parsed.patent_type.is_some() {
        form.patent_type = parsed.patent_type;
    }
    if parsed.annuity_date.is_some() {
        form.annuity_date = parsed.annuity_date;
    }
    if parsed.annuity_year.is_some() {
        form.annuity_year = parsed.annuity_year;
    }
    if !parsed.notify_emails.is_empty() {
        form.notify_emails = parsed.notify_emails;
    }
}

#[component]
pub fn PatentForm() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let draft = RwSignal::new(PatentDraft::default());
    let (paste_text, set_paste_text) = signal(String::new());
    let (parsing, set_parsing) = signal(false);

    // Track which target loaded the form so a store change does not
    // clobber in-progress edits
    let (last_target, set_last_target) = signal::<Option<EditTarget>>(None);

    Effect::new(move |_| {
        let target = ctx.editing.get();
        if last_target.get_untracked() == target {
            return;
        }
        set_last_target.set(target);
        match target {
            Some(EditTarget::Edit(id)) => {
                if let Some(patent) = store_get_patent(&store, id) {
                    draft.set(PatentDraft::from(&patent));
                }
            }
            Some(EditTarget::Create) => draft.set(PatentDraft::default()),
            None => {}
        }
        set_paste_text.set(String::new());
    });

    let save = move |_| {
        let current = draft.get();
        if current.name.trim().is_empty() {
            ctx.info("请填写专利名称");
            return;
        }
        match ctx.editing.get() {
            Some(EditTarget::Edit(id)) => {
                store_replace_patent(&store, current.into_patent(id));
            }
            Some(EditTarget::Create) => {
                store_insert_patent(&store, current);
            }
            None => return,
        }
        ctx.close_editor();
    };

    let parse_text = move |_| {
        let text = paste_text.get();
        if text.trim().is_empty() || parsing.get() {
            return;
        }
        let client = AiClient::from_env();
        if !client.is_online() {
            ctx.info("AI 识别不可用：未配置 API 密钥，请手动填写");
            return;
        }
        set_parsing.set(true);
        spawn_local(async move {
            match client.parse_patent_text(&text).await {
                Some(parsed) => draft.update(|d| apply_parsed(d, parsed)),
                None => ctx.info("AI 未能识别出专利信息，请手动填写"),
            }
            set_parsing.set(false);
        });
    };

    let parse_file = move |ev: web_sys::Event| {
        if parsing.get() {
            return;
        }
        let target = ev.target().unwrap();
        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap().clone();
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let client = AiClient::from_env();
        if !client.is_online() {
            ctx.info("AI 识别不可用：未配置 API 密钥，请手动填写");
            input.set_value("");
            return;
        }
        set_parsing.set(true);
        spawn_local(async move {
            let name = file.name();
            let mime = file.type_();
            match JsFuture::from(file.array_buffer()).await {
                Ok(buffer) => {
                    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                    match client.parse_patent_file(&bytes, &mime, &name).await {
                        Some(parsed) => draft.update(|d| apply_parsed(d, parsed)),
                        None => ctx.info("AI 未能识别该文件，请手动填写"),
                    }
                }
                Err(_) => ctx.info("读取文件失败"),
            }
            input.set_value("");
            set_parsing.set(false);
        });
    };

    // one Callback per text field keeps the view! body readable
    let text_field = move |label: &'static str,
                           get: fn(&PatentDraft) -> &String,
                           set: fn(&mut PatentDraft, String)| {
        view! {
            <TextField
                label=label
                value=Signal::derive(move || get(&draft.get()).clone())
                on_input=Callback::new(move |v| draft.update(|d| set(d, v)))
            />
        }
    };

    view! {
        {move || match ctx.editing.get() {
            Some(target) => {
                let title = match target {
                    EditTarget::Create => "新增专利",
                    EditTarget::Edit(_) => "编辑专利",
                };
                view! {
                    <div class="patent-form-panel">
                        <div class="form-header">
                            <span class="form-title">{title}</span>
                            <button class="close-btn" on:click=move |_| ctx.close_editor()>"×"</button>
                        </div>

                        // AI assist: paste text or upload a document
                        <div class="form-section ai-assist">
                            <label class="form-label">"AI 识别（粘贴专利文本或上传文件）"</label>
                            <textarea
                                class="paste-area"
                                placeholder="粘贴专利著录信息..."
                                prop:value=move || paste_text.get()
                                on:input=move |ev| {
                                    let target = ev.target().unwrap();
                                    let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                                    set_paste_text.set(area.value());
                                }
                            ></textarea>
                            <div class="ai-assist-row">
                                <button
                                    class="ai-parse-btn"
                                    disabled=move || parsing.get()
                                    on:click=parse_text
                                >
                                    {move || if parsing.get() { "识别中..." } else { "识别文本" }}
                                </button>
                                <input
                                    type="file"
                                    class="file-parse-input"
                                    accept=".pdf,.txt,.png,.jpg,.jpeg"
                                    disabled=move || parsing.get()
                                    on:change=parse_file
                                />
                            </div>
                        </div>

                        <div class="form-section">
                            {text_field("专利名称 *", |d| &d.name, |d, v| d.name = v)}
                            {text_field("专利权人", |d| &d.patentee, |d, v| d.patentee = v)}
                            {text_field("国家/地区", |d| &d.country, |d, v| d.country = v)}
                            {text_field("发明人", |d| &d.inventor, |d, v| d.inventor = v)}

                            <div class="form-field">
                                <label class="form-label">"专利状态"</label>
                                <select
                                    class="form-select"
                                    prop:value=move || {
                                        draft.get().status.unwrap_or(PatentStatus::Active).as_str().to_string()
                                    }
                                    on:change=move |ev| {
                                        let target = ev.target().unwrap();
                                        let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                                        let status = PatentStatus::parse(&select.value());
                                        draft.update(|d| d.status = status);
                                    }
                                >
                                    {PatentStatus::ALL.iter().map(|s| view! {
                                        <option value=s.as_str()>{s.label()}</option>
                                    }).collect_view()}
                                </select>
                            </div>

                            <div class="form-field">
                                <label class="form-label">"专利类型"</label>
                                <select
                                    class="form-select"
                                    prop:value=move || {
                                        draft.get().patent_type.unwrap_or(PatentType::Invention).as_str().to_string()
                                    }
                                    on:change=move |ev| {
                                        let target = ev.target().unwrap();
                                        let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                                        let kind = PatentType::parse(&select.value());
                                        draft.update(|d| d.patent_type = kind);
                                    }
                                >
                                    {PatentType::ALL.iter().map(|t| view! {
                                        <option value=t.as_str()>{t.label()}</option>
                                    }).collect_view()}
                                </select>
                            </div>

                            {text_field("申请号", |d| &d.app_number, |d, v| d.app_number = v)}
                            {text_field("公开号", |d| &d.pub_number, |d, v| d.pub_number = v)}
                            {text_field("申请日", |d| &d.app_date, |d, v| d.app_date = v)}
                            {text_field("公开日", |d| &d.pub_date, |d, v| d.pub_date = v)}
                            {text_field("有效期", |d| &d.duration, |d, v| d.duration = v)}

                            <div class="form-field">
                                <label class="form-label">"年费缴纳截止日"</label>
                                <input
                                    type="date"
                                    class="form-input"
                                    prop:value=move || {
                                        draft.get().annuity_date
                                            .map(|d| d.format("%Y-%m-%d").to_string())
                                            .unwrap_or_default()
                                    }
                                    on:change=move |ev| {
                                        let target = ev.target().unwrap();
                                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                        let date = parse_flexible_date(&input.value());
                                        draft.update(|d| d.annuity_date = date);
                                    }
                                />
                            </div>

                            <div class="form-field">
                                <label class="form-label">"年费年度"</label>
                                <input
                                    type="number"
                                    class="form-input"
                                    min="1"
                                    prop:value=move || {
                                        draft.get().annuity_year.map(|y| y.to_string()).unwrap_or_default()
                                    }
                                    on:change=move |ev| {
                                        let target = ev.target().unwrap();
                                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                        let year = input.value().parse::<u32>().ok().filter(|y| *y > 0);
                                        draft.update(|d| d.annuity_year = year);
                                    }
                                />
                            </div>

                            <TextField
                                label="通知邮箱（分号分隔）"
                                value=Signal::derive(move || draft.get().notify_emails.join("; "))
                                on_input=Callback::new(move |v: String| {
                                    let emails: Vec<String> = v
                                        .split([';', ',', '；', '，'])
                                        .map(str::trim)
                                        .filter(|e| !e.is_empty())
                                        .map(str::to_string)
                                        .collect();
                                    draft.update(|d| d.notify_emails = emails);
                                })
                            />

                            {text_field("相关链接", |d| &d.link, |d, v| d.link = v)}

                            <div class="form-field">
                                <label class="form-label">"简要说明"</label>
                                <textarea
                                    class="form-textarea"
                                    prop:value=move || draft.get().summary
                                    on:input=move |ev| {
                                        let target = ev.target().unwrap();
                                        let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                                        let value = area.value();
                                        draft.update(|d| d.summary = value);
                                    }
                                ></textarea>
                            </div>
                        </div>

                        <div class="form-footer">
                            <button class="save-btn" on:click=save>"保存"</button>
                            <button class="cancel-btn" on:click=move |_| ctx.close_editor()>"取消"</button>
                        </div>
                    </div>
                }.into_any()
            }
            None => view! { <div></div> }.into_any()
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parsed_fields_overwrite_only_what_they_carry() {
        let mut form = PatentDraft {
            name: "手填名称".to_string(),
            patentee: "手填权利人".to_string(),
            ..Default::default()
        };
        let parsed = PatentDraft {
            name: "AI 名称".to_string(),
            annuity_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            status: Some(PatentStatus::Expired),
            ..Default::default()
        };
        apply_parsed(&mut form, parsed);
        assert_eq!(form.name, "AI 名称");
        // fields the parse left blank keep their manual values
        assert_eq!(form.patentee, "手填权利人");
        assert_eq!(form.annuity_date, NaiveDate::from_ymd_opt(2026, 9, 1));
        assert_eq!(form.status, Some(PatentStatus::Expired));
    }

    #[test]
    fn whitespace_only_parse_output_does_not_clobber() {
        let mut form = PatentDraft { country: "CN".to_string(), ..Default::default() };
        let parsed = PatentDraft { country: "   ".to_string(), ..Default::default() };
        apply_parsed(&mut form, parsed);
        assert_eq!(form.country, "CN");
    }
}
