//! Search Bar Component
//!
//! Free-text search box plus status filter select. Both feed the
//! filtered view; matching itself lives in `filter.rs`.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::PatentStatus;

#[component]
pub fn SearchBar(
    term: ReadSignal<String>,
    set_term: WriteSignal<String>,
    status: ReadSignal<Option<PatentStatus>>,
    set_status: WriteSignal<Option<PatentStatus>>,
) -> impl IntoView {
    view! {
        <div class="search-bar">
            <input
                type="text"
                class="search-input"
                placeholder="搜索名称 / 申请号 / 公开号 / 国家 / 专利权人..."
                prop:value=move || term.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_term.set(input.value());
                }
            />
            <select
                class="status-select"
                prop:value=move || {
                    status.get().map(|s| s.as_str().to_string()).unwrap_or_default()
                }
                on:change=move |ev| {
                    let target = ev.target().unwrap();
                    let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                    set_status.set(PatentStatus::parse(&select.value()));
                }
            >
                <option value="">"全部状态"</option>
                {PatentStatus::ALL.iter().map(|s| view! {
                    <option value=s.as_str()>{s.label()}</option>
                }).collect_view()}
            </select>
        </div>
    }
}
