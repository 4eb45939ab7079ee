//! Chat Panel Component
//!
//! Conversation column for the AI assistant. One in-flight request per
//! conversation: the input is disabled while a reply is pending.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::ai::AiClient;
use crate::markdown::render_markdown;
use crate::models::{ChatMessage, ChatRole, Patent};

const GREETING: &str = "您好，我是专利助手，可以解答年费、审查和专利法相关问题。";

#[component]
pub fn ChatPanel(filtered: Memo<Vec<Patent>>) -> impl IntoView {
    let messages = RwSignal::new(vec![ChatMessage {
        role: ChatRole::Assistant,
        text: GREETING.to_string(),
    }]);
    let (input, set_input) = signal(String::new());
    let (sending, set_sending) = signal(false);
    let (include_context, set_include_context) = signal(true);
    let online = AiClient::from_env().is_online();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let question = input.get().trim().to_string();
        if question.is_empty() || sending.get() {
            return;
        }
        messages.update(|m| m.push(ChatMessage { role: ChatRole::User, text: question.clone() }));
        set_input.set(String::new());
        set_sending.set(true);

        let context = if include_context.get() {
            filtered.get_untracked()
        } else {
            Vec::new()
        };
        spawn_local(async move {
            let client = AiClient::from_env();
            let reply = client.ask(&question, &context).await;
            messages.update(|m| m.push(ChatMessage { role: ChatRole::Assistant, text: reply }));
            set_sending.set(false);
        });
    };

    view! {
        <div class="chat-panel">
            <div class="chat-header">
                <span class="chat-title">"AI 助手"</span>
                <Show when=move || !online>
                    <span class="offline-badge">"离线模式"</span>
                </Show>
                <label class="context-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || include_context.get()
                        on:change=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_include_context.set(input.checked());
                        }
                    />
                    "附带专利数据"
                </label>
            </div>

            <div class="chat-messages">
                <For
                    each=move || messages.get().into_iter().enumerate()
                    key=|(i, _)| *i
                    children=move |(_, msg): (usize, ChatMessage)| {
                        match msg.role {
                            ChatRole::User => view! {
                                <div class="chat-msg user">{msg.text.clone()}</div>
                            }.into_any(),
                            ChatRole::Assistant => view! {
                                <div class="chat-msg assistant" inner_html=render_markdown(&msg.text)></div>
                            }.into_any(),
                        }
                    }
                />
                <Show when=move || sending.get()>
                    <div class="chat-msg assistant pending">"思考中..."</div>
                </Show>
            </div>

            <form class="chat-input-row" on:submit=submit>
                <input
                    type="text"
                    class="chat-input"
                    placeholder="咨询专利法律问题..."
                    disabled=move || sending.get()
                    prop:value=move || input.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let field = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_input.set(field.value());
                    }
                />
                <button type="submit" disabled=move || sending.get()>"发送"</button>
            </form>
        </div>
    }
}
