//! Alert Banner Component
//!
//! Shows how many active patents fall inside the 90-day annuity window.

use leptos::prelude::*;

#[component]
pub fn AlertBanner(due_soon: Memo<usize>) -> impl IntoView {
    view! {
        <Show when=move || { due_soon.get() > 0 }>
            <div class="alert-banner">
                "⚠ 有 " <span class="alert-count">{move || due_soon.get()}</span>
                " 件专利的年费将在 90 天内到期"
            </div>
        </Show>
    }
}
