//! PatentVault Frontend App
//!
//! Main application component: toolbar, patent table, edit panel and
//! assistant column. All views derive from the single patent store.

use chrono::Local;
use leptos::prelude::*;

use crate::alerts;
use crate::components::{
    AlertBanner, ChatPanel, ImportExportBar, PatentForm, PatentTable, SearchBar,
};
use crate::context::{AppContext, EditTarget};
use crate::filter;
use crate::models::PatentStatus;
use crate::store::{AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    // Source of truth
    let store = AppStore::new(AppState::new());
    provide_context(store);

    // View state
    let (term, set_term) = signal(String::new());
    let (status, set_status) = signal::<Option<PatentStatus>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (editing, set_editing) = signal::<Option<EditTarget>>(None);

    // Provide context to all children
    provide_context(AppContext::new((notice, set_notice), (editing, set_editing)));

    // Filtered view: recomputed when the store, term or status changes
    let filtered = Memo::new(move |_| {
        filter::filter_patents(&store.patents().get(), &term.get(), status.get())
    });

    // Alert count: rolling 90-day annuity window over the whole store
    let due_soon = Memo::new(move |_| {
        alerts::count_due_soon(&store.patents().get(), Local::now().date_naive())
    });

    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="app-layout">
            <main class="main-content">
                <header class="app-header">
                    <h1>"PatentVault 专利管理"</h1>
                    <AlertBanner due_soon=due_soon />
                </header>

                {move || notice.get().map(|msg| view! {
                    <div class="notice-bar">
                        <span class="notice-text">{msg}</span>
                        <button class="notice-close" on:click=move |_| ctx.clear_notice()>"×"</button>
                    </div>
                })}

                <div class="toolbar">
                    <SearchBar term=term set_term=set_term status=status set_status=set_status />
                    <button
                        class="add-btn"
                        on:click=move |_| ctx.open_editor(EditTarget::Create)
                    >
                        "新增专利"
                    </button>
                    <ImportExportBar filtered=filtered />
                </div>

                <PatentTable filtered=filtered />
            </main>

            // Right: edit panel (shown while editing) and assistant column
            <PatentForm />
            <ChatPanel filtered=filtered />
        </div>
    }
}
