//! Delete Confirm Button Component
//!
//! Inline destructive-action gate: deletion only fires after an explicit
//! confirm click, cancel leaves state untouched.

use leptos::prelude::*;

/// Resolve an armed gate: always disarm, fire the callback only on an
/// explicit confirm.
fn resolve_gate(set_armed: WriteSignal<bool>, on_confirm: Callback<()>, confirmed: bool) {
    set_armed.set(false);
    if confirmed {
        on_confirm.run(());
    }
}

/// Inline delete confirmation button
///
/// Shows a × button initially. When clicked, shows "删除?" with ✓/✗ buttons.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);

    view! {
        <Show when=move || !confirm_delete.get()>
            <button
                class=button_class.clone()
                title="删除"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirm_delete.set(true);
                }
            >
                "×"
            </button>
        </Show>
        <Show when=move || confirm_delete.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"删除?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        resolve_gate(set_confirm_delete, on_confirm, true);
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        resolve_gate(set_confirm_delete, on_confirm, false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatentDraft;
    use crate::store::{
        store_insert_patent, store_remove_patent, AppState, AppStateStoreFields, AppStore,
    };

    #[test]
    fn cancel_disarms_without_touching_the_store() {
        let owner = Owner::new();
        owner.set();

        let store = AppStore::new(AppState::new());
        let id = store_insert_patent(
            &store,
            PatentDraft { name: "浇灌装置".to_string(), ..Default::default() },
        );
        let on_confirm = Callback::new(move |_: ()| store_remove_patent(&store, id));

        let (armed, set_armed) = signal(true);
        resolve_gate(set_armed, on_confirm, false);
        assert!(!armed.get_untracked());
        assert_eq!(store.patents().read_untracked().len(), 1);

        // a later explicit confirm still deletes exactly the target
        set_armed.set(true);
        resolve_gate(set_armed, on_confirm, true);
        assert!(!armed.get_untracked());
        assert!(store.patents().read_untracked().is_empty());
    }
}
