//! Patent Table Component
//!
//! Main list view over the filtered store, with per-row edit and
//! gated delete actions. Rows inside the annuity window are flagged.

use chrono::Local;
use leptos::prelude::*;

use crate::alerts;
use crate::context::{AppContext, EditTarget};
use crate::models::Patent;
use crate::store::{store_remove_patent, use_app_store};

use super::DeleteConfirmButton;

#[component]
pub fn PatentTable(filtered: Memo<Vec<Patent>>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="patent-table-wrap">
            <Show when=move || filtered.get().is_empty()>
                <p class="empty-hint">"暂无专利数据，可手动新增或导入表格。"</p>
            </Show>
            <Show when=move || !filtered.get().is_empty()>
                <table class="patent-table">
                    <thead>
                        <tr>
                            <th>"专利名称"</th>
                            <th>"申请号"</th>
                            <th>"国家/地区"</th>
                            <th>"状态"</th>
                            <th>"类型"</th>
                            <th>"年费截止"</th>
                            <th>"操作"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || filtered.get()
                            key=|p| p.id
                            children=move |p: Patent| {
                                let id = p.id;
                                let due_soon = alerts::is_due_soon(&p, Local::now().date_naive());
                                let annuity = p.annuity_date
                                    .map(|d| d.format("%Y-%m-%d").to_string())
                                    .unwrap_or_else(|| "-".to_string());
                                let status_class = format!(
                                    "status-badge status-{}",
                                    p.status.as_str().to_lowercase()
                                );
                                view! {
                                    <tr class=if due_soon { "patent-row due-soon" } else { "patent-row" }>
                                        <td class="cell-name">{p.name.clone()}</td>
                                        <td>{p.app_number.clone()}</td>
                                        <td>{p.country.clone()}</td>
                                        <td><span class=status_class>{p.status.label()}</span></td>
                                        <td>{p.patent_type.label()}</td>
                                        <td class=if due_soon { "cell-annuity due-soon" } else { "cell-annuity" }>
                                            {annuity}
                                        </td>
                                        <td class="cell-actions">
                                            <button
                                                class="edit-btn"
                                                on:click=move |_| ctx.open_editor(EditTarget::Edit(id))
                                            >
                                                "编辑"
                                            </button>
                                            <DeleteConfirmButton
                                                button_class="delete-btn"
                                                on_confirm=Callback::new(move |_| {
                                                    store_remove_patent(&store, id);
                                                    ctx.close_editor();
                                                })
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
            <p class="patent-count">{move || format!("共 {} 件专利", filtered.get().len())}</p>
        </div>
    }
}
