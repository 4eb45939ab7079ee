//! Import / Export Bar Component
//!
//! One-shot batch operations: xlsx import through the deduplicator and
//! xlsx export of the current filtered view. Outcomes surface as
//! informational messages, never as uncaught failures.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::context::AppContext;
use crate::download;
use crate::models::Patent;
use crate::spreadsheet;
use crate::store::{store_merge_imports, use_app_store};

#[component]
pub fn ImportExportBar(filtered: Memo<Vec<Patent>>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let export = move |_| {
        let patents = filtered.get_untracked();
        if patents.is_empty() {
            ctx.info("当前列表为空，没有可导出的数据");
            return;
        }
        let today = Local::now().date_naive();
        match spreadsheet::write_workbook(&patents) {
            Ok(bytes) => {
                let file_name = spreadsheet::export_file_name(today);
                web_sys::console::log_1(
                    &format!("[EXPORT] {} rows -> {}", patents.len(), file_name).into(),
                );
                if let Err(err) = download::download_xlsx(&bytes, &file_name) {
                    ctx.info(format!("导出失败：{}", err));
                }
            }
            Err(err) => ctx.info(format!("导出失败：{}", err)),
        }
    };

    let import = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap().clone();
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        spawn_local(async move {
            match JsFuture::from(file.array_buffer()).await {
                Ok(buffer) => {
                    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                    match spreadsheet::read_workbook(&bytes) {
                        Ok(drafts) if drafts.is_empty() => {
                            ctx.info("文件中没有可导入的记录");
                        }
                        Ok(drafts) => {
                            let report = store_merge_imports(&store, drafts);
                            ctx.info(report.message());
                        }
                        Err(err) => ctx.info(format!("导入失败：{}", err)),
                    }
                }
                Err(_) => ctx.info("读取文件失败"),
            }
            // allow re-importing the same file path
            input.set_value("");
        });
    };

    view! {
        <div class="import-export-bar">
            <label class="import-btn">
                "导入表格"
                <input
                    type="file"
                    class="import-input"
                    accept=".xlsx"
                    on:change=import
                />
            </label>
            <button class="export-btn" on:click=export>"导出表格"</button>
        </div>
    }
}
