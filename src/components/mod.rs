//! UI Components

mod alert_banner;
mod chat_panel;
mod delete_confirm_button;
mod import_export_bar;
mod patent_form;
mod patent_table;
mod search_bar;

pub use alert_banner::AlertBanner;
pub use chat_panel::ChatPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use import_export_bar::ImportExportBar;
pub use patent_form::PatentForm;
pub use patent_table::PatentTable;
pub use search_bar::SearchBar;
