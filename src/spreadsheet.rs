//! Spreadsheet Boundary
//!
//! Flattens the filtered view into fixed Chinese-labelled columns for
//! xlsx export, and parses uploaded workbooks back into patent drafts.
//! Optional fields are normalized to "" here, never passed on as nulls.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::models::{parse_flexible_date, Patent, PatentDraft, PatentStatus, PatentType};

/// Export sheet name
const SHEET_NAME: &str = "专利列表";

/// Fixed column order: (header, column width). Import recognizes rows by
/// these same headers, so the two directions stay in sync.
pub const EXPORT_COLUMNS: &[(&str, f64)] = &[
    ("专利名称", 28.0),
    ("专利权人", 18.0),
    ("国家/地区", 10.0),
    ("发明人", 14.0),
    ("专利状态", 10.0),
    ("专利类型", 10.0),
    ("申请号", 18.0),
    ("公开号", 18.0),
    ("申请日", 12.0),
    ("公开日", 12.0),
    ("有效期", 10.0),
    ("年费缴纳截止日", 16.0),
    ("年费年度", 10.0),
    ("通知邮箱", 24.0),
    ("相关链接", 24.0),
    ("简要说明", 40.0),
];

/// One flat row per patent, every cell a String ("" for absent fields)
pub fn export_row(p: &Patent) -> Vec<String> {
    vec![
        p.name.clone(),
        p.patentee.clone(),
        p.country.clone(),
        p.inventor.clone(),
        p.status.label().to_string(),
        p.patent_type.label().to_string(),
        p.app_number.clone(),
        p.pub_number.clone(),
        p.app_date.clone(),
        p.pub_date.clone(),
        p.duration.clone(),
        p.annuity_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        p.annuity_year.map(|y| y.to_string()).unwrap_or_default(),
        p.notify_emails.join(";"),
        p.link.clone(),
        p.summary.clone(),
    ]
}

pub fn export_rows(patents: &[Patent]) -> Vec<Vec<String>> {
    patents.iter().map(export_row).collect()
}

/// `PatentVault_Export_<YYYY-MM-DD>.xlsx`; same-day exports collide by
/// name on purpose, the user controls overwrite.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("PatentVault_Export_{}.xlsx", today.format("%Y-%m-%d"))
}

/// Encode the filtered view as a single-sheet xlsx workbook.
pub fn write_workbook(patents: &[Patent]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, (header, width)) in EXPORT_COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, *width)?;
        sheet.write_string_with_format(0, col, *header, &header_format)?;
    }
    for (row, cells) in export_rows(patents).iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, cell.as_str())?;
        }
    }
    workbook.save_to_buffer()
}

/// Decode an uploaded workbook into drafts, one per data row.
///
/// Columns are located by header title on the first sheet; rows with no
/// content at all are skipped. Unrecognized status/type cells fall back
/// to the draft defaults.
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<PatentDraft>, String> {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes.to_vec())).map_err(|e: calamine::XlsxError| e.to_string())?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "工作簿中没有工作表".to_string())?
        .map_err(|e| e.to_string())?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| "工作表为空".to_string())?;
    let col_of = |title: &str| -> Option<usize> {
        header.iter().position(|c| cell_text(c) == title)
    };
    let columns: Vec<Option<usize>> = EXPORT_COLUMNS
        .iter()
        .map(|(title, _)| col_of(title))
        .collect();
    if columns.iter().all(Option::is_none) {
        return Err("无法识别表头，请使用导出的模板格式".to_string());
    }

    let cell = |row: &[Data], i: usize| -> Option<Data> {
        columns[i].and_then(|c| row.get(c)).cloned()
    };
    let text = |row: &[Data], i: usize| -> String {
        cell(row, i).map(|c| cell_text(&c)).unwrap_or_default()
    };

    let mut drafts = Vec::new();
    for row in rows {
        if row.iter().all(|c| cell_text(c).is_empty()) {
            continue;
        }
        let draft = PatentDraft {
            name: text(row, 0),
            patentee: text(row, 1),
            country: text(row, 2),
            inventor: text(row, 3),
            status: PatentStatus::parse(&text(row, 4)),
            patent_type: PatentType::parse(&text(row, 5)),
            app_number: text(row, 6),
            pub_number: text(row, 7),
            app_date: text(row, 8),
            pub_date: text(row, 9),
            duration: text(row, 10),
            annuity_date: cell(row, 11).as_ref().and_then(cell_date),
            annuity_year: cell(row, 12).as_ref().and_then(cell_year),
            notify_emails: split_emails(&text(row, 13)),
            link: text(row, 14),
            summary: text(row, 15),
        };
        if !draft.is_empty() {
            drafts.push(draft);
        }
    }
    Ok(drafts)
}

/// Cell content as trimmed text; numbers lose a trailing ".0"
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date().format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    }
}

fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.date()),
        _ => parse_flexible_date(&cell_text(cell)),
    }
}

fn cell_year(cell: &Data) -> Option<u32> {
    match cell {
        Data::Int(i) => u32::try_from(*i).ok().filter(|y| *y > 0),
        Data::Float(f) if f.fract() == 0.0 && *f > 0.0 => Some(*f as u32),
        _ => cell_text(cell).parse::<u32>().ok().filter(|y| *y > 0),
    }
}

fn split_emails(s: &str) -> Vec<String> {
    s.split([';', ',', '；', '，'])
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}
