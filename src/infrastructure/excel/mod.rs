//! Excel workbooks for user import and export
//!
//! Writing goes through `rust_xlsxwriter`, reading through `calamine`. Only
//! the first worksheet is read, and its first row is the header.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::domain::user::{UserExport, UserImport};
use crate::shared::errors::InfraError;

/// A type that can be rendered as one worksheet row.
pub trait ExcelRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl ExcelRow for UserImport {
    const HEADERS: &'static [&'static str] = &["username", "password", "nickname"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.password.clone(),
            self.nickname.clone().unwrap_or_default(),
        ]
    }
}

impl ExcelRow for UserExport {
    const HEADERS: &'static [&'static str] =
        &["id", "username", "nickname", "create_time", "update_time"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            self.nickname.clone().unwrap_or_default(),
            self.create_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.update_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}

fn excel_error(err: impl std::fmt::Display) -> InfraError {
    InfraError::Excel(err.to_string())
}

/// Render `rows` under a bold header row into an `.xlsx` buffer. An empty
/// slice produces a header-only template.
pub fn write_workbook<R: ExcelRow>(sheet_name: &str, rows: &[R]) -> Result<Vec<u8>, InfraError> {
    build_workbook::<R>(sheet_name, rows).map_err(excel_error)
}

fn build_workbook<R: ExcelRow>(sheet_name: &str, rows: &[R]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;
    for (col, title) in R::HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
        sheet.set_column_width(col as u16, 20)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let line = index as u32 + 1;
        for (col, value) in row.cells().into_iter().enumerate() {
            sheet.write_string(line, col as u16, value)?;
        }
    }

    workbook.save_to_buffer()
}

/// One data row of a worksheet, keyed by header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRecord {
    /// 1-based row number as shown in a spreadsheet application.
    pub row: u32,
    pub fields: HashMap<String, String>,
}

/// Read the first worksheet as header-keyed records, skipping blank rows.
pub fn read_records(bytes: &[u8]) -> Result<Vec<SheetRecord>, InfraError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes)).map_err(excel_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InfraError::Excel("workbook has no worksheet".to_string()))?
        .map_err(excel_error)?;
    let first_row = range.start().map_or(0, |(row, _)| row);

    let mut rows = range.rows().enumerate();
    let Some((_, header)) = rows.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header.iter().map(|cell| cell_text(cell).trim().to_string()).collect();

    let records = rows
        .filter(|(_, row)| row.iter().any(|cell| !cell_text(cell).trim().is_empty()))
        .map(|(offset, row)| SheetRecord {
            row: first_row + offset as u32 + 1,
            fields: header
                .iter()
                .zip(row.iter())
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, cell)| (name.clone(), cell_text(cell)))
                .collect(),
        })
        .collect();
    Ok(records)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) | Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_only_the_header() {
        let bytes = write_workbook::<UserImport>("user_template", &[]).unwrap();
        assert!(read_records(&bytes).unwrap().is_empty());
    }

    #[test]
    fn written_rows_read_back_by_header() {
        let rows = vec![
            UserImport {
                username: "alice".to_string(),
                password: "secret1".to_string(),
                nickname: Some("Al".to_string()),
            },
            UserImport {
                username: "bob".to_string(),
                password: "secret2".to_string(),
                nickname: None,
            },
        ];
        let bytes = write_workbook("user", &rows).unwrap();

        let records = read_records(&bytes).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 2);
        assert_eq!(records[0].fields["username"], "alice");
        assert_eq!(records[0].fields["nickname"], "Al");
        assert_eq!(records[1].fields["password"], "secret2");

        let parsed = UserImport::from_record(&records[1].fields, 3).unwrap();
        assert_eq!(parsed, rows[1]);
    }

    #[test]
    fn blank_rows_keep_later_row_numbers() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, title) in UserImport::HEADERS.iter().enumerate() {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
        sheet.write_string(1, 0, "alice").unwrap();
        sheet.write_string(1, 1, "secret1").unwrap();
        sheet.write_string(3, 0, "bob").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let records = read_records(&bytes).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 2);
        assert_eq!(records[1].row, 4);
        assert_eq!(records[1].fields["username"], "bob");
    }

    #[test]
    fn garbage_is_an_excel_error() {
        let err = read_records(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, InfraError::Excel(_)));
    }
}
