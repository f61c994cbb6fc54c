//! Whole-collection exports.
//!
//! An export reads every row of one entity kind, newest first, and
//! renders it into a spreadsheet workbook or, when the spreadsheet
//! renderer is not compiled in, a delimited-text file with the same
//! columns in the same order. The full buffer is built in memory before
//! anything is returned; a failed export never yields partial output.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::adapters::{SqliteStore, StoredRecord};
use crate::domain::{Contact, Registration, Requirements, StoreError};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const CSV_CONTENT_TYPE: &str = "text/csv";

/// Failures during an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Reading the collection from the local store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The renderer rejected the data or could not build the buffer.
    #[error("export rendering failed: {0}")]
    Render(String),

    /// Workbook rendering was requested but not compiled in.
    #[error("spreadsheet renderer unavailable")]
    RendererUnavailable,
}

/// Rendering mode selected once per export call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Styled spreadsheet workbook.
    Workbook,
    /// Delimited text with the identical column set and order.
    Delimited,
}

impl ExportFormat {
    /// Pick the richest renderer available in this build.
    ///
    /// Degrading to delimited text is expected behavior, not a failure,
    /// so it logs as a warning.
    pub fn detect() -> Self {
        if cfg!(feature = "xlsx") {
            ExportFormat::Workbook
        } else {
            tracing::warn!("spreadsheet renderer unavailable, falling back to delimited export");
            ExportFormat::Delimited
        }
    }

    /// MIME type of the rendered file.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Workbook => XLSX_CONTENT_TYPE,
            ExportFormat::Delimited => CSV_CONTENT_TYPE,
        }
    }

    /// File extension of the rendered file.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Workbook => "xlsx",
            ExportFormat::Delimited => "csv",
        }
    }
}

/// A completed export ready for download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Text(String),
}

impl Cell {
    /// Text form used for delimited output and column sizing.
    pub fn render(&self) -> String {
        match self {
            Cell::Int(v) => v.to_string(),
            Cell::Text(v) => v.clone(),
        }
    }
}

/// An entity kind the export service can render.
///
/// Header names and order are fixed per kind and identical between the
/// workbook and delimited renderers.
pub trait Exportable: StoredRecord + Serialize {
    /// Worksheet title in workbook mode.
    const SHEET_NAME: &'static str;

    /// Download file name without extension.
    const FILE_STEM: &'static str;

    /// Header fill color in workbook mode (RGB).
    const ACCENT_COLOR: u32;

    /// Fixed header row.
    fn headers() -> &'static [&'static str];

    /// One data row, in header order. Absent fields render as empty
    /// strings.
    fn cells(&self) -> Vec<Cell>;
}

impl Exportable for Registration {
    const SHEET_NAME: &'static str = "Piano Registrations";
    const FILE_STEM: &'static str = "piano_registrations";
    const ACCENT_COLOR: u32 = 0x2E86C1;

    fn headers() -> &'static [&'static str] {
        &[
            "ID",
            "Manufacturer",
            "Model",
            "Serial #",
            "Year",
            "Type",
            "Height",
            "Finish",
            "Condition",
            "Color/Wood",
            "City/State",
            "Access",
            "IP Address",
            "Created At",
            "Updated At",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            Cell::Text(self.manufacturer.clone()),
            Cell::Text(self.model.clone()),
            Cell::Text(self.serial.clone()),
            Cell::Int(self.year),
            Cell::Text(self.height.clone()), // Type stored in height column
            Cell::Text(self.height.clone()),
            Cell::Text(self.finish.clone()),
            Cell::Text(self.finish.clone()), // Condition stored in finish column
            Cell::Text(self.color_wood.clone()),
            Cell::Text(self.city_state.clone()),
            opt(&self.access),
            opt(&self.ip_address),
            timestamp(&self.created_at),
            timestamp(&self.updated_at),
        ]
    }
}

impl Exportable for Requirements {
    const SHEET_NAME: &'static str = "Requirements";
    const FILE_STEM: &'static str = "requirements";
    const ACCENT_COLOR: u32 = 0x28B463;

    fn headers() -> &'static [&'static str] {
        &[
            "ID",
            "School Name",
            "Current Pianos",
            "Preferred Type",
            "Teacher Name",
            "Background",
            "Commitment",
            "IP Address",
            "Created At",
            "Updated At",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            opt(&self.school_name),
            opt(&self.current_pianos),
            opt(&self.preferred_type),
            opt(&self.teacher_name),
            opt(&self.background),
            opt(&self.commitment),
            opt(&self.ip_address),
            timestamp(&self.created_at),
            timestamp(&self.updated_at),
        ]
    }
}

impl Exportable for Contact {
    const SHEET_NAME: &'static str = "Contacts";
    const FILE_STEM: &'static str = "contacts";
    const ACCENT_COLOR: u32 = 0x884EA0;

    fn headers() -> &'static [&'static str] {
        &[
            "ID",
            "Name",
            "Email",
            "Message",
            "IP Address",
            "Created At",
            "Updated At",
        ]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.id),
            opt(&self.name),
            opt(&self.email),
            Cell::Text(self.message.clone()),
            opt(&self.ip_address),
            timestamp(&self.created_at),
            timestamp(&self.updated_at),
        ]
    }
}

fn opt(value: &Option<String>) -> Cell {
    Cell::Text(value.clone().unwrap_or_default())
}

fn timestamp(value: &Option<DateTime<Utc>>) -> Cell {
    Cell::Text(
        value
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_default(),
    )
}

/// Renders one entity collection into a downloadable file.
pub struct ExportService {
    store: Arc<SqliteStore>,
    format: ExportFormat,
}

impl ExportService {
    /// Export service using the richest renderer this build carries.
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self {
            store,
            format: ExportFormat::detect(),
        }
    }

    /// Export service with a fixed rendering mode.
    pub fn with_format(store: Arc<SqliteStore>, format: ExportFormat) -> Self {
        Self { store, format }
    }

    /// The rendering mode this service uses.
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Render every stored row of kind `E`, newest first.
    pub async fn export<E: Exportable>(&self) -> Result<ExportFile, ExportError> {
        let rows = self.store.list_all::<E>().await?;

        let bytes = match self.format {
            #[cfg(feature = "xlsx")]
            ExportFormat::Workbook => workbook::render::<E>(&rows)?,
            #[cfg(not(feature = "xlsx"))]
            ExportFormat::Workbook => return Err(ExportError::RendererUnavailable),
            ExportFormat::Delimited => delimited::render::<E>(&rows)?,
        };

        tracing::info!(
            kind = %E::KIND,
            rows = rows.len(),
            format = ?self.format,
            "export rendered"
        );

        Ok(ExportFile {
            bytes,
            content_type: self.format.content_type(),
            filename: format!("{}.{}", E::FILE_STEM, self.format.extension()),
        })
    }
}

#[cfg(feature = "xlsx")]
mod workbook {
    use rust_xlsxwriter::{Color, Format, Workbook, XlsxError};

    use super::{Cell, ExportError, Exportable};

    /// Column width cap; long message bodies should not stretch the
    /// sheet indefinitely.
    const MAX_COLUMN_WIDTH: usize = 50;

    pub(super) fn render<E: Exportable>(rows: &[E]) -> Result<Vec<u8>, ExportError> {
        let mut book = Workbook::new();
        let sheet = book.add_worksheet();
        sheet.set_name(E::SHEET_NAME).map_err(render_error)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(E::ACCENT_COLOR));

        let headers = E::headers();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_with_format(0, col as u16, *header, &header_format)
                .map_err(render_error)?;
        }

        for (index, record) in rows.iter().enumerate() {
            let row = (index + 1) as u32;
            for (col, cell) in record.cells().into_iter().enumerate() {
                let rendered = cell.render();
                if rendered.len() > widths[col] {
                    widths[col] = rendered.len();
                }
                match cell {
                    Cell::Int(v) => sheet.write_number(row, col as u16, v as f64),
                    Cell::Text(v) => sheet.write_string(row, col as u16, &v),
                }
                .map_err(render_error)?;
            }
        }

        for (col, width) in widths.iter().enumerate() {
            let capped = (width + 2).min(MAX_COLUMN_WIDTH);
            sheet
                .set_column_width(col as u16, capped as f64)
                .map_err(render_error)?;
        }

        book.save_to_buffer().map_err(render_error)
    }

    fn render_error(err: XlsxError) -> ExportError {
        ExportError::Render(err.to_string())
    }
}

mod delimited {
    use super::{Cell, ExportError, Exportable};

    pub(super) fn render<E: Exportable>(rows: &[E]) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(E::headers())
            .map_err(render_error)?;

        for record in rows {
            let cells: Vec<String> = record.cells().iter().map(Cell::render).collect();
            writer.write_record(&cells).map_err(render_error)?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Render(e.to_string()))
    }

    fn render_error(err: csv::Error) -> ExportError {
        ExportError::Render(err.to_string())
    }
}
