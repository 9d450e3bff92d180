//! Report export rendering.
//!
//! Every report endpoint serves JSON by default and the same figures as a
//! downloadable file via the `format` query parameter. CSV is always
//! available; the spreadsheet and PDF renderers are feature-gated so a
//! deployment can keep its dependency tree lean. A format compiled out
//! answers `501 Not Implemented`.

mod csv;
#[cfg(feature = "export-pdf")]
mod pdf;
#[cfg(feature = "export-xlsx")]
mod xlsx;

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    prelude::{Response, StatusError},
};

use crate::extensions::*;

/// The representation a report endpoint was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportFormat {
    Json,
    File(FileFormat),
}

/// A downloadable report representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// Parses the optional `format` query value. Absent means JSON.
    pub(crate) fn from_query(raw: Option<String>) -> Result<Self, StatusError> {
        let Some(raw) = raw else {
            return Ok(Self::Json);
        };

        match raw.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::File(FileFormat::Csv)),
            "xlsx" => Ok(Self::File(FileFormat::Xlsx)),
            "pdf" => Ok(Self::File(FileFormat::Pdf)),
            other => Err(StatusError::bad_request()
                .brief(format!("unknown format \"{other}\"; expected json, csv, xlsx or pdf"))),
        }
    }
}

/// A report flattened to a titled grid of display strings, ready for any of
/// the file renderers.
#[derive(Debug)]
pub(crate) struct ReportTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub(crate) fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// The download filename stem, derived from the title.
    fn slug(&self) -> String {
        self.title
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect()
    }
}

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
#[cfg(feature = "export-xlsx")]
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
#[cfg(feature = "export-pdf")]
const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Renders the table in the requested file format and attaches it to the
/// response as a download.
pub(crate) fn attach(
    res: &mut Response,
    format: FileFormat,
    table: &ReportTable,
) -> Result<(), StatusError> {
    let (bytes, content_type, extension) = match format {
        FileFormat::Csv => (csv::render(table)?, CSV_CONTENT_TYPE, "csv"),
        #[cfg(feature = "export-xlsx")]
        FileFormat::Xlsx => (xlsx::render(table)?, XLSX_CONTENT_TYPE, "xlsx"),
        #[cfg(not(feature = "export-xlsx"))]
        FileFormat::Xlsx => {
            return Err(StatusError::not_implemented()
                .brief("xlsx export is not enabled on this server"));
        }
        #[cfg(feature = "export-pdf")]
        FileFormat::Pdf => (pdf::render(table)?, PDF_CONTENT_TYPE, "pdf"),
        #[cfg(not(feature = "export-pdf"))]
        FileFormat::Pdf => {
            return Err(
                StatusError::not_implemented().brief("pdf export is not enabled on this server")
            );
        }
    };

    res.add_header(CONTENT_TYPE, content_type, true)
        .or_500("failed to set content type")?
        .add_header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.{extension}\"", table.slug()),
            true,
        )
        .or_500("failed to set content disposition")?
        .write_body(bytes)
        .or_500("failed to write export body")?;

    Ok(())
}
