//! Minimal comma-separated record reader for instance files.

use std::path::{Path, PathBuf};

use mf_core::ensure_finite;

use crate::error::{IoError, IoResult};

/// One non-blank data line, split and trimmed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record<'a> {
    /// 1-based line number in the source file.
    pub line: usize,
    pub fields: Vec<&'a str>,
}

/// Number of leading id columns (row id, src, dst) used to spot an unmarked header.
const KEY_COLUMNS: usize = 3;

/// A `#` line, or one whose id columns are not numbers. Bad values further
/// right belong to a data row and surface as parse errors.
fn is_header(fields: &[&str]) -> bool {
    fields.first().is_some_and(|f| f.starts_with('#'))
        || fields
            .iter()
            .take(KEY_COLUMNS)
            .any(|f| f.parse::<f64>().is_err())
}

/// Split `content` into records, skipping blank lines and a leading header.
pub(crate) fn records(content: &str) -> Vec<Record<'_>> {
    let mut out = Vec::new();
    let mut first = true;
    for (i, raw) in content.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        if first {
            first = false;
            if is_header(&fields) {
                continue;
            }
        }
        out.push(Record { line: i + 1, fields });
    }
    out
}

/// Field accessor that turns bad values into positioned parse errors.
pub(crate) struct RowReader<'a> {
    file: &'a Path,
    record: &'a Record<'a>,
}

impl<'a> RowReader<'a> {
    pub fn new(file: &'a Path, record: &'a Record<'a>, min_fields: usize) -> IoResult<Self> {
        let reader = Self { file, record };
        if record.fields.len() < min_fields {
            return Err(reader.error(
                record.fields.len() + 1,
                format!(
                    "expected at least {min_fields} fields, found {}",
                    record.fields.len()
                ),
            ));
        }
        Ok(reader)
    }

    fn error(&self, column: usize, message: String) -> IoError {
        IoError::Parse {
            file: PathBuf::from(self.file),
            line: self.record.line,
            column,
            message,
        }
    }

    fn field(&self, col: usize) -> &'a str {
        self.record.fields.get(col).copied().unwrap_or("")
    }

    /// 1-based vertex id at 0-based column `col`.
    pub fn vertex(&self, col: usize) -> IoResult<u32> {
        let raw = self.field(col);
        match raw.parse::<u32>() {
            Ok(0) => Err(self.error(col + 1, "vertex ids start at 1".to_string())),
            Ok(v) => Ok(v),
            Err(e) => Err(self.error(col + 1, format!("invalid vertex id '{raw}': {e}"))),
        }
    }

    pub fn value(&self, col: usize, what: &'static str) -> IoResult<f64> {
        let raw = self.field(col);
        let value = raw
            .parse::<f64>()
            .map_err(|e| self.error(col + 1, format!("invalid {what} '{raw}': {e}")))?;
        ensure_finite(value, what).map_err(|e| self.error(col + 1, e.to_string()))
    }
}
