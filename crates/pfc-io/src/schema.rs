//! Declarative row schemas and the generic row decoder.
//!
//! Every result file handled here is a positional CSV table. Instead of
//! scattering column indices through each loader, a file shape is declared
//! once as a [`RowSchema`]: how many header rows to skip, which column (if
//! any) must be non-blank for a row to count, and the named, typed fields.
//! [`decode_rows`] walks the file and hands each row to the loader as a
//! [`Record`], whose getters look fields up by name.
//!
//! Fields are parsed lazily, when a getter asks for them. A loader that never
//! reads a column (the node index of a zero-magnitude phase, the magnitudes
//! of a link it ignores) never fails on it.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use pfc_core::{PfcError, PfcResult};

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Float,
    Integer,
}

/// One named column of a row.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub column: usize,
    pub kind: FieldKind,
}

impl Field {
    pub const fn text(name: &'static str, column: usize) -> Self {
        Self {
            name,
            column,
            kind: FieldKind::Text,
        }
    }

    pub const fn float(name: &'static str, column: usize) -> Self {
        Self {
            name,
            column,
            kind: FieldKind::Float,
        }
    }

    pub const fn integer(name: &'static str, column: usize) -> Self {
        Self {
            name,
            column,
            kind: FieldKind::Integer,
        }
    }
}

/// Shape of one delimited result file.
#[derive(Debug, Clone, Copy)]
pub struct RowSchema {
    /// Short label used in log events.
    pub name: &'static str,
    /// Leading rows skipped without interpretation.
    pub header_rows: usize,
    /// Rows whose value in this column is blank are skipped entirely.
    pub key_column: Option<usize>,
    pub fields: &'static [Field],
}

impl RowSchema {
    fn field(&self, name: &str) -> PfcResult<&Field> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| PfcError::Schema(format!("{} has no field '{}'", self.name, name)))
    }
}

/// What a loader found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    /// No file at the path.
    Missing,
    /// A file with no data rows after the headers.
    Empty,
    /// A file with at least one data row.
    Present(T),
}

impl<T: Default> Loaded<T> {
    /// The loaded table, or an empty one for a missing or empty file.
    pub fn into_inner(self) -> T {
        match self {
            Loaded::Present(table) => table,
            Loaded::Missing | Loaded::Empty => T::default(),
        }
    }
}

impl<T> Loaded<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Loaded::Missing)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Loaded::Missing => "missing",
            Loaded::Empty => "empty",
            Loaded::Present(_) => "present",
        }
    }
}

/// One data row, viewed through its schema.
pub struct Record<'a> {
    schema: &'a RowSchema,
    path: &'a Path,
    line: u64,
    raw: StringRecord,
}

impl<'a> Record<'a> {
    fn cell(&self, name: &str, expected: FieldKind) -> PfcResult<&str> {
        let field = self.schema.field(name)?;
        if field.kind != expected {
            return Err(PfcError::Schema(format!(
                "{} field '{}' is {:?}, read as {:?}",
                self.schema.name, name, field.kind, expected
            )));
        }
        self.raw
            .get(field.column)
            .map(unquote)
            .ok_or_else(|| {
                PfcError::parse(
                    self.path,
                    self.line,
                    name,
                    "",
                    format!("row has no column {}", field.column),
                )
            })
    }

    /// Text field with whitespace and surrounding quotes removed.
    pub fn text(&self, name: &str) -> PfcResult<&str> {
        self.cell(name, FieldKind::Text)
    }

    pub fn float(&self, name: &str) -> PfcResult<f64> {
        let cell = self.cell(name, FieldKind::Float)?;
        cell.parse::<f64>()
            .map_err(|e| PfcError::parse(self.path, self.line, name, cell, e))
    }

    pub fn integer(&self, name: &str) -> PfcResult<i64> {
        let cell = self.cell(name, FieldKind::Integer)?;
        cell.parse::<i64>()
            .map_err(|e| PfcError::parse(self.path, self.line, name, cell, e))
    }
}

fn unquote(cell: &str) -> &str {
    cell.trim().trim_matches('"').trim()
}

/// Decode every data row of `path` into `acc` with `apply`.
///
/// Returns [`Loaded::Missing`] when there is no file and [`Loaded::Empty`]
/// when no data row survives the header and key filters. The first error
/// from framing, a missing column, or `apply` aborts the whole file.
pub fn decode_rows<T, F>(
    path: &Path,
    schema: &RowSchema,
    mut acc: T,
    mut apply: F,
) -> PfcResult<Loaded<T>>
where
    F: FnMut(&mut T, &Record<'_>) -> PfcResult<()>,
{
    if !path.is_file() {
        return Ok(Loaded::Missing);
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;

    let mut rows = 0usize;
    for (index, result) in reader.records().enumerate() {
        let raw = result?;
        if index < schema.header_rows {
            continue;
        }
        if let Some(key) = schema.key_column {
            if raw.get(key).map(unquote).unwrap_or("").is_empty() {
                continue;
            }
        }
        let line = raw.position().map(|p| p.line()).unwrap_or(0);
        let record = Record {
            schema,
            path,
            line,
            raw,
        };
        apply(&mut acc, &record)?;
        rows += 1;
    }

    if rows == 0 {
        Ok(Loaded::Empty)
    } else {
        Ok(Loaded::Present(acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const PAIRS: RowSchema = RowSchema {
        name: "pairs",
        header_rows: 1,
        key_column: Some(0),
        fields: &[
            Field::text("name", 0),
            Field::float("value", 1),
            Field::integer("count", 2),
        ],
    };

    fn collect(path: &Path) -> PfcResult<Loaded<Vec<(String, f64)>>> {
        decode_rows(path, &PAIRS, Vec::new(), |acc, rec| {
            acc.push((rec.text("name")?.to_string(), rec.float("value")?));
            Ok(())
        })
    }

    #[test]
    fn missing_file_is_distinguished() {
        let dir = tempdir().unwrap();
        let loaded = collect(&dir.path().join("nope.csv")).unwrap();
        assert!(loaded.is_missing());
        assert!(loaded.into_inner().is_empty());
    }

    #[test]
    fn header_only_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name, Value, Count\n").unwrap();
        assert_eq!(collect(&path).unwrap(), Loaded::Empty);
    }

    #[test]
    fn quotes_and_initial_space_are_stripped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name, Value, Count\n\"Reg1\",  1.5, 3\n").unwrap();
        let rows = collect(&path).unwrap().into_inner();
        assert_eq!(rows, vec![("Reg1".to_string(), 1.5)]);
    }

    #[test]
    fn trailing_space_is_stripped_as_well() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name, Value, Count\nReg1  , 1.5  , 3\n").unwrap();
        let rows = collect(&path).unwrap().into_inner();
        assert_eq!(rows, vec![("Reg1".to_string(), 1.5)]);
    }

    #[test]
    fn blank_key_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Value\n\"\",abc\nx,2\n").unwrap();
        let rows = collect(&path).unwrap().into_inner();
        assert_eq!(rows, vec![("x".to_string(), 2.0)]);
    }

    #[test]
    fn unread_fields_are_not_validated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Value,Count\nx,2,not-a-number\n").unwrap();
        assert!(collect(&path).is_ok());
    }

    #[test]
    fn malformed_number_reports_location() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Value\nx,1.0\ny,oops\n").unwrap();
        match collect(&path) {
            Err(PfcError::Parse { line, field, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(field, "value");
                assert_eq!(value, "oops");
            }
            other => panic!("expected parse error, got {:?}", other.map(|l| l.label())),
        }
    }

    #[test]
    fn short_row_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Value\nx\n").unwrap();
        assert!(matches!(collect(&path), Err(PfcError::Parse { .. })));
    }

    #[test]
    fn wrong_kind_is_a_schema_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "Name,Value,Count\nx,1,2\n").unwrap();
        let result = decode_rows(&path, &PAIRS, (), |_, rec| rec.float("count").map(|_| ()));
        assert!(matches!(result, Err(PfcError::Schema(_))));
    }
}
