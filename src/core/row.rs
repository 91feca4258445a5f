//! Typed reading-log rows and the CSV parse step.

use std::io::Read;

use time::Date;
use time::format_description::FormatItem;
use time::macros::format_description;
use tracing::debug;

use crate::{ReportError, ReportResult};

pub const COL_DATE_READ: &str = "Date Read";
pub const COL_AUTHOR: &str = "Author";
pub const COL_EXCLUSIVE_SHELF: &str = "Exclusive Shelf";
pub const COL_MY_RATING: &str = "My Rating";

/// Columns the parse step requires, in the order they are reported when missing.
pub const REQUIRED_COLUMNS: &[&str] = &[COL_DATE_READ, COL_AUTHOR, COL_EXCLUSIVE_SHELF, COL_MY_RATING];

const DATE_FORMATS: &[&[FormatItem<'static>]] = &[
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    format_description!("[year]/[month padding:none]/[day padding:none]"),
    format_description!("[month padding:none]/[day padding:none]/[year]"),
];

/// One reading-log entry.
///
/// Blank cells are `None`; an unset or malformed rating is 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub date_read: Option<Date>,
    pub author: Option<String>,
    pub exclusive_shelf: Option<String>,
    pub my_rating: u8,
}

/// The parsed rows of one upload.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Table { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse CSV bytes into a table.
    ///
    /// Fails with [`ReportError::MissingColumns`] when any of [`REQUIRED_COLUMNS`]
    /// is absent from the header, and with [`ReportError::Csv`] when the input is
    /// not readable as CSV. Short rows are padded with blank cells.
    pub fn from_csv_reader<R: Read>(reader: R) -> ReportResult<Table> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let columns = ColumnIndex::resolve(rdr.headers()?)?;

        let mut rows = Vec::new();
        let mut record = csv::StringRecord::new();
        while rdr.read_record(&mut record)? {
            rows.push(columns.row_from_record(&record));
        }

        debug!(
            rows = rows.len(),
            dated = rows.iter().filter(|r| r.date_read.is_some()).count(),
            "parsed reading log"
        );
        Ok(Table { rows })
    }

    pub fn from_csv_bytes(bytes: &[u8]) -> ReportResult<Table> {
        Self::from_csv_reader(bytes)
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Table::new(iter.into_iter().collect())
    }
}

/// Positions of the required columns within a header record.
struct ColumnIndex {
    date_read: usize,
    author: usize,
    exclusive_shelf: usize,
    my_rating: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> ReportResult<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
        };

        let found: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|c| position(*c)).collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip(&found)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match found.as_slice() {
            [Some(date_read), Some(author), Some(exclusive_shelf), Some(my_rating)] => Ok(ColumnIndex {
                date_read: *date_read,
                author: *author,
                exclusive_shelf: *exclusive_shelf,
                my_rating: *my_rating,
            }),
            _ => Err(ReportError::MissingColumns(missing)),
        }
    }

    fn row_from_record(&self, record: &csv::StringRecord) -> Row {
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        Row {
            date_read: parse_date(cell(self.date_read)),
            author: non_blank(cell(self.author)),
            exclusive_shelf: non_blank(cell(self.exclusive_shelf)),
            my_rating: parse_rating(cell(self.my_rating)),
        }
    }
}

fn non_blank(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Parse a reading date, discarding any time-of-day suffix.
///
/// Unrecognised values become `None` rather than an error.
pub fn parse_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    if date_part.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| Date::parse(date_part, fmt).ok())
}

/// Parse a star rating. Whole-number floats such as `4.0` are accepted;
/// anything else is treated as unrated.
pub fn parse_rating(raw: &str) -> u8 {
    let s = raw.trim();
    if let Ok(v) = s.parse::<u8>() {
        return v;
    }
    match s.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&f) => f as u8,
        _ => 0,
    }
}
