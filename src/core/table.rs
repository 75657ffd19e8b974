//! Sortable, paginated table over the record snapshot, plus the output
//! formats used by the one-shot commands.

use crate::domain::model::TaxPayerRecord;
use crate::utils::error::{DeskError, Result};
use std::cmp::Ordering;
use std::fmt::Write as _;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 15, 20, 25, 30];

pub const NO_DATA_MESSAGE: &str = "There are no records to display";
pub const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Tid,
    FirstName,
    LastName,
    Address,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Tid, Column::FirstName, Column::LastName, Column::Address];

    pub fn title(self) -> &'static str {
        match self {
            Column::Tid => "TID",
            Column::FirstName => "First Name",
            Column::LastName => "Last Name",
            Column::Address => "Address",
        }
    }

    fn cell(self, record: &TaxPayerRecord) -> &str {
        match self {
            Column::Tid => record.tid.as_str(),
            Column::FirstName => &record.first_name,
            Column::LastName => &record.last_name,
            Column::Address => &record.address,
        }
    }

    fn compare(self, a: &TaxPayerRecord, b: &TaxPayerRecord) -> Ordering {
        match self {
            Column::Tid => a.tid.cmp(&b.tid),
            _ => self.cell(a).cmp(self.cell(b)),
        }
    }
}

impl FromStr for Column {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tid" | "id" => Ok(Column::Tid),
            "first" | "first_name" | "firstname" => Ok(Column::FirstName),
            "last" | "last_name" | "lastname" => Ok(Column::LastName),
            "address" | "addr" => Ok(Column::Address),
            _ => Err(DeskError::InvalidConfigValueError {
                field: "sort column".to_string(),
                value: s.to_string(),
                reason: "expected one of tid, first, last, address".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(DeskError::InvalidConfigValueError {
                field: "format".to_string(),
                value: s.to_string(),
                reason: "Unsupported format. Valid formats: table, csv, json".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableView {
    page_size: usize,
    page: usize,
    sort: Option<(Column, SortDirection)>,
}

impl Default for TableView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableView {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
            sort: None,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change rows per page, keeping the first visible row on screen.
    pub fn set_page_size(&mut self, page_size: usize, total: usize) -> Result<()> {
        crate::utils::validation::validate_page_size("page size", page_size)?;
        let first_row = self.current_page(total) * self.page_size;
        self.page_size = page_size;
        self.page = first_row / page_size;
        Ok(())
    }

    /// Zero-based page index as last requested; clamped when rendering.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn current_page(&self, total: usize) -> usize {
        self.page.min(self.page_count(total) - 1)
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    pub fn next_page(&mut self, total: usize) {
        self.set_page(self.current_page(total) + 1, total);
    }

    pub fn prev_page(&mut self, total: usize) {
        self.page = self.current_page(total).saturating_sub(1);
    }

    pub fn sort(&self) -> Option<(Column, SortDirection)> {
        self.sort
    }

    pub fn sort_by(&mut self, column: Column, direction: SortDirection) {
        self.sort = Some((column, direction));
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// All rows in display order (sorted when a sort is set, else as returned).
    pub fn ordered<'a>(&self, records: &'a [TaxPayerRecord]) -> Vec<&'a TaxPayerRecord> {
        let mut rows: Vec<&TaxPayerRecord> = records.iter().collect();
        if let Some((column, direction)) = self.sort {
            rows.sort_by(|a, b| match direction {
                SortDirection::Ascending => column.compare(a, b),
                SortDirection::Descending => column.compare(b, a),
            });
        }
        rows
    }

    pub fn visible_rows<'a>(&self, records: &'a [TaxPayerRecord]) -> Vec<&'a TaxPayerRecord> {
        let start = self.current_page(records.len()) * self.page_size;
        self.ordered(records)
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Footer in the "11-20 of 23" style.
    pub fn range_label(&self, total: usize) -> String {
        if total == 0 {
            return "0-0 of 0".to_string();
        }
        let start = self.current_page(total) * self.page_size;
        let end = (start + self.page_size).min(total);
        format!("{}-{} of {}", start + 1, end, total)
    }

    /// `busy` replaces the rows with the loading line, for callers rendering
    /// while an operation is still pending.
    pub fn render(&self, records: &[TaxPayerRecord], busy: bool) -> String {
        if busy {
            return format!("{}\n", LOADING_MESSAGE);
        }
        if records.is_empty() {
            return format!("{}\n", NO_DATA_MESSAGE);
        }

        let rows = self.visible_rows(records);
        let mut widths: Vec<usize> = Column::ALL
            .iter()
            .map(|c| self.header_text(*c).chars().count())
            .collect();
        for row in &rows {
            for (i, column) in Column::ALL.iter().enumerate() {
                widths[i] = widths[i].max(column.cell(row).chars().count());
            }
        }

        let mut out = String::new();
        let header: Vec<String> = Column::ALL.iter().map(|c| self.header_text(*c)).collect();
        push_line(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &rows {
            let cells: Vec<String> = Column::ALL.iter().map(|c| c.cell(row).to_string()).collect();
            push_line(&mut out, &cells, &widths);
        }

        let _ = writeln!(
            out,
            "\nRows per page: {}  {}  (page {}/{})",
            self.page_size,
            self.range_label(records.len()),
            self.current_page(records.len()) + 1,
            self.page_count(records.len())
        );
        out
    }

    fn header_text(&self, column: Column) -> String {
        match self.sort {
            Some((sorted, SortDirection::Ascending)) if sorted == column => {
                format!("{} ^", column.title())
            }
            Some((sorted, SortDirection::Descending)) if sorted == column => {
                format!("{} v", column.title())
            }
            _ => column.title().to_string(),
        }
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

/// Format records for one-shot output. `Table` shows the current page of
/// `view`; `Csv` and `Json` emit every row in the view's order.
pub fn format_records(
    records: &[TaxPayerRecord],
    format: OutputFormat,
    view: &TableView,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(view.render(records, false)),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in view.ordered(records) {
                writer.serialize(record)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| DeskError::Io(e.into_error()))?;
            if bytes.is_empty() {
                return Ok("tid,firstName,lastName,address\n".to_string());
            }
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        OutputFormat::Json => Ok(format!(
            "{}\n",
            serde_json::to_string_pretty(&view.ordered(records))?
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TaxPayerId;

    fn record(tid: &str, first: &str, last: &str) -> TaxPayerRecord {
        TaxPayerRecord::new(tid.parse::<TaxPayerId>().unwrap(), first, last, "Somewhere")
    }

    fn many(n: usize) -> Vec<TaxPayerRecord> {
        (1..=n)
            .map(|i| record(&i.to_string(), &format!("F{i}"), &format!("L{i}")))
            .collect()
    }

    #[test]
    fn test_rows_keep_service_order_without_sort() {
        let records = vec![record("3", "C", "c"), record("1", "A", "a"), record("2", "B", "b")];
        let view = TableView::default();
        let tids: Vec<&str> = view.visible_rows(&records).iter().map(|r| r.tid.as_str()).collect();
        assert_eq!(tids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_tid_sort_is_numeric() {
        let records = vec![
            record("100", "A", "a"),
            record("99", "B", "b"),
            record("18446744073709551616", "C", "c"),
        ];
        let mut view = TableView::default();
        view.sort_by(Column::Tid, SortDirection::Ascending);
        let tids: Vec<&str> = view.ordered(&records).iter().map(|r| r.tid.as_str()).collect();
        assert_eq!(tids, vec!["99", "100", "18446744073709551616"]);

        view.sort_by(Column::Tid, SortDirection::Descending);
        assert_eq!(view.ordered(&records)[0].tid.as_str(), "18446744073709551616");
    }

    #[test]
    fn test_pagination_and_footer() {
        let records = many(23);
        let mut view = TableView::default();
        assert_eq!(view.page_count(records.len()), 3);
        assert_eq!(view.range_label(records.len()), "1-10 of 23");

        view.next_page(records.len());
        view.next_page(records.len());
        view.next_page(records.len());
        assert_eq!(view.current_page(records.len()), 2);
        assert_eq!(view.visible_rows(&records).len(), 3);
        assert_eq!(view.range_label(records.len()), "21-23 of 23");

        view.prev_page(records.len());
        assert_eq!(view.range_label(records.len()), "11-20 of 23");
    }

    #[test]
    fn test_page_is_clamped_when_snapshot_shrinks() {
        let mut view = TableView::default();
        view.set_page(4, 50);
        assert_eq!(view.current_page(50), 4);

        let single = many(1);
        assert_eq!(view.current_page(single.len()), 0);
        assert_eq!(view.visible_rows(&single).len(), 1);
    }

    #[test]
    fn test_page_size_options() {
        let mut view = TableView::default();
        view.set_page(2, 100);
        view.set_page_size(20, 100).unwrap();
        assert_eq!(view.page(), 1);
        assert!(view.set_page_size(7, 100).is_err());
    }

    #[test]
    fn test_page_size_change_after_snapshot_shrinks() {
        let mut view = TableView::default();
        view.set_page(4, 50);
        assert_eq!(view.page(), 4);

        // A search left a single row behind.
        view.set_page_size(20, 1).unwrap();
        assert_eq!(view.page(), 0);
        assert_eq!(view.range_label(1), "1-1 of 1");
    }

    #[test]
    fn test_render_states() {
        let view = TableView::default();
        assert_eq!(view.render(&[], false), "There are no records to display\n");
        assert_eq!(view.render(&many(3), true), "Loading...\n");

        let out = view.render(&[record("123456789012345678901234567890", "Ada", "L")], false);
        assert!(out.contains("TID"));
        assert!(out.contains("123456789012345678901234567890"));
        assert!(out.contains("1-1 of 1"));
    }

    #[test]
    fn test_csv_and_json_output() {
        let records = vec![record("7", "Ann", "Lee")];
        let view = TableView::default();

        let csv = format_records(&records, OutputFormat::Csv, &view).unwrap();
        assert_eq!(csv, "tid,firstName,lastName,address\n7,Ann,Lee,Somewhere\n");

        let json = format_records(&records, OutputFormat::Json, &view).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["tid"], "7");

        let empty = format_records(&[], OutputFormat::Csv, &view).unwrap();
        assert_eq!(empty, "tid,firstName,lastName,address\n");
    }
}
