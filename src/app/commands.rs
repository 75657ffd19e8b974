use crate::core::controller::{SearchOutcome, TaxPayerController};
use crate::core::form::FormField;
use crate::core::table::{format_records, Column, OutputFormat, SortDirection, TableView};
use crate::core::RecordService;
use crate::utils::error::{DeskError, Result};
use std::io::Write;

/// How a one-shot command prints its records.
#[derive(Debug, Clone, Copy)]
pub struct OutputSpec {
    pub format: OutputFormat,
    pub sort: Option<(Column, SortDirection)>,
    /// One-based page for table output.
    pub page: usize,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            sort: None,
            page: 1,
        }
    }
}

#[cfg(feature = "cli")]
impl From<&crate::config::cli::OutputArgs> for OutputSpec {
    fn from(args: &crate::config::cli::OutputArgs) -> Self {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self {
            format: args.format,
            sort: args.sort.map(|column| (column, direction)),
            page: args.page,
        }
    }
}

fn print_records<S: RecordService, W: Write>(
    controller: &TaxPayerController<S>,
    view: &mut TableView,
    spec: &OutputSpec,
    out: &mut W,
) -> Result<()> {
    let records = controller.records();
    match spec.sort {
        Some((column, direction)) => view.sort_by(column, direction),
        None => view.clear_sort(),
    }
    view.set_page(spec.page.saturating_sub(1), records.len());

    out.write_all(format_records(records, spec.format, view)?.as_bytes())?;
    Ok(())
}

pub async fn list<S: RecordService, W: Write>(
    controller: &mut TaxPayerController<S>,
    view: &mut TableView,
    spec: &OutputSpec,
    out: &mut W,
) -> Result<()> {
    controller.load_all().await?;
    print_records(controller, view, spec, out)
}

pub async fn add<S: RecordService, W: Write>(
    controller: &mut TaxPayerController<S>,
    view: &mut TableView,
    values: [(FormField, String); 4],
    spec: &OutputSpec,
    out: &mut W,
) -> Result<()> {
    for (field, value) in values {
        controller.form_mut().set(field, value);
    }

    if let Err(e) = controller.submit().await {
        if let DeskError::FormValidation { .. } = e {
            for (field, message) in controller.form().errors() {
                writeln!(out, "  {}: {}", field.label(), message)?;
            }
        }
        return Err(e);
    }

    writeln!(out, "✅ TaxPayer added")?;
    if let Some(notice) = controller.notice() {
        writeln!(out, "⚠ {}", notice)?;
    }
    print_records(controller, view, spec, out)
}

pub async fn search<S: RecordService, W: Write>(
    controller: &mut TaxPayerController<S>,
    view: &mut TableView,
    tid: &str,
    spec: &OutputSpec,
    out: &mut W,
) -> Result<()> {
    controller.set_search_input(tid);
    match controller.search().await? {
        SearchOutcome::Skipped => {
            writeln!(out, "Enter a TID to search.")?;
            Ok(())
        }
        SearchOutcome::Found(_) | SearchOutcome::NotFound => {
            print_records(controller, view, spec, out)
        }
    }
}
