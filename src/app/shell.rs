//! Interactive single-page front end: the table, the creation form and the
//! search box, driven one command per line.

use crate::core::controller::{SearchOutcome, TaxPayerController};
use crate::core::form::FormField;
use crate::core::table::{Column, SortDirection, TableView};
use crate::core::RecordService;
use crate::utils::error::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Commands:
  list | reload              load every taxpayer
  set <field> <value...>     fill a form field (tid, first, last, address)
  form                       show the form
  submit                     add the taxpayer in the form
  clear                      empty the form
  search [tid]               look up a TID (no argument reuses the search box)
  next | prev | page <n>     move between pages
  size <n>                   rows per page (10, 15, 20, 25, 30)
  sort <column> [asc|desc]   sort by tid, first, last or address
  unsort                     back to service order
  help                       this text
  quit | exit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    Help,
    Reload,
    Set(FormField, String),
    ShowForm,
    Submit,
    ClearForm,
    Search(Option<String>),
    NextPage,
    PrevPage,
    Page(usize),
    PageSize(usize),
    Sort(Column, SortDirection),
    Unsort,
    Quit,
}

pub fn parse_command(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "help" | "?" => ShellCommand::Help,
        "list" | "reload" => ShellCommand::Reload,
        "form" => ShellCommand::ShowForm,
        "submit" => ShellCommand::Submit,
        "clear" => ShellCommand::ClearForm,
        "next" => ShellCommand::NextPage,
        "prev" => ShellCommand::PrevPage,
        "unsort" => ShellCommand::Unsort,
        "quit" | "exit" => ShellCommand::Quit,
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = field
                .parse::<FormField>()
                .map_err(|_| format!("unknown field '{}'; use tid, first, last or address", field))?;
            ShellCommand::Set(field, value.trim().to_string())
        }
        "search" => {
            if rest.is_empty() {
                ShellCommand::Search(None)
            } else {
                ShellCommand::Search(Some(rest.to_string()))
            }
        }
        "page" => {
            let page: usize = rest
                .parse()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| format!("page expects a number from 1, got '{}'", rest))?;
            ShellCommand::Page(page)
        }
        "size" => {
            let size = rest
                .parse()
                .map_err(|_| format!("size expects a number, got '{}'", rest))?;
            ShellCommand::PageSize(size)
        }
        "sort" => {
            let mut parts = rest.split_whitespace();
            let column = parts
                .next()
                .ok_or_else(|| "sort expects a column".to_string())?
                .parse::<Column>()
                .map_err(|e| e.to_string())?;
            let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
                None | Some("asc") => SortDirection::Ascending,
                Some("desc") => SortDirection::Descending,
                Some(other) => return Err(format!("sort direction must be asc or desc, got '{}'", other)),
            };
            ShellCommand::Sort(column, direction)
        }
        other => return Err(format!("unknown command '{}'; type 'help'", other)),
    };
    Ok(command)
}

pub struct Shell<S: RecordService> {
    controller: TaxPayerController<S>,
    view: TableView,
}

impl<S: RecordService> Shell<S> {
    pub fn new(controller: TaxPayerController<S>, view: TableView) -> Self {
        Self { controller, view }
    }

    pub fn controller(&self) -> &TaxPayerController<S> {
        &self.controller
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    /// Load the collection, then serve commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "TaxPayer Management")?;
        let _ = self.controller.load_all().await;
        self.render_page(out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            match parse_command(&line) {
                Ok(ShellCommand::Quit) => break,
                Ok(command) => self.execute(command, out).await?,
                Err(message) => writeln!(out, "{}", message)?,
            }
        }

        tracing::debug!("Shell finished");
        Ok(())
    }

    /// Run one command. Service failures are shown as the notice, never
    /// returned; only output errors end the session.
    pub async fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<()> {
        let total = self.controller.records().len();
        match command {
            ShellCommand::Empty | ShellCommand::Quit => {}
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Reload => {
                let _ = self.controller.load_all().await;
                self.render_page(out)?;
            }
            ShellCommand::Set(field, value) => {
                self.controller.form_mut().set(field, value);
            }
            ShellCommand::ShowForm => self.render_form(out)?,
            ShellCommand::ClearForm => {
                self.controller.form_mut().reset();
                self.render_form(out)?;
            }
            ShellCommand::Submit => match self.controller.submit().await {
                Ok(()) => {
                    writeln!(out, "✅ TaxPayer added")?;
                    self.render_page(out)?;
                }
                Err(_) => {
                    self.render_notice(out)?;
                    self.render_form(out)?;
                }
            },
            ShellCommand::Search(input) => {
                if let Some(input) = input {
                    self.controller.set_search_input(input);
                }
                match self.controller.search().await {
                    Ok(SearchOutcome::Skipped) => writeln!(out, "Enter a TID to search.")?,
                    Ok(_) => self.render_page(out)?,
                    Err(_) => self.render_notice(out)?,
                }
            }
            ShellCommand::NextPage => {
                self.view.next_page(total);
                self.render_page(out)?;
            }
            ShellCommand::PrevPage => {
                self.view.prev_page(total);
                self.render_page(out)?;
            }
            ShellCommand::Page(page) => {
                self.view.set_page(page.saturating_sub(1), total);
                self.render_page(out)?;
            }
            ShellCommand::PageSize(size) => match self.view.set_page_size(size, total) {
                Ok(()) => self.render_page(out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            ShellCommand::Sort(column, direction) => {
                self.view.sort_by(column, direction);
                self.render_page(out)?;
            }
            ShellCommand::Unsort => {
                self.view.clear_sort();
                self.render_page(out)?;
            }
        }
        Ok(())
    }

    fn render_notice<W: Write>(&self, out: &mut W) -> Result<()> {
        if let Some(notice) = self.controller.notice() {
            writeln!(out, "⚠ {}", notice)?;
        }
        Ok(())
    }

    fn render_page<W: Write>(&self, out: &mut W) -> Result<()> {
        self.render_notice(out)?;
        let table = self
            .view
            .render(self.controller.records(), self.controller.is_busy());
        out.write_all(table.as_bytes())?;
        Ok(())
    }

    fn render_form<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Add New TaxPayer")?;
        let form = self.controller.form();
        for field in FormField::ALL {
            match form.field_error(field) {
                Some(message) => writeln!(out, "  {:<10} [{}]  ! {}", field.label(), form.value(field), message)?,
                None => writeln!(out, "  {:<10} [{}]", field.label(), form.value(field))?,
            }
        }
        Ok(())
    }
}
