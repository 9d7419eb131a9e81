//! Terminal shell
//!
//! Line-oriented front end over [`App`]. Generic over its input and output
//! so sessions can be scripted.

use std::fmt;
use std::io::{self, BufRead, Lines, Write};
use std::str::FromStr;

use crate::record::Record;

use super::api_client::RecordApi;
use super::app::App;
use super::state::{ClientState, FormField};

pub const HELP: &str = "\
commands:
  set <name|age|class> <value>   fill in a form field
  submit                         create the record, or save the one being edited
  edit <row|id>                  load a record into the form
  cancel                         clear the form and stop editing
  delete <row|id>                delete a record (asks for confirmation)
  search [term]                  filter by name; no term clears the filter
  sort                           toggle A-Z / Z-A
  show                           redraw the table
  reload                         fetch the collection again
  help                           this text
  quit                           leave";

/// Row number in the displayed view, or a record id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Row(usize),
    Id(String),
}

impl Target {
    /// Resolves against the currently displayed view.
    pub fn resolve(&self, state: &ClientState) -> Option<String> {
        match self {
            Target::Row(n) => n
                .checked_sub(1)
                .and_then(|i| state.view().get(i).map(|r| r.id.clone())),
            Target::Id(id) => Some(id.clone()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Row(n) => write!(f, "row {}", n),
            Target::Id(id) => write!(f, "id '{}'", id),
        }
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("expected a row number or record id".to_string());
        }
        match s.parse::<usize>() {
            Ok(0) => Err("rows are numbered from 1".to_string()),
            Ok(n) => Ok(Target::Row(n)),
            Err(_) => Ok(Target::Id(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Set(FormField, String),
    Submit,
    Edit(Target),
    Cancel,
    Delete(Target),
    Search(String),
    Sort,
    Show,
    Reload,
    Help,
    Quit,
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        // The search term is taken verbatim after the single separator.
        let line = line.trim_start();
        let (verb, raw) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = raw.trim();

        match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err("usage: set <name|age|class> <value>".to_string());
                }
                Ok(ShellCommand::Set(field.parse()?, value.to_string()))
            }
            "submit" | "save" => Ok(ShellCommand::Submit),
            "edit" => Ok(ShellCommand::Edit(rest.parse()?)),
            "cancel" => Ok(ShellCommand::Cancel),
            "delete" | "rm" => Ok(ShellCommand::Delete(rest.parse()?)),
            "search" => Ok(ShellCommand::Search(raw.to_string())),
            "sort" => Ok(ShellCommand::Sort),
            "show" | "ls" => Ok(ShellCommand::Show),
            "reload" => Ok(ShellCommand::Reload),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command '{}'; type 'help'", other)),
        }
    }
}

/// Renders the derived view, its totals and the form.
pub fn render<W: Write>(state: &ClientState, out: &mut W) -> io::Result<()> {
    let view = state.view();
    let search = state.search();

    write!(out, "Records: {}", view.len())?;
    if !search.is_empty() {
        write!(out, " (search results for \"{}\")", search)?;
    }
    writeln!(out, " | sort {}", state.sort())?;

    if state.is_loading() {
        writeln!(out, "Loading records...")?;
    } else if view.is_empty() {
        if let Some(error) = state.load_error() {
            writeln!(out, "Could not load records: {}", error)?;
        } else if search.is_empty() {
            writeln!(out, "No records yet. Add one with 'set' and 'submit'.")?;
        } else {
            writeln!(out, "No records match \"{}\"", search)?;
        }
    } else {
        if let Some(error) = state.load_error() {
            writeln!(out, "Could not refresh records, showing the last list: {}", error)?;
        }
        write_table(&view, out)?;
    }

    let form = state.form();
    write!(
        out,
        "Form: name=\"{}\" age=\"{}\" class=\"{}\"",
        form.name, form.age, form.class
    )?;
    match state.editing() {
        Some(id) => writeln!(out, " (editing {})", id),
        None => writeln!(out),
    }
}

fn write_table<W: Write>(view: &[&Record], out: &mut W) -> io::Result<()> {
    let num_w = view.len().to_string().len();
    let name_w = view
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());
    let class_w = view
        .iter()
        .map(|r| r.class.chars().count())
        .max()
        .unwrap_or(0)
        .max("Class".len());

    writeln!(
        out,
        "{:>num_w$}  {:<name_w$}  {:>3}  {:<class_w$}  Id",
        "#", "Name", "Age", "Class"
    )?;
    for (i, record) in view.iter().enumerate() {
        writeln!(
            out,
            "{:>num_w$}  {:<name_w$}  {:>3}  {:<class_w$}  {}",
            i + 1,
            record.name,
            record.age,
            record.class,
            record.id
        )?;
    }
    Ok(())
}

fn ask_confirmation<R: BufRead, W: Write>(
    lines: &mut Lines<R>,
    out: &mut W,
    record: &Record,
) -> bool {
    if write!(out, "Delete record \"{}\"? [y/N] ", record.name)
        .and_then(|_| out.flush())
        .is_err()
    {
        return false;
    }
    match lines.next() {
        Some(Ok(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}

/// Loads the collection, then reads commands until `quit` or end of input.
pub async fn run_shell<A, R, W>(app: &mut App<A>, input: R, out: &mut W) -> io::Result<()>
where
    A: RecordApi,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    writeln!(out, "Loading records...")?;
    if let Some(notice) = app.load().await {
        writeln!(out, "{}", notice)?;
    }
    render(app.state(), out)?;

    loop {
        write!(out, "roster> ")?;
        out.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Show => render(app.state(), out)?,
            ShellCommand::Reload => {
                writeln!(out, "Loading records...")?;
                if let Some(notice) = app.load().await {
                    writeln!(out, "{}", notice)?;
                }
                render(app.state(), out)?;
            }
            ShellCommand::Set(field, value) => app.set_field(field, value),
            ShellCommand::Submit => {
                let notice = app.submit().await;
                writeln!(out, "{}", notice)?;
                if notice.is_success() {
                    render(app.state(), out)?;
                }
            }
            ShellCommand::Edit(target) => match target.resolve(app.state()) {
                Some(id) => {
                    let notice = app.start_edit(&id);
                    writeln!(out, "{}", notice)?;
                    render(app.state(), out)?;
                }
                None => writeln!(out, "No {} in the current view", target)?,
            },
            ShellCommand::Cancel => {
                app.cancel_edit();
                writeln!(out, "Form cleared")?;
            }
            ShellCommand::Delete(target) => match target.resolve(app.state()) {
                Some(id) => {
                    let notice = app
                        .delete(&id, |record| ask_confirmation(&mut lines, &mut *out, record))
                        .await;
                    match notice {
                        Some(notice) => {
                            writeln!(out, "{}", notice)?;
                            if notice.is_success() {
                                render(app.state(), out)?;
                            }
                        }
                        None => writeln!(out, "Delete cancelled")?,
                    }
                }
                None => writeln!(out, "No {} in the current view", target)?,
            },
            ShellCommand::Search(term) => {
                app.set_search(term);
                render(app.state(), out)?;
            }
            ShellCommand::Sort => {
                app.toggle_sort();
                render(app.state(), out)?;
            }
        }
    }

    Ok(())
}
