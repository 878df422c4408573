//! Terminal I/O for the client commands
//!
//! Output goes to stdout; prompts read one line from stdin.

use std::io::{self, BufRead, Write};

use crate::model::StudentRecord;
use crate::ui::details;

use super::errors::CliResult;

/// Ask a yes/no question; anything but `y`/`yes` is a no
pub fn confirm(prompt: &str) -> CliResult<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{} [y/N] ", prompt)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// One line per record: id, then the list summary
pub fn write_list(records: &[StudentRecord]) -> CliResult<()> {
    let mut stdout = io::stdout();
    if records.is_empty() {
        writeln!(stdout, "No students.")?;
    }
    for record in records {
        writeln!(stdout, "{}  {}", record.id, details::list_summary(record))?;
    }
    stdout.flush()?;
    Ok(())
}

pub fn write_details(record: &StudentRecord) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "ID: {}", record.id)?;
    writeln!(stdout, "{}", details::render_details(record))?;
    stdout.flush()?;
    Ok(())
}

pub fn write_notice(message: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", message)?;
    stdout.flush()?;
    Ok(())
}
