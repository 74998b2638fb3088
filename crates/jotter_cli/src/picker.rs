//! Line-oriented note picker shown when no subcommand is given.
//!
//! Lists note names, reads a numbered selection, re-queries the store by
//! name and prints the note body. Read-only: no writes happen here.

use anyhow::{Context, Result};
use jotter_core::NoteStore;
use log::debug;
use std::io::{BufRead, Write};

const TITLE: &str = r#"What note do you want to read? Execute "add" to add a new note"#;
const EMPTY_HINT: &str = r#"No notes yet. Execute "add" to add a new note"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Quit,
    Pick(usize),
    Invalid,
}

fn parse_selection(input: &str, count: usize) -> Selection {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("q") {
        return Selection::Quit;
    }
    match trimmed.parse::<usize>() {
        Ok(number) if (1..=count).contains(&number) => Selection::Pick(number - 1),
        _ => Selection::Invalid,
    }
}

/// Runs the picker until a note is shown, the user quits, or input ends.
pub fn run_picker<S, R, W>(store: &S, mut input: R, out: &mut W) -> Result<()>
where
    S: NoteStore + ?Sized,
    R: BufRead,
    W: Write,
{
    let notes = store.list_all().context("load notes")?;

    if notes.is_empty() {
        writeln!(out, "{EMPTY_HINT}")?;
        return Ok(());
    }

    writeln!(out, "{TITLE}")?;
    writeln!(out)?;
    for (index, note) in notes.iter().enumerate() {
        writeln!(out, "  {}. {} (#{})", index + 1, note.name, note.id)?;
    }

    loop {
        write!(out, "\nSelect a note [1-{}, q to quit]: ", notes.len())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        match parse_selection(&line, notes.len()) {
            Selection::Quit => return Ok(()),
            Selection::Invalid => {
                writeln!(out, "invalid selection `{}`", line.trim())?;
            }
            Selection::Pick(index) => {
                let selected = &notes[index];
                debug!(
                    "event=picker_select module=cli index={} id={}",
                    index, selected.id
                );
                let found = store
                    .find_by_name(&selected.name)
                    .context("show note by name")?;
                // Duplicate names resolve to an arbitrary match; keep the chosen entry.
                let text = if found.id == selected.id {
                    found.text
                } else {
                    selected.text.clone()
                };
                writeln!(out)?;
                writeln!(out, "{text}")?;
                return Ok(());
            }
        }
    }
}
