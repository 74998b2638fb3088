//! Subcommand definitions and their dispatch onto the note store.

use anyhow::{Context, Result};
use clap::Subcommand;
use jotter_core::{Author, NewNote, Note, NoteId, NoteStore};
use log::info;
use std::io::Write;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a note to the database
    #[command(visible_alias = "a")]
    Add {
        name: String,
        text: String,
        /// Free-form category
        tag: Option<String>,
    },
    /// Delete a note from the database by id
    #[command(visible_alias = "d")]
    Del {
        #[arg(allow_negative_numbers = true)]
        id: NoteId,
    },
    /// Show a note written by the current author
    #[command(visible_alias = "s")]
    Mine,
    /// Show the body of a note by name
    #[command(visible_alias = "n")]
    Name { name: String },
    /// List every stored note
    #[command(visible_alias = "ls")]
    List,
}

impl Command {
    fn label(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Del { .. } => "del",
            Self::Mine => "mine",
            Self::Name { .. } => "name",
            Self::List => "list",
        }
    }
}

/// Runs one subcommand against `store`, writing user-facing output to `out`.
pub fn run_command<S, W>(command: &Command, store: &S, author: &Author, out: &mut W) -> Result<()>
where
    S: NoteStore + ?Sized,
    W: Write,
{
    info!("event=command_start module=cli command={}", command.label());

    match command {
        Command::Add { name, text, tag } => {
            let mut note = NewNote::new(name.as_str(), text.as_str());
            if let Some(tag) = tag {
                note = note.with_tag(tag.as_str());
            }
            let created = store.create(&note).context("add note")?;
            writeln!(out, "added note {} ({})", created.id, created.name)?;
        }
        Command::Del { id } => {
            store.delete(*id).context("delete note")?;
            writeln!(out, "deleted note {id}")?;
        }
        Command::Mine => {
            let note = store
                .find_by_author(author.as_str())
                .context("show note by author")?;
            write_note(out, &note)?;
        }
        Command::Name { name } => {
            let note = store.find_by_name(name).context("show note by name")?;
            writeln!(out, "{}", note.text)?;
        }
        Command::List => {
            for note in store.list_all().context("list notes")? {
                writeln!(out, "{}\t{}\t{}", note.id, note.name, note.tag)?;
            }
        }
    }

    Ok(())
}

fn write_note<W: Write>(out: &mut W, note: &Note) -> Result<()> {
    if note.tag.is_empty() {
        writeln!(out, "#{} {}", note.id, note.name)?;
    } else {
        writeln!(out, "#{} {} [{}]", note.id, note.name, note.tag)?;
    }
    writeln!(out, "{}", note.text)?;
    Ok(())
}
