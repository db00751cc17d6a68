//! Line commands typed into the board, mapped onto the page's three forms.

use client_core::{FormData, FormKind, FormSubmission};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(FormSubmission),
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
commands:
  add <title> [| <description>]   create a todo
  done <id>                       mark a todo completed
  rm <id>                         delete a todo
  help                            show this text
  quit                            stop polling and exit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "add" => {
            if rest.is_empty() {
                return Err("add needs a title".to_string());
            }
            let mut data = FormData::new();
            match rest.split_once('|') {
                Some((title, description)) => {
                    data.append("title", title.trim());
                    data.append("description", description.trim());
                }
                None => data.append("title", rest),
            }
            Ok(Command::Submit(FormSubmission::for_kind(FormKind::NewTodo, data)))
        }
        "done" => Ok(id_form(FormKind::UpdateStatus, rest)),
        "rm" => Ok(id_form(FormKind::DeleteTodo, rest)),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

/// The id is passed through untouched; coercion belongs to the form handler.
fn id_form(kind: FormKind, raw_id: &str) -> Command {
    Command::Submit(FormSubmission::for_kind(
        kind,
        FormData::new().with("id", raw_id),
    ))
}
