//! Interactive shell command parsing
//!
//! Each input line is one command. Item numbers are 1-based as displayed and
//! are converted to 0-based view indices here. A line that does not start
//! with a known command word is treated as a question.

use std::path::PathBuf;

use crate::export::ExportFormat;
use crate::models::Language;

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Submit a question
    Ask(String),
    /// Show the active view
    List,
    /// Switch to the full history view
    History,
    /// Switch to the bookmarks view
    Bookmarks,
    /// Show one entry in detail
    Show(usize),
    /// Toggle the bookmark of an entry
    Star(usize),
    /// Delete an entry
    Delete(usize),
    /// Toggle export selection of entries
    Select(Vec<usize>),
    /// Drop the export selection
    Clear,
    /// Export the selection, optionally to an explicit path
    Export(ExportFormat, Option<PathBuf>),
    /// Show the current contract filter
    ShowFilter,
    /// Restrict searches to a catalog entry (name or number)
    Filter(String),
    /// Change the answer language
    Lang(Language),
    /// List selectable contracts
    Contracts,
    /// Copy an entry's answer to the clipboard
    Copy(usize),
    Help,
    Quit,
}

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  ask <question>        ask a question (any unknown line is asked too)
  list                  show the active view
  history | bookmarks   switch view (clears selection)
  show <n>              show entry n in detail
  star <n>              toggle bookmark of entry n
  rm <n>                delete entry n (clears selection)
  select <n> [<n>...]   toggle entries for export
  clear                 clear the selection
  export <xlsx|csv|docx> [path]
                        export selected entries
  file [<name|n>]       show or set the contract filter
  contracts             list contracts
  lang <ko|en>          set answer language
  copy <n>              copy the answer of entry n to the clipboard
  help                  show this help
  quit                  leave";

fn index(arg: Option<&str>) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| "Missing entry number".to_string())?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Invalid entry number '{arg}'")),
    }
}

impl ShellCommand {
    /// Parse one input line; `Ok(None)` for a blank line
    ///
    /// # Errors
    ///
    /// Returns a user-facing message if a command's arguments are invalid.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));
        let mut args = rest.split_whitespace();

        let command = match word.to_ascii_lowercase().as_str() {
            "ask" | "q" => Self::Ask(rest.to_string()),
            "list" | "ls" => Self::List,
            "history" => Self::History,
            "bookmarks" | "bm" => Self::Bookmarks,
            "show" => Self::Show(index(args.next())?),
            "star" | "bookmark" => Self::Star(index(args.next())?),
            "rm" | "delete" | "del" => Self::Delete(index(args.next())?),
            "select" | "sel" => {
                let indices = args
                    .map(|a| index(Some(a)))
                    .collect::<Result<Vec<_>, _>>()?;
                if indices.is_empty() {
                    return Err("Missing entry number".to_string());
                }
                Self::Select(indices)
            }
            "clear" => Self::Clear,
            "export" => {
                let format = args
                    .next()
                    .ok_or_else(|| "Missing export format (xlsx, csv or docx)".to_string())?
                    .parse::<ExportFormat>()
                    .map_err(|e| e.to_string())?;
                Self::Export(format, args.next().map(PathBuf::from))
            }
            "file" if rest.is_empty() => Self::ShowFilter,
            "file" => Self::Filter(rest.to_string()),
            "contracts" => Self::Contracts,
            "lang" => Self::Lang(
                args.next()
                    .ok_or_else(|| "Missing language (ko or en)".to_string())?
                    .parse()?,
            ),
            "copy" => Self::Copy(index(args.next())?),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Ask(line.to_string()),
        };
        Ok(Some(command))
    }
}
