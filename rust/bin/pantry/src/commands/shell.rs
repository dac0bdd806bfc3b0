//! Interactive shell.
//!
//! Keeps one synchronizer alive and drives its state line by line: search
//! box, reset, per-item add/remove and the add dialog. While the dialog is
//! open, an empty line (Enter) submits it.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use pantry::InventorySync;

use super::inventory::render;
use super::OutputFormat;

const HELP: &str = "\
commands:
  list              show the current result set
  refresh           reload everything from the store
  search <text>     filter items by name
  clear             clear the search text (keeps the results)
  reset             show all items and clear the search text
  new               open the add dialog
  add <name>        one more unit of a stored item
  remove <name>     one unit less (the last one deletes the item)
  quit              leave the shell";

const DIALOG_HELP: &str = "\
add dialog:
  name <text>       set the item name
  quantity <n>      set the quantity
  <Enter>           submit
  cancel            close without adding";

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    sync: InventorySync,
    format: OutputFormat,
}

impl Shell {
    pub fn new(sync: InventorySync, format: OutputFormat) -> Self {
        Self { sync, format }
    }

    pub fn prompt(&self) -> &'static str {
        if self.sync.state().dialog().is_open() {
            "new item> "
        } else {
            "pantry> "
        }
    }

    fn show(&self, out: &mut impl Write) -> io::Result<()> {
        render(out, self.sync.state(), self.format)
    }

    /// Handle one input line (without its newline).
    pub async fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        if self.sync.state().dialog().is_open() {
            self.handle_dialog(line, out).await?;
            return Ok(Flow::Continue);
        }

        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "help" | "?" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(Flow::Quit),
            "list" | "ls" => self.show(out)?,
            "refresh" => {
                self.sync.refresh().await?;
                self.show(out)?;
            }
            "search" => {
                self.sync.state_mut().search(arg);
                self.show(out)?;
            }
            "clear" => {
                self.sync.state_mut().clear_search_text();
                writeln!(out, "Search text cleared.")?;
            }
            "reset" | "home" => {
                self.sync.state_mut().reset_search();
                self.show(out)?;
            }
            "new" => {
                self.sync.state_mut().dialog_mut().open();
                writeln!(out, "{}", DIALOG_HELP)?;
            }
            "add" | "remove" if arg.is_empty() => {
                writeln!(out, "usage: {} <name>", cmd)?;
            }
            "add" => {
                self.sync.add_one(arg).await?;
                self.show(out)?;
            }
            "remove" => {
                self.sync.remove_item(arg).await?;
                self.show(out)?;
            }
            other => writeln!(out, "Unknown command '{}'. Type 'help'.", other)?,
        }
        Ok(Flow::Continue)
    }

    async fn handle_dialog(&mut self, line: &str, out: &mut impl Write) -> Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if self.sync.submit_dialog().await? {
                writeln!(out, "Added.")?;
                self.show(out)?;
            } else if let Some(error) = self.sync.state().dialog().form().and_then(|f| f.error.as_deref()) {
                writeln!(out, "{}", error)?;
            }
            return Ok(());
        }

        let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim_start()),
            None => (trimmed, ""),
        };
        let dialog = self.sync.state_mut().dialog_mut();
        match cmd {
            "name" => dialog.set_name(arg),
            "quantity" | "qty" => dialog.set_quantity(arg),
            "cancel" => {
                dialog.cancel();
                writeln!(out, "Cancelled.")?;
            }
            _ => writeln!(out, "{}", DIALOG_HELP)?,
        }
        Ok(())
    }
}

/// Run the shell on stdin/stdout until `quit` or end of input.
pub async fn run(mut sync: InventorySync, format: OutputFormat) -> Result<()> {
    sync.refresh().await?;
    let mut shell = Shell::new(sync, format);
    let mut stdout = io::stdout();
    shell.show(&mut stdout)?;

    let stdin = io::stdin();
    loop {
        write!(stdout, "{}", shell.prompt())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            break;
        }
        match shell.handle(line.trim_end_matches(['\r', '\n']), &mut stdout).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            // Store failures end the command, not the session.
            Err(e) => writeln!(stdout, "error: {:#}", e)?,
        }
    }
    Ok(())
}
