//! Interactive session: the directory stays mounted between commands.

use std::io::{self, Write};

use chat_directory::controller::{ActionOutcome, Confirm, DirectoryController};
use chat_directory::directory::DraftPatch;
use chat_directory::remote::{DirectoryApi, UserId};

use super::render::print_directory;

const HELP: &str = "\
Commands:
  refresh               reload users and messages
  list                  show the directory
  select <id>           focus a user
  unselect              clear the focus
  new                   open or close the creation form
  set <field> <value>   edit the form (field: name, email, username)
  create                submit the form
  delete <id>           delete a user (asks for confirmation)
  help                  show this text
  quit                  leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Refresh,
    List,
    Select(UserId),
    Unselect,
    ToggleForm,
    Set(DraftPatch),
    Create,
    Delete(UserId),
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "refresh" | "r" => ShellCommand::Refresh,
        "list" | "ls" => ShellCommand::List,
        "select" => ShellCommand::Select(parse_id(rest)?),
        "unselect" => ShellCommand::Unselect,
        "new" => ShellCommand::ToggleForm,
        "set" => ShellCommand::Set(parse_patch(rest)?),
        "create" => ShellCommand::Create,
        "delete" | "rm" => ShellCommand::Delete(parse_id(rest)?),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

fn parse_id(arg: &str) -> Result<UserId, String> {
    arg.parse::<u64>()
        .map(UserId)
        .map_err(|_| format!("expected a numeric user id, got '{arg}'"))
}

fn parse_patch(args: &str) -> Result<DraftPatch, String> {
    let (field, value) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    let value = value.trim();
    match field {
        "name" => Ok(DraftPatch::name(value)),
        "email" => Ok(DraftPatch::email(value)),
        "username" => Ok(DraftPatch::username(value)),
        "" => Err("usage: set <name|email|username> <value>".to_string()),
        other => Err(format!("unknown field '{other}'")),
    }
}

pub async fn run<A, C>(controller: DirectoryController<A, C>) -> anyhow::Result<()>
where
    A: DirectoryApi,
    C: Confirm,
{
    print_directory(&controller.view());
    println!();
    println!("{HELP}");

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Refresh => {
                controller.refresh().await;
            }
            ShellCommand::List => {}
            ShellCommand::Select(id) => {
                if !controller.select_user(Some(id)) {
                    println!("No user with id {id}");
                    continue;
                }
            }
            ShellCommand::Unselect => {
                controller.select_user(None);
            }
            ShellCommand::ToggleForm => controller.toggle_form(),
            ShellCommand::Set(patch) => controller.edit_draft(patch),
            ShellCommand::Create => report(controller.create_user().await),
            ShellCommand::Delete(id) => report(controller.delete_user(id).await),
        }

        print_directory(&controller.view());
    }

    controller.store().teardown();
    Ok(())
}

fn report(outcome: ActionOutcome) {
    match outcome {
        ActionOutcome::Declined => println!("Cancelado."),
        ActionOutcome::AlreadyRunning => println!("Ya hay una operación en curso."),
        // Completed, failed, and invalid outcomes show up in the rendered view.
        _ => {}
    }
}
