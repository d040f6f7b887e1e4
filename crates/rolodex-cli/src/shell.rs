use crate::commands::{self, usage_hint, BookCommand, Context};
use crate::error::user_message;
use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use rolodex_core::time::local_today;
use rolodex_core::AddressBook;
use rolodex_store::Store;
use std::future::Future;
use std::io::{self, Write};
use std::iter;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

const WELCOME: &str = "Welcome to the assistant bot!";
const PROMPT: &str = "Enter a command: ";
const GOODBYE: &str = "Good bye!";

const HELP: &str = "\
hello                                   greet the assistant
all                                     show every contact
show <name>                             show one contact
add <name> <phone>                      add a contact or a phone number
change <name> <old phone> <new phone>   replace a phone number
phone <name>                            show phone numbers
delete <name>                           delete a contact
add-email <name> <email>                add an email
change-email <name> <old> <new>         replace an email
email <name>                            show emails
add-birthday <name> <DD.MM.YYYY>        set a date of birth
change-birthday <name> <DD.MM.YYYY>     replace the date of birth
show-birthday <name>                    show the date of birth
birthdays [--days N]                    upcoming birthdays by day
help                                    show this list
exit | close | quit                     save and leave";

#[derive(Debug, Parser)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: BookCommand,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Reply { text: String, mutated: bool },
    Silent,
    Exit,
}

impl Outcome {
    fn reply(text: impl Into<String>) -> Self {
        Outcome::Reply {
            text: text.into(),
            mutated: false,
        }
    }
}

/// Handles one line of shell input against `book`.
pub fn dispatch(book: &mut AddressBook, line: &str, today: NaiveDate) -> Outcome {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Outcome::Silent;
    };
    let command = first.to_lowercase();
    match command.as_str() {
        "exit" | "close" | "quit" => return Outcome::Exit,
        "hello" => return Outcome::reply("How can I help you?"),
        "help" => return Outcome::reply(HELP),
        _ => {}
    }

    let parsed = match parse_line(&command, words.collect()) {
        Ok(parsed) => parsed,
        Err(text) => return Outcome::reply(text),
    };

    let mutating = parsed.is_mutating();
    let mut ctx = Context {
        book,
        json: false,
        today,
    };
    match commands::execute(&mut ctx, parsed) {
        Ok(text) => Outcome::Reply {
            text,
            mutated: mutating,
        },
        Err(err) => Outcome::reply(user_message(&err)),
    }
}

// Words past the ones a command takes are ignored.
fn parse_line(command: &str, mut args: Vec<&str>) -> std::result::Result<BookCommand, String> {
    if ShellLine::command().find_subcommand(command).is_none() {
        return Err("Invalid command.".to_string());
    }
    loop {
        let err = match ShellLine::try_parse_from(iter::once(command).chain(args.iter().copied())) {
            Ok(line) => return Ok(line.command),
            Err(err) => err,
        };
        debug!(command, kind = ?err.kind(), "shell arguments rejected");
        match err.kind() {
            ErrorKind::UnknownArgument | ErrorKind::TooManyValues if !args.is_empty() => {
                args.pop();
            }
            ErrorKind::MissingRequiredArgument => {
                return Err(match usage_hint(command) {
                    Some(hint) => hint.to_string(),
                    None => clap_summary(&err),
                });
            }
            _ => return Err(clap_summary(&err)),
        }
    }
}

fn clap_summary(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

/// Resolves once SIGINT or SIGTERM arrives. Must be called inside a tokio
/// runtime so the handlers are registered before the loop starts reading.
#[cfg(unix)]
fn termination() -> io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    Ok(async move {
        tokio::select! {
            _ = sigint.recv() => debug!("received SIGINT"),
            _ = sigterm.recv() => debug!("received SIGTERM"),
        }
    })
}

#[cfg(not(unix))]
fn termination() -> io::Result<impl Future<Output = ()>> {
    Ok(async {
        let _ = tokio::signal::ctrl_c().await;
        debug!("received Ctrl-C");
    })
}

/// Runs the interactive loop until an exit command, end of input or
/// `shutdown` resolving. The book is saved after every change and once more
/// on the way out, whichever way the loop ends.
pub async fn run<R, W, S>(store: &mut Store, input: R, mut output: W, shutdown: S) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    writeln!(output, "{WELCOME}")?;
    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        let next = tokio::select! {
            biased;
            line = lines.next_line() => line.context("read shell input")?,
            () = &mut shutdown => {
                writeln!(output)?;
                break;
            }
        };
        let Some(line) = next else {
            writeln!(output)?;
            break;
        };

        match dispatch(store.book_mut(), &line, local_today()) {
            Outcome::Silent => {}
            Outcome::Exit => break,
            Outcome::Reply { text, mutated } => {
                writeln!(output, "{text}")?;
                if mutated {
                    if let Err(err) = store.save() {
                        warn!(error = %err, "autosave failed");
                    }
                }
            }
        }
    }

    store.save().context("save address book")?;
    writeln!(output, "{GOODBYE}")?;
    Ok(())
}

/// The shell on the process's stdin and stdout, stopping cleanly on
/// SIGINT or SIGTERM.
pub fn run_interactive(store: &mut Store) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start shell runtime")?;
    let shutdown = {
        let _context = runtime.enter();
        termination().context("install signal handlers")?
    };
    let input = BufReader::new(tokio::io::stdin());
    let result = runtime.block_on(run(store, input, io::stdout().lock(), shutdown));
    // A read from stdin may still be parked on a blocking thread.
    runtime.shutdown_background();
    result
}

#[cfg(test)]
mod tests {
    use super::{dispatch, run, Outcome};
    use chrono::NaiveDate;
    use rolodex_core::AddressBook;
    use rolodex_store::Store;
    use std::future;
    use tempfile::TempDir;
    use tokio::io::{duplex, AsyncWriteExt, BufReader};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2002, 6, 25).unwrap()
    }

    fn text(outcome: Outcome) -> String {
        match outcome {
            Outcome::Reply { text, .. } => text,
            other => panic!("expected reply, got {other:?}"),
        }
    }

    #[test]
    fn greetings_and_unknown_commands() {
        let mut book = AddressBook::new();
        assert_eq!(
            text(dispatch(&mut book, "Hello", today())),
            "How can I help you?"
        );
        assert_eq!(
            text(dispatch(&mut book, "dance now", today())),
            "Invalid command."
        );
        assert_eq!(dispatch(&mut book, "   ", today()), Outcome::Silent);
        assert_eq!(dispatch(&mut book, "QUIT", today()), Outcome::Exit);
    }

    #[test]
    fn missing_arguments_produce_hint() {
        let mut book = AddressBook::new();
        assert_eq!(
            text(dispatch(&mut book, "add John", today())),
            "Give me the name and phone number, please."
        );
        assert_eq!(
            text(dispatch(&mut book, "phone", today())),
            "Give me the name, please."
        );
    }

    #[test]
    fn mutations_are_flagged() {
        let mut book = AddressBook::new();
        assert_eq!(
            dispatch(&mut book, "add John 1234567890", today()),
            Outcome::Reply {
                text: "Contact added.".to_string(),
                mutated: true
            }
        );
        assert_eq!(
            dispatch(&mut book, "phone John", today()),
            Outcome::Reply {
                text: "1234567890".to_string(),
                mutated: false
            }
        );
    }

    #[test]
    fn handler_errors_are_reported_as_text() {
        let mut book = AddressBook::new();
        assert_eq!(
            text(dispatch(&mut book, "phone Nobody", today())),
            "the contact not found"
        );
    }

    #[test]
    fn surplus_words_are_ignored() {
        let mut book = AddressBook::new();
        assert_eq!(
            text(dispatch(&mut book, "all please", today())),
            "The address book is empty."
        );
        assert_eq!(
            dispatch(&mut book, "add John 1234567890 home", today()),
            Outcome::Reply {
                text: "Contact added.".to_string(),
                mutated: true
            }
        );
        assert_eq!(
            text(dispatch(&mut book, "phone John mobile", today())),
            "1234567890"
        );
        assert_eq!(
            text(dispatch(&mut book, "birthdays now", today())),
            "There are currently no upcoming birthdays."
        );
    }

    #[test]
    fn bad_option_value_names_the_problem() {
        let mut book = AddressBook::new();
        let reply = text(dispatch(&mut book, "birthdays --days soon", today()));
        assert_ne!(reply, "Invalid command.");
        assert!(reply.contains("--days"), "{reply}");
    }

    #[tokio::test]
    async fn run_saves_on_end_of_input() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("addressbook.json");
        let mut store = Store::open(&path).expect("open");

        let input = "add John 1234567890\nadd-birthday John 29.06.1990\n".as_bytes();
        let mut output = Vec::new();
        run(&mut store, input, &mut output, future::pending())
            .await
            .expect("run");

        let printed = String::from_utf8(output).expect("utf8");
        assert!(printed.starts_with("Welcome to the assistant bot!"));
        assert!(printed.contains("Contact added."));
        assert!(printed.contains("Date of birth added."));
        assert!(printed.trim_end().ends_with("Good bye!"));

        let reopened = Store::open(&path).expect("reopen");
        let john = reopened.book().find("John").expect("john");
        assert_eq!(
            john.birthday().map(ToString::to_string).as_deref(),
            Some("29.06.1990")
        );
    }

    #[tokio::test]
    async fn shutdown_while_waiting_for_input_saves_and_says_goodbye() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("addressbook.json");
        let mut store = Store::open(&path).expect("open");

        let (mut writer, reader) = duplex(256);
        writer
            .write_all(b"add John 1234567890\n")
            .await
            .expect("write");
        let mut output = Vec::new();
        run(&mut store, BufReader::new(reader), &mut output, future::ready(()))
            .await
            .expect("run");
        drop(writer);

        let printed = String::from_utf8(output).expect("utf8");
        assert!(printed.contains("Contact added."));
        assert!(printed.trim_end().ends_with("Good bye!"));
        assert!(Store::open(&path).expect("reopen").book().find("John").is_ok());
    }
}
