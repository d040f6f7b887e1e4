use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use rolodex_core::AddressBook;
use serde::Serialize;

pub mod backup;
pub mod birthdays;
pub mod completions;
pub mod contacts;
pub mod emails;

pub struct Context<'a> {
    pub book: &'a mut AddressBook,
    pub json: bool,
    pub today: NaiveDate,
}

impl Context<'_> {
    /// Plain status text, or `value` as JSON when `--json` is set.
    pub fn respond<T: Serialize>(&self, text: impl Into<String>, value: &T) -> Result<String> {
        if self.json {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(text.into())
        }
    }
}

/// Commands that operate on the address book. Shared by the one-shot CLI
/// and the interactive shell.
#[derive(Debug, Subcommand)]
pub enum BookCommand {
    /// Show every contact
    All,
    /// Show one contact
    Show(contacts::NameArgs),
    /// Show a contact's phone numbers
    Phone(contacts::NameArgs),
    /// Add a contact, or a phone number to an existing contact
    Add(contacts::AddArgs),
    /// Replace one of a contact's phone numbers
    Change(contacts::ChangeArgs),
    /// Delete a contact
    Delete(contacts::NameArgs),
    /// Show a contact's emails
    Email(contacts::NameArgs),
    #[command(name = "add-email")]
    AddEmail(emails::AddEmailArgs),
    #[command(name = "change-email")]
    ChangeEmail(emails::ChangeEmailArgs),
    #[command(name = "add-birthday")]
    AddBirthday(birthdays::BirthdayArgs),
    #[command(name = "change-birthday")]
    ChangeBirthday(birthdays::BirthdayArgs),
    #[command(name = "show-birthday")]
    ShowBirthday(contacts::NameArgs),
    /// Contacts to congratulate soon, grouped by day
    Birthdays(birthdays::UpcomingArgs),
}

impl BookCommand {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            BookCommand::Add(_)
                | BookCommand::Change(_)
                | BookCommand::Delete(_)
                | BookCommand::AddEmail(_)
                | BookCommand::ChangeEmail(_)
                | BookCommand::AddBirthday(_)
                | BookCommand::ChangeBirthday(_)
        )
    }
}

pub fn execute(ctx: &mut Context<'_>, command: BookCommand) -> Result<String> {
    match command {
        BookCommand::All => contacts::show_all(ctx),
        BookCommand::Show(args) => contacts::show_contact(ctx, args),
        BookCommand::Phone(args) => contacts::show_phones(ctx, args),
        BookCommand::Add(args) => contacts::add_contact(ctx, args),
        BookCommand::Change(args) => contacts::change_contact(ctx, args),
        BookCommand::Delete(args) => contacts::delete_contact(ctx, args),
        BookCommand::Email(args) => emails::show_emails(ctx, args),
        BookCommand::AddEmail(args) => emails::add_email(ctx, args),
        BookCommand::ChangeEmail(args) => emails::change_email(ctx, args),
        BookCommand::AddBirthday(args) => birthdays::add_birthday(ctx, args),
        BookCommand::ChangeBirthday(args) => birthdays::change_birthday(ctx, args),
        BookCommand::ShowBirthday(args) => birthdays::show_birthday(ctx, args),
        BookCommand::Birthdays(args) => birthdays::upcoming(ctx, args),
    }
}

/// What to ask for when a command is missing its arguments.
pub fn usage_hint(command: &str) -> Option<&'static str> {
    let hint = match command {
        "show" | "phone" | "delete" | "email" | "show-birthday" => "Give me the name, please.",
        "add" => "Give me the name and phone number, please.",
        "change" => "Give me the name, existing phone number and new phone number, please.",
        "add-email" => "Give me the name and email, please.",
        "change-email" => "Give me the name, existing email and new email, please.",
        "add-birthday" | "change-birthday" => "Give me the name and date of birth, please.",
        _ => return None,
    };
    Some(hint)
}

#[cfg(test)]
mod tests {
    use super::{execute, BookCommand, Context};
    use crate::commands::contacts::{AddArgs, NameArgs};
    use chrono::NaiveDate;
    use rolodex_core::AddressBook;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2002, 6, 25).unwrap()
    }

    #[test]
    fn queries_do_not_mutate() {
        assert!(!BookCommand::All.is_mutating());
        assert!(!BookCommand::Phone(NameArgs {
            name: "John".to_string()
        })
        .is_mutating());
        assert!(BookCommand::Delete(NameArgs {
            name: "John".to_string()
        })
        .is_mutating());
    }

    #[test]
    fn json_output_replaces_status_text() {
        let mut book = AddressBook::new();
        let mut ctx = Context {
            book: &mut book,
            json: true,
            today: today(),
        };
        execute(
            &mut ctx,
            BookCommand::Add(AddArgs {
                name: "John".to_string(),
                phone: "1234567890".to_string(),
            }),
        )
        .unwrap();
        let output = execute(&mut ctx, BookCommand::All).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["name"], "John");
        assert_eq!(value[0]["phones"][0], "1234567890");
    }
}
