use crate::commands::contacts::NameArgs;
use crate::commands::Context;
use anyhow::Result;
use clap::Args;
use rolodex_core::RecordDto;

#[derive(Debug, Args)]
pub struct AddEmailArgs {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Args)]
pub struct ChangeEmailArgs {
    pub name: String,
    pub old_email: String,
    pub new_email: String,
}

pub fn show_emails(ctx: &mut Context<'_>, args: NameArgs) -> Result<String> {
    let record = ctx.book.find(&args.name)?;
    let emails: Vec<&str> = record.emails().iter().map(|email| email.as_str()).collect();
    let text = if emails.is_empty() {
        "The contact does not have any emails.".to_string()
    } else {
        emails.join("\n")
    };
    ctx.respond(text, &emails)
}

pub fn add_email(ctx: &mut Context<'_>, args: AddEmailArgs) -> Result<String> {
    let record = ctx.book.find_mut(&args.name)?;
    record.add_email(&args.email)?;
    let dto = RecordDto::from(&*record);
    ctx.respond("Contact updated.", &dto)
}

pub fn change_email(ctx: &mut Context<'_>, args: ChangeEmailArgs) -> Result<String> {
    let record = ctx.book.find_mut(&args.name)?;
    record.edit_email(&args.old_email, &args.new_email)?;
    let dto = RecordDto::from(&*record);
    ctx.respond("Contact updated.", &dto)
}

#[cfg(test)]
mod tests {
    use super::{add_email, change_email, show_emails, AddEmailArgs, ChangeEmailArgs};
    use crate::commands::contacts::NameArgs;
    use crate::commands::Context;
    use chrono::NaiveDate;
    use rolodex_core::{AddressBook, CoreError, Field, Record};

    fn book_with_john() -> AddressBook {
        AddressBook::from_records([Record::new("John").unwrap()])
    }

    fn context(book: &mut AddressBook) -> Context<'_> {
        Context {
            book,
            json: false,
            today: NaiveDate::from_ymd_opt(2002, 6, 25).unwrap(),
        }
    }

    fn john() -> NameArgs {
        NameArgs {
            name: "John".to_string(),
        }
    }

    #[test]
    fn add_and_change_email() {
        let mut book = book_with_john();
        let mut ctx = context(&mut book);
        assert_eq!(
            show_emails(&mut ctx, john()).unwrap(),
            "The contact does not have any emails."
        );

        add_email(
            &mut ctx,
            AddEmailArgs {
                name: "John".to_string(),
                email: "john@test.com".to_string(),
            },
        )
        .unwrap();
        change_email(
            &mut ctx,
            ChangeEmailArgs {
                name: "John".to_string(),
                old_email: "john@test.com".to_string(),
                new_email: "john@work.org".to_string(),
            },
        )
        .unwrap();
        assert_eq!(show_emails(&mut ctx, john()).unwrap(), "john@work.org");
    }

    #[test]
    fn change_missing_email_is_not_found() {
        let mut book = book_with_john();
        let mut ctx = context(&mut book);
        let err = change_email(
            &mut ctx,
            ChangeEmailArgs {
                name: "John".to_string(),
                old_email: "nobody@test.com".to_string(),
                new_email: "john@work.org".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CoreError>(),
            Some(&CoreError::NotFound(Field::Email))
        );
    }

    #[test]
    fn add_invalid_email_is_rejected() {
        let mut book = book_with_john();
        let mut ctx = context(&mut book);
        let err = add_email(
            &mut ctx,
            AddEmailArgs {
                name: "John".to_string(),
                email: "john@localhost".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CoreError>(),
            Some(&CoreError::InvalidEmail)
        );
    }
}
