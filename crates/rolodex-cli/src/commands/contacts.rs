use crate::commands::Context;
use anyhow::Result;
use clap::Args;
use rolodex_core::{CoreError, Field, Record, RecordDto};
use serde_json::json;

#[derive(Debug, Args)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct ChangeArgs {
    pub name: String,
    pub old_phone: String,
    pub new_phone: String,
}

pub fn show_all(ctx: &mut Context<'_>) -> Result<String> {
    let records: Vec<RecordDto> = ctx.book.records().map(RecordDto::from).collect();
    let text = if records.is_empty() {
        "The address book is empty.".to_string()
    } else {
        render_records(ctx.book.records())
    };
    ctx.respond(text, &records)
}

pub fn show_contact(ctx: &mut Context<'_>, args: NameArgs) -> Result<String> {
    let record = ctx.book.find(&args.name)?;
    ctx.respond(record.to_string(), &RecordDto::from(record))
}

pub fn show_phones(ctx: &mut Context<'_>, args: NameArgs) -> Result<String> {
    let record = ctx.book.find(&args.name)?;
    let phones: Vec<&str> = record.phones().iter().map(|phone| phone.as_str()).collect();
    let text = if phones.is_empty() {
        "The contact does not have any phone numbers.".to_string()
    } else {
        phones.join("\n")
    };
    ctx.respond(text, &phones)
}

pub fn add_contact(ctx: &mut Context<'_>, args: AddArgs) -> Result<String> {
    let status = match ctx.book.find_mut(&args.name) {
        Ok(record) => {
            record.add_phone(&args.phone)?;
            "Contact updated."
        }
        Err(CoreError::NotFound(Field::Contact)) => {
            let mut record = Record::new(&args.name)?;
            record.add_phone(&args.phone)?;
            ctx.book.add_record(record)?;
            "Contact added."
        }
        Err(err) => return Err(err.into()),
    };
    let record = ctx.book.find(&args.name)?;
    ctx.respond(status, &RecordDto::from(record))
}

pub fn change_contact(ctx: &mut Context<'_>, args: ChangeArgs) -> Result<String> {
    let record = ctx.book.find_mut(&args.name)?;
    record.edit_phone(&args.old_phone, &args.new_phone)?;
    let dto = RecordDto::from(&*record);
    ctx.respond("Contact updated.", &dto)
}

pub fn delete_contact(ctx: &mut Context<'_>, args: NameArgs) -> Result<String> {
    let removed = ctx.book.delete_record(&args.name)?;
    ctx.respond(
        "Contact deleted.",
        &json!({ "deleted": removed.name().as_str() }),
    )
}

pub(crate) fn render_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> String {
    records
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
