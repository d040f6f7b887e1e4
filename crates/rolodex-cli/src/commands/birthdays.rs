use crate::commands::contacts::{render_records, NameArgs};
use crate::commands::Context;
use crate::util::{format_day, parse_day, parse_window_days};
use anyhow::Result;
use clap::Args;
use rolodex_core::{RecordDto, UpcomingBirthdayDto};
use tracing::debug;

#[derive(Debug, Args)]
pub struct BirthdayArgs {
    pub name: String,
    /// Date of birth as DD.MM.YYYY
    pub birthday: String,
}

#[derive(Debug, Args)]
pub struct UpcomingArgs {
    /// Look ahead this many days instead of the book's window
    #[arg(long)]
    pub days: Option<i64>,
    /// Reference day as DD.MM.YYYY (defaults to today)
    #[arg(long)]
    pub today: Option<String>,
}

pub fn add_birthday(ctx: &mut Context<'_>, args: BirthdayArgs) -> Result<String> {
    let record = ctx.book.find_mut(&args.name)?;
    record.add_birthday(&args.birthday)?;
    let dto = RecordDto::from(&*record);
    ctx.respond("Date of birth added.", &dto)
}

pub fn change_birthday(ctx: &mut Context<'_>, args: BirthdayArgs) -> Result<String> {
    let record = ctx.book.find_mut(&args.name)?;
    record.edit_birthday(&args.birthday)?;
    let dto = RecordDto::from(&*record);
    ctx.respond("Date of birth updated.", &dto)
}

pub fn show_birthday(ctx: &mut Context<'_>, args: NameArgs) -> Result<String> {
    let record = ctx.book.find(&args.name)?;
    let birthday = record.birthday().map(ToString::to_string);
    let text = birthday
        .clone()
        .unwrap_or_else(|| "The contact does not have a date of birth.".to_string());
    ctx.respond(text, &birthday)
}

pub fn upcoming(ctx: &mut Context<'_>, args: UpcomingArgs) -> Result<String> {
    let today = match args.today.as_deref() {
        Some(raw) => parse_day(raw)?,
        None => ctx.today,
    };
    let window = parse_window_days(args.days, ctx.book.congratulation_days())?;
    debug!(%today, window, "computing upcoming birthdays");

    let grouped = ctx.book.upcoming_birthdays_by_days_within(today, window);
    let dtos: Vec<UpcomingBirthdayDto> = grouped
        .iter()
        .map(|(date, records)| UpcomingBirthdayDto {
            congratulation_date: format_day(*date),
            records: records.iter().copied().map(RecordDto::from).collect(),
        })
        .collect();

    let text = if grouped.is_empty() {
        "There are currently no upcoming birthdays.".to_string()
    } else {
        let mut lines = Vec::new();
        for (date, records) in &grouped {
            lines.push("---".to_string());
            lines.push(format_day(*date));
            lines.push(render_records(records.iter().copied()));
        }
        lines.push("---".to_string());
        lines.join("\n")
    };
    ctx.respond(text, &dtos)
}
