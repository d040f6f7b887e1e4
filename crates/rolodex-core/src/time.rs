use chrono::{Local, NaiveDate};

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
