pub mod birthdays;
pub mod window;

pub use birthdays::{congratulation_date, next_occurrence, shift_off_weekend};
pub use window::{validate_window_days, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
