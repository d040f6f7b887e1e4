pub mod book;
pub mod domain;
pub mod dto;
pub mod error;
pub mod rules;
pub mod time;

pub use book::{AddressBook, UpcomingBirthday};
pub use domain::*;
pub use dto::*;
pub use error::{CoreError, CoreErrorKind, Field};
pub use rules::*;
