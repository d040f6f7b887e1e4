pub mod birthday;
pub mod email;
pub mod name;
pub mod phone;
pub mod record;

pub use birthday::{parse_birthday, Birthday, BIRTHDAY_FORMAT};
pub use email::{normalize_email, Email};
pub use name::ContactName;
pub use phone::{normalize_phone, Phone};
pub use record::{Record, RecordNew};
