use crate::error::CoreError;

pub const DEFAULT_WINDOW_DAYS: u32 = 7;
pub const MAX_WINDOW_DAYS: u32 = 365;

pub fn validate_window_days(days: i64) -> Result<u32, CoreError> {
    if days < 1 || days > i64::from(MAX_WINDOW_DAYS) {
        return Err(CoreError::InvalidWindowDays(days));
    }
    u32::try_from(days).map_err(|_| CoreError::InvalidWindowDays(days))
}
