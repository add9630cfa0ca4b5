//! Inclusive calendar-day ranges turned into timestamp bounds.

use chrono::{DateTime, Days, NaiveDate, Utc};

use relief_core::error::AppError;

/// Convert an inclusive `[from, to]` day range into `[start, end)` UTC
/// timestamps. Either side may be open.
pub(crate) fn day_bounds(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), AppError> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::validation(
                "'from' date must not be after 'to' date",
            ));
        }
    }

    let start = from.and_then(|d| d.and_hms_opt(0, 0, 0)).map(|d| d.and_utc());
    let end = to
        .and_then(|d| d.checked_add_days(Days::new(1)))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc());
    Ok((start, end))
}
