pub mod benefits;
pub mod memo;
pub mod text;

use chrono::{DateTime, Local, NaiveDate, Utc};

pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Expiry dates are local calendar dates.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
