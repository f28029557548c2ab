use chrono::{DateTime, Duration, NaiveDate, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn is_yesterday_of(candidate: NaiveDate, today: NaiveDate) -> bool {
    candidate + Duration::days(1) == today
}

pub fn elapsed_minutes(since: DateTime<Utc>) -> f64 {
    (Utc::now() - since).num_milliseconds() as f64 / 60_000.0
}
