use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<FixedOffset>;

    /// `createdAt` as stored on posts and comments.
    fn created_at(&self) -> String {
        format_created_at(&self.now())
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant. Handy in tests.
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Formats a timestamp the way a Korean-locale date string with a two-digit
/// hour/minute/second time looks: `2024. 1. 5. 오후 03:04:05`.
///
/// The result is a display string. Feeds order by it as a string, so it does not sort
/// chronologically across month or day digit-count boundaries.
pub fn format_created_at<Tz: chrono::TimeZone>(at: &DateTime<Tz>) -> String {
    let (pm, hour) = at.hour12();
    format!(
        "{}. {}. {}. {} {:02}:{:02}:{:02}",
        at.year(),
        at.month(),
        at.day(),
        if pm { "오후" } else { "오전" },
        hour,
        at.minute(),
        at.second()
    )
}
