use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const FLOATING_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Source of "now" for due-date arithmetic.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A frozen instant, used by tests and for reproducible exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self(now)
    }
}

impl From<DateTime<Utc>> for FixedClock {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.fixed_offset())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// A parsed due moment. Values without an offset are wall-clock times and
/// are compared against the clock's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueInstant {
    Zoned(DateTime<FixedOffset>),
    Floating(NaiveDateTime),
}

impl DueInstant {
    /// Whole days from `now` until this instant, rounded toward negative infinity.
    pub fn days_from(&self, now: DateTime<FixedOffset>) -> i64 {
        let delta = match self {
            DueInstant::Zoned(due) => *due - now.with_timezone(due.offset()),
            DueInstant::Floating(due) => *due - now.naive_local(),
        };
        floor_days(delta)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDate {
    Missing,
    Unparseable(String),
    Parsed(DueInstant),
}

impl DueDate {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return DueDate::Missing;
        };
        match parse_instant(raw) {
            Some(instant) => DueDate::Parsed(instant),
            None => DueDate::Unparseable(raw.to_string()),
        }
    }

    /// `None` for both missing and malformed dates.
    pub fn days_until(&self, now: DateTime<FixedOffset>) -> Option<i64> {
        match self {
            DueDate::Parsed(instant) => Some(instant.days_from(now)),
            DueDate::Missing | DueDate::Unparseable(_) => None,
        }
    }
}

pub fn days_until_due<C: Clock + ?Sized>(due_date: Option<&str>, clock: &C) -> Option<i64> {
    DueDate::parse(due_date).days_until(clock.now())
}

fn parse_instant(raw: &str) -> Option<DueInstant> {
    let normalized = normalize_iso(raw);

    if let Ok(due) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(DueInstant::Zoned(due));
    }
    for fmt in ZONED_FORMATS {
        if let Ok(due) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(DueInstant::Zoned(due));
        }
    }
    for fmt in FLOATING_FORMATS {
        if let Ok(due) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(DueInstant::Floating(due));
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .map(|date| DueInstant::Floating(date.and_time(NaiveTime::MIN)))
}

/// Rewrites the ISO-8601 shorthands into the extended form chrono parses:
/// `Z` becomes `+00:00`, `YYYYMMDD` gains dashes, compact or hour-only times
/// gain colons and minutes, `,` fractions become `.`, and `+HH` / `+HHMM`
/// offsets become `+HH:MM`.
fn normalize_iso(raw: &str) -> String {
    let mut text = match raw.strip_suffix('Z') {
        Some(stem) => format!("{stem}+00:00"),
        None => raw.to_string(),
    };
    if is_basic_date(&text) {
        text = format!("{}-{}-{}{}", &text[..4], &text[4..6], &text[6..8], &text[8..]);
    }

    let Some(sep) = text.get(10..11).filter(|s| *s == "T" || *s == " ") else {
        return text;
    };
    let (date, time) = (&text[..10], &text[11..]);
    let (clock, offset) = match time.rfind(['+', '-']) {
        Some(idx) => time.split_at(idx),
        None => (time, ""),
    };
    format!(
        "{date}{sep}{}{}",
        normalize_clock(clock),
        normalize_offset(offset)
    )
}

fn is_basic_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 8
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes.get(8).is_none_or(|b| *b == b'T' || *b == b' ')
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn normalize_clock(clock: &str) -> String {
    let clock = clock.replace(',', ".");
    let (hms, fraction) = match clock.find('.') {
        Some(idx) => clock.split_at(idx),
        None => (clock.as_str(), ""),
    };
    let hms = if all_digits(hms) {
        match hms.len() {
            2 => format!("{hms}:00"),
            4 => format!("{}:{}", &hms[..2], &hms[2..]),
            6 => format!("{}:{}:{}", &hms[..2], &hms[2..4], &hms[4..]),
            _ => hms.to_string(),
        }
    } else {
        hms.to_string()
    };
    format!("{hms}{fraction}")
}

fn normalize_offset(offset: &str) -> String {
    let Some((sign, digits)) = offset.split_at_checked(1) else {
        return offset.to_string();
    };
    if !all_digits(digits) {
        return offset.to_string();
    }
    match digits.len() {
        2 => format!("{sign}{digits}:00"),
        4 => format!("{sign}{}:{}", &digits[..2], &digits[2..]),
        _ => offset.to_string(),
    }
}

fn floor_days(delta: TimeDelta) -> i64 {
    // num_days truncates toward zero
    let days = delta.num_days();
    if delta < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}
