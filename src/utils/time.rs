use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Normalizes the `datetime-local` input form (`YYYY-MM-DDTHH:MM`) to the
/// backend's `YYYY-MM-DD HH:MM:SS` form: seconds appended, `T` replaced with
/// a space.
pub fn normalize_datetime_input(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let mut out = trimmed.replace('T', " ");
    if out.len() == 16 {
        out.push_str(":00");
    }
    out
}

pub fn format_datetime_input(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

pub fn format_backend_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Backends of different vintages return `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM[:SS]` or a bare date.
pub fn parse_backend_datetime(raw: &str) -> anyhow::Result<NaiveDateTime> {
    let trimmed = raw.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    anyhow::bail!("Unrecognized timestamp: {}", raw)
}
