use chrono::{DateTime, FixedOffset, Utc};

fn wib_offset() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap()
}

/// Timestamp as stored in the sheet, in WIB.
pub fn format_timestamp(datetime: DateTime<Utc>) -> String {
    let wib_time = datetime.with_timezone(&wib_offset());
    wib_time.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn format_time(datetime: DateTime<Utc>) -> String {
    let wib_time = datetime.with_timezone(&wib_offset());
    wib_time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_in_wib() {
        let utc = Utc.with_ymd_and_hms(2024, 5, 20, 3, 0, 0).unwrap();
        assert_eq!(format_timestamp(utc), "2024-05-20 10:00:00");
    }

    #[test]
    fn test_format_time_crosses_midnight() {
        let utc = Utc.with_ymd_and_hms(2024, 5, 20, 18, 30, 0).unwrap();
        assert_eq!(format_time(utc), "01:30");
    }
}
