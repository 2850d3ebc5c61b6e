//! Small calendar and label helpers shared by the chart pipelines

/// Get month abbreviation for a 1-based month number
pub fn month_abbr(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}

/// Format an hour of day in 24-hour notation
pub fn format_hour_24(hour: u32) -> String {
    format!("{:02}:00", hour)
}
