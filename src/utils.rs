/// `m:ss.t` below an hour, `h:mm:ss` above. Negative or non-finite input shows as zero.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let whole = seconds.floor() as u64;
    let (h, m, s) = (whole / 3600, (whole / 60) % 60, whole % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        let tenths = ((seconds - whole as f64) * 10.0).floor() as u64;
        format!("{m}:{s:02}.{tenths}")
    }
}

pub fn format_duration(duration: Option<f64>) -> String {
    duration.map(format_time).unwrap_or_else(|| "--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_short_times() {
        assert_eq!(format_time(0.0), "0:00.0");
        assert_eq!(format_time(10.25), "0:10.2");
        assert_eq!(format_time(75.9), "1:15.9");
    }

    #[test]
    fn formats_long_times() {
        assert_eq!(format_time(3725.0), "1:02:05");
    }

    #[test]
    fn clamps_bad_input() {
        assert_eq!(format_time(-3.0), "0:00.0");
        assert_eq!(format_time(f64::NAN), "0:00.0");
        assert_eq!(format_duration(None), "--:--");
    }
}
