//! Compact human-readable exposure durations.

/// Format a duration in seconds as `"<h>h<m>m<s>s"`, omitting zero components.
///
/// Each unit is floored independently from an h/m/s decomposition, so
/// 3659 seconds is `"1h59s"`. Zero, negative and non-finite input yields `""`.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    let mut out = String::new();
    for (value, unit) in [(hours, 'h'), (minutes, 'm'), (secs, 's')] {
        if value > 0 {
            out.push_str(&value.to_string());
            out.push(unit);
        }
    }
    out
}

/// Format a total exposure followed by the number of frames that produced it,
/// e.g. `"1h23m45s-20f"`.
pub fn format_duration_with_frames(seconds: f64, frames: u32) -> String {
    format!("{}-{frames}f", format_duration(seconds))
}
