//! Display formatting helpers
//!
//! Everything here is a pure function producing the short suffixed forms the
//! host console expects ("$1.23m", "64GB", "1h 1m 1s"). Non-finite input
//! formats as zero rather than panicking.

/// Format money with a magnitude suffix, e.g. `$1.23m`
pub fn format_money(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs >= 1e15 {
        format!("{sign}${:.decimals$}q", abs / 1e15)
    } else if abs >= 1e12 {
        format!("{sign}${:.decimals$}t", abs / 1e12)
    } else if abs >= 1e9 {
        format!("{sign}${:.decimals$}b", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{sign}${:.decimals$}m", abs / 1e6)
    } else if abs >= 1e3 {
        format!("{sign}${:.decimals$}k", abs / 1e3)
    } else {
        format!("{sign}${abs:.0}")
    }
}

/// Format a money-per-second rate, e.g. `$1.23m/s`
pub fn format_money_rate(rate: f64) -> String {
    format!("{}/s", format_money(rate, 2))
}

/// Format a large number with a magnitude suffix, e.g. `1.23k`
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs >= 1e12 {
        format!("{sign}{:.decimals$}t", abs / 1e12)
    } else if abs >= 1e9 {
        format!("{sign}{:.decimals$}b", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{sign}{:.decimals$}m", abs / 1e6)
    } else if abs >= 1e3 {
        format!("{sign}{:.decimals$}k", abs / 1e3)
    } else {
        format!("{sign}{abs:.decimals$}")
    }
}

/// Format a 0..=1 ratio as a percentage, e.g. `45.6%`
pub fn format_percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    format!("{:.decimals$}%", value * 100.0)
}

/// Format RAM given in GB, e.g. `64GB`, `1.5TB`
pub fn format_ram(gb: f64, decimals: usize) -> String {
    if !gb.is_finite() {
        return "0GB".to_string();
    }

    const TB: f64 = 1024.0;
    const PB: f64 = 1024.0 * 1024.0;

    if gb >= PB {
        format!("{:.decimals$}PB", gb / PB)
    } else if gb >= TB {
        format!("{:.decimals$}TB", gb / TB)
    } else {
        format!("{gb:.decimals$}GB")
    }
}

/// Format milliseconds as a verbose duration, e.g. `1h 1m 1s`
pub fn format_time(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let s = seconds % 60;
    let m = minutes % 60;
    let h = hours % 24;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if h > 0 {
        parts.push(format!("{h}h"));
    }
    if m > 0 {
        parts.push(format!("{m}m"));
    }
    if s > 0 || parts.is_empty() {
        parts.push(format!("{s}s"));
    }

    parts.join(" ")
}

/// Format milliseconds as a clock, e.g. `01:01:01` or `01:30`
pub fn format_time_short(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let s = seconds % 60;
    let m = minutes % 60;
    let h = hours % 24;

    if days > 0 {
        format!("{days}d {h:02}:{m:02}:{s:02}")
    } else if hours > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Format milliseconds-until-event as an ETA, always hours + minutes
pub fn format_eta(ms: u64) -> String {
    let minutes = ms / 60_000;
    let hours = minutes / 60;
    format!("{hours}h {:02}m", minutes % 60)
}

/// Render a text progress bar, e.g. `[████░░░░░░] 40.0%`
pub fn progress_bar(current: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 && current.is_finite() {
        (current / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;

    let mut bar = String::with_capacity(width + 10);
    bar.push('[');
    for i in 0..width {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar.push(']');
    bar.push(' ');
    bar.push_str(&format_percent(ratio, 1));
    bar
}
