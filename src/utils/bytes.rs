/// Human-readable byte sizes for write log lines.
pub fn format_bytes(len: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let len = len as f64;
    if len >= GB {
        format!("{:.1}gb", len / GB)
    } else if len >= MB {
        format!("{:.1}mb", len / MB)
    } else if len >= KB {
        format!("{:.1}kb", len / KB)
    } else {
        format!("{}b", len as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::format_bytes;

    #[test]
    fn formats_each_magnitude() {
        assert_eq!(format_bytes(0), "0b");
        assert_eq!(format_bytes(512), "512b");
        assert_eq!(format_bytes(1536), "1.5kb");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0mb");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0gb");
    }
}
