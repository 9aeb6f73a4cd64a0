// pixmill/src/utils/mod.rs

/// Truncating KB conversion used for every size comparison and report field.
pub fn size_kb(bytes: u64) -> u64 {
    bytes / 1024
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = (bytes_f64.log10() / base.log10()).floor() as i32;
    let size = bytes_f64 / base.powi(exponent);

    format!("{:.2} {}", size, UNITS[exponent as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_kb_truncates() {
        assert_eq!(size_kb(0), 0);
        assert_eq!(size_kb(1023), 0);
        assert_eq!(size_kb(1024), 1);
        assert_eq!(size_kb(700 * 1024 + 512), 700);
    }

    #[test]
    fn format_file_size_picks_a_sensible_unit() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.00 B");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }
}
