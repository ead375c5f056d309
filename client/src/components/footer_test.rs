use super::*;

#[test]
fn year_from_unix_ms_handles_boundaries() {
    assert_eq!(year_from_unix_ms(0), 1970);
    // 2024-02-29T12:00:00Z
    assert_eq!(year_from_unix_ms(1_709_208_000_000), 2024);
    // 2025-12-31T23:59:59Z
    assert_eq!(year_from_unix_ms(1_767_225_599_000), 2025);
    // 2026-01-01T00:00:00Z
    assert_eq!(year_from_unix_ms(1_767_225_600_000), 2026);
    // 1969-12-31T23:59:59Z
    assert_eq!(year_from_unix_ms(-1000), 1969);
}

#[test]
fn copyright_line_formats_year() {
    assert_eq!(copyright_line(2025), "© 2025 Proforce Galaxies Limited. All rights reserved.");
}
