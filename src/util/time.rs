/// Get the current time in seconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Get the current time in seconds since page load
#[cfg(target_arch = "wasm32")]
pub fn current_time_secs() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| (perf.time_origin() + perf.now()) / 1000.0)
        .unwrap_or(0.0)
}

/// Milliseconds since the UNIX epoch, used to name saved drawings
pub fn timestamp_millis() -> u64 {
    (current_time_secs() * 1000.0) as u64
}

/// File name for a drawing saved at `millis`
pub fn drawing_file_name(millis: u64) -> String {
    format!("drawing-{millis}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawing_file_name() {
        assert_eq!(drawing_file_name(1_700_000_000_123), "drawing-1700000000123.png");
    }

    #[test]
    fn test_timestamp_is_after_2020() {
        assert!(timestamp_millis() > 1_577_836_800_000);
    }
}
