//! Wall clock

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// RNG seed for a new session
pub fn seed() -> u64 {
    now_ms() as u64
}

/// Frame delta clamped to `[0, max_ms]`. The first frame (no previous
/// timestamp) counts as zero.
pub fn frame_delta(last_ms: Option<f64>, now_ms: f64, max_ms: f64) -> f64 {
    match last_ms {
        Some(last) => (now_ms - last).clamp(0.0, max_ms),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_delta() {
        assert_eq!(frame_delta(None, 500.0, 1000.0), 0.0);
        assert_eq!(frame_delta(Some(100.0), 116.5, 1000.0), 16.5);
        // Backgrounded tab: clamp the gap
        assert_eq!(frame_delta(Some(0.0), 60_000.0, 1000.0), 1000.0);
        // Clock went backwards
        assert_eq!(frame_delta(Some(100.0), 50.0, 1000.0), 0.0);
    }

    #[test]
    fn test_now_is_after_2020() {
        assert!(now_ms() > 1.5e12);
    }
}
