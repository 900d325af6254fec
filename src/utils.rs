use std::time::Duration;

use rand::Rng;

/// Calculate exponential backoff with jitter
/// delay = base * 2^attempt, capped at `max_delay_ms`, then ±25% jitter
pub fn calculate_backoff_with_jitter(
    attempt: usize,
    base_delay_ms: u64,
    max_delay_ms: u64,
) -> Duration {
    let exponential_delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt as u32));

    // Cap at max delay
    let capped_delay = exponential_delay.min(max_delay_ms);

    let mut rng = rand::rng();
    let jitter_range = (capped_delay as f64 * 0.25) as u64;
    let jitter = rng.random_range(0..=jitter_range * 2);
    let final_delay = capped_delay.saturating_add(jitter).saturating_sub(jitter_range);

    Duration::from_millis(final_delay)
}

/// First and last characters of an address or hash, for log lines.
pub fn shorten(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 18 {
        return value.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{}...{}", head, tail)
}
