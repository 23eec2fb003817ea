use std::time::{Duration, Instant};

/// Logs the time spent in one step of a timed sequence and returns the
/// total elapsed so far, to be passed back in for the next step.
pub(crate) fn trace(l_type: &str, l_step: &str, start: Instant, prev_elapsed: Duration) -> Duration {
    let elapsed = start.elapsed();
    log::trace!("{} | Total={:.2?} | {}={:.2?}", l_type, elapsed, l_step, elapsed.saturating_sub(prev_elapsed));
    elapsed
}

pub(crate) fn human_bytes(size: f64) -> String {
    let units = ["", "K", "M", "G", "T"];
    let mut size = size;
    let mut unit = 0;
    while size >= 1000.0 && unit < units.len() - 1 {
        size /= 1000.0;
        unit += 1;
    }
    format!("{:.1}{}", size, units[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_returns_running_total() {
        let start = Instant::now() - Duration::from_millis(20);
        let first = trace("TIME", "step", start, Duration::ZERO);
        assert!(first >= Duration::from_millis(20));
        let second = trace("TIME", "next", start, first);
        assert!(second >= first);
    }

    #[test]
    fn human_readable_counts() {
        assert_eq!(human_bytes(512.0), "512.0");
        assert_eq!(human_bytes(4_200_000.0), "4.2M");
        assert_eq!(human_bytes(3.0e15), "3000.0T");
    }
}
