use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use http::HeaderMap;

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u32,
}

/// Counter store interface. Callers only see check-and-count, so the
/// in-process table can later be swapped for an external shared store.
pub trait RateLimit: Send + Sync {
    fn check(&self, key: &str) -> RateDecision;
}

struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window counter per client key. The increment-and-compare is
/// one critical section per request, so concurrent bursts on the same
/// key cannot undercount.
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_seconds),
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl RateLimit for FixedWindowLimiter {
    fn check(&self, key: &str) -> RateDecision {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        match entries.get_mut(key) {
            Some(entry) if now < entry.reset_at => {
                if entry.count >= self.max_requests {
                    return RateDecision {
                        allowed: false,
                        remaining: 0,
                    };
                }
                entry.count += 1;
                RateDecision {
                    allowed: true,
                    remaining: self.max_requests - entry.count,
                }
            }
            _ => {
                // New key or expired window: start a fresh window.
                // Expired entries for other keys are purged lazily so
                // the table stays bounded.
                if entries.len() >= 1024 {
                    entries.retain(|_, e| now < e.reset_at);
                }
                entries.insert(
                    key.to_string(),
                    WindowEntry {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                RateDecision {
                    allowed: true,
                    remaining: self.max_requests - 1,
                }
            }
        }
    }
}

/// Client identity for rate limiting: first `x-forwarded-for` entry,
/// then `x-real-ip`, else "unknown".
pub fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_remaining_within_a_window() {
        let limiter = FixedWindowLimiter::new(3, 60);
        assert_eq!(limiter.check("a").remaining, 2);
        assert_eq!(limiter.check("a").remaining, 1);
        assert_eq!(limiter.check("a").remaining, 0);
    }

    #[test]
    fn denies_once_the_window_is_exhausted() {
        let limiter = FixedWindowLimiter::new(2, 60);
        assert!(limiter.check("a").allowed);
        assert!(limiter.check("a").allowed);
        let decision = limiter.check("a");
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn keys_are_tracked_independently() {
        let limiter = FixedWindowLimiter::new(1, 60);
        assert!(limiter.check("a").allowed);
        assert!(limiter.check("b").allowed);
        assert!(!limiter.check("a").allowed);
    }

    #[tokio::test]
    async fn window_resets_after_expiry() {
        let limiter = FixedWindowLimiter::new(1, 0);
        assert!(limiter.check("a").allowed);
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(limiter.check("a").allowed);
    }

    #[test]
    fn concurrent_bursts_never_undercount() {
        use std::sync::Arc;
        let limiter = Arc::new(FixedWindowLimiter::new(50, 60));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || {
                    (0..10).filter(|_| limiter.check("burst").allowed).count()
                })
            })
            .collect();
        let allowed: usize = handles.into_iter().map(|h| h.join().expect("thread")).sum();
        assert_eq!(allowed, 50);
    }

    #[test]
    fn client_key_prefers_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "1.2.3.4, 10.0.0.1".parse().expect("value"));
        headers.insert("x-real-ip", "9.9.9.9".parse().expect("value"));
        assert_eq!(client_key(&headers), "1.2.3.4");
    }

    #[test]
    fn client_key_falls_back_to_real_ip_then_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "9.9.9.9".parse().expect("value"));
        assert_eq!(client_key(&headers), "9.9.9.9");
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
