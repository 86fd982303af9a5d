//! Bot resistance for the contact wizard: honeypot, minimum dwell time and a
//! per-browser cooldown between submissions.

use log::warn;
use web_sys::window;

/// Submissions faster than this after opening the wizard are dropped silently.
pub const MIN_DWELL_MS: i64 = 3_000;
/// Time a browser has to wait between two successful submissions.
pub const SUBMISSION_COOLDOWN_MS: i64 = 60_000;
/// localStorage key holding the epoch millis of the last successful submission.
pub const LAST_SUBMISSION_KEY: &str = "lastSubmissionTime";
/// DOM name of the hidden decoy input.
pub const HONEYPOT_FIELD: &str = "website_url_check";

pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// String key-value slot that survives page reloads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// `window.localStorage`. Missing storage reads as empty and drops writes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(key).ok()).flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    warn!("Could not write {} to localStorage", key);
                }
            }
            None => warn!("localStorage unavailable, {} not persisted", key),
        }
    }
}

/// Anti-spam state of one wizard session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AntiSpam {
    pub honeypot: String,
    pub opened_at_ms: i64,
}

impl AntiSpam {
    pub fn new(opened_at_ms: i64) -> Self {
        Self {
            honeypot: String::new(),
            opened_at_ms,
        }
    }

    pub fn honeypot_filled(&self) -> bool {
        !self.honeypot.is_empty()
    }

    pub fn too_fast(&self, now_ms: i64) -> bool {
        now_ms - self.opened_at_ms < MIN_DWELL_MS
    }
}

/// Milliseconds left before this browser may submit again, if any.
///
/// Only the leading integer of the stored value is read, so `"123.5"` and
/// `"123abc"` count as 123. A value without one never blocks.
pub fn cooldown_remaining_ms(store: &dyn KeyValueStore, now_ms: i64) -> Option<i64> {
    let last = leading_int(&store.get(LAST_SUBMISSION_KEY)?)?;
    let elapsed = now_ms.saturating_sub(last);
    (elapsed < SUBMISSION_COOLDOWN_MS).then(|| SUBMISSION_COOLDOWN_MS.saturating_sub(elapsed))
}

/// Optional sign followed by digits after leading whitespace. Saturates on overflow.
fn leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit);

    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits {
        seen = true;
        let digit = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    seen.then_some(value)
}

pub fn record_submission(store: &dyn KeyValueStore, now_ms: i64) {
    store.set(LAST_SUBMISSION_KEY, &now_ms.to_string());
}
