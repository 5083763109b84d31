//! Cache validity decision.

/// Result of checking a resource's last-fetched timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheValidity {
    /// Cached at the given time and still within the TTL.
    Fresh(i64),
    /// Cached at the given time, but the TTL has passed.
    Expired(i64),
    /// Nothing usable cached.
    NotFound,
}

impl CacheValidity {
    /// Decide whether content cached at `last` is still usable at `now`.
    ///
    /// A missing, zero or negative timestamp is "not cached", never
    /// "cached at time zero". The TTL boundary is inclusive: content is
    /// fresh while `now <= last + ttl`. Without a TTL, cached content
    /// never expires.
    ///
    /// # Example
    ///
    /// ```
    /// use cms_consumer::cache::CacheValidity;
    ///
    /// assert_eq!(CacheValidity::check(Some(100), Some(600), 700), CacheValidity::Fresh(100));
    /// assert_eq!(CacheValidity::check(Some(100), Some(600), 701), CacheValidity::Expired(100));
    /// assert_eq!(CacheValidity::check(Some(0), Some(600), 1), CacheValidity::NotFound);
    /// ```
    pub fn check(last: Option<i64>, ttl_seconds: Option<u64>, now: i64) -> Self {
        let last = match last {
            Some(ts) if ts > 0 => ts,
            _ => return Self::NotFound,
        };

        let ttl = match ttl_seconds {
            Some(ttl) => i64::try_from(ttl).unwrap_or(i64::MAX),
            None => return Self::Fresh(last),
        };

        if now <= last.saturating_add(ttl) {
            Self::Fresh(last)
        } else {
            Self::Expired(last)
        }
    }

    /// True for [`Fresh`](Self::Fresh).
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }

    /// The cached timestamp, if there is one.
    pub fn cached_at(&self) -> Option<i64> {
        match self {
            Self::Fresh(ts) | Self::Expired(ts) => Some(*ts),
            Self::NotFound => None,
        }
    }
}

/// Parse a stored timestamp. Unparseable values count as absent.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Format a number of seconds for display.
pub fn format_duration(seconds: i64) -> String {
    let secs = seconds.max(0);

    if secs >= 86_400 {
        format!("{}d", secs / 86_400)
    } else if secs >= 3_600 {
        format!("{}h", secs / 3_600)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}
