use chrono::Utc;

/// Millisecond-timestamp ids.
///
/// Two ids issued within the same millisecond would collide, so an id that is
/// not greater than the previous one is bumped to `previous + 1`. Ids stay
/// close to wall-clock time and strictly increase per generator.
#[derive(Debug, Clone, Default)]
pub struct TimestampIds {
    last: i64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start issuing above `floor`, e.g. past the ids of seeded records
    pub fn above(floor: i64) -> Self {
        Self { last: floor }
    }

    pub fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last
    }
}
