use crate::ports::outbound::TimeSource;
use shared_types::TimestampMillis;

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> TimestampMillis {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as TimestampMillis)
            .unwrap_or(0)
    }
}

/// Clock pinned to one instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub TimestampMillis);

impl TimeSource for FixedTimeSource {
    fn now_millis(&self) -> TimestampMillis {
        self.0
    }
}
