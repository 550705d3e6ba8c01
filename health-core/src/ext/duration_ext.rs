use std::time::Duration;

pub trait IntoDuration {
    fn millis(self) -> Duration;

    fn seconds(self) -> Duration;
}

impl IntoDuration for u64 {
    fn millis(self) -> Duration {
        Duration::from_millis(self)
    }

    fn seconds(self) -> Duration {
        Duration::from_secs(self)
    }
}

pub trait DurationExt {
    fn as_millis_f64(&self) -> f64;
}

impl DurationExt for Duration {
    fn as_millis_f64(&self) -> f64 {
        self.as_secs_f64() * 1000.0
    }
}
