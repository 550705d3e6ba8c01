use parking_lot::Mutex;

use crate::sink::{Fields, MetricPoint, MetricSink, Tags};

/// Buffers every emitted point in memory. Used by tests and by callers that
/// want to inspect a cycle's output before forwarding it.
#[derive(Debug, Default)]
pub struct MemorySink {
    points: Mutex<Vec<MetricPoint>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> Vec<MetricPoint> {
        self.points.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.points.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.lock().is_empty()
    }

    pub fn clear(&self) {
        self.points.lock().clear();
    }
}

impl MetricSink for MemorySink {
    fn emit(&self, measurement: &str, fields: Fields, tags: Tags) {
        let point = MetricPoint {
            measurement: measurement.to_string(),
            fields,
            tags,
        };
        self.points.lock().push(point);
    }
}
