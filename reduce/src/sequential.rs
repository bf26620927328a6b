use crate::{Aggregate, Reducer};

/// Scans the dataset on the calling thread.
///
/// This is the reference strategy: every other [`Reducer`] must produce exactly the same
/// [`Aggregate`] for the same dataset and threshold.
#[derive(Clone, Copy, Debug)]
pub struct Sequential {
    threshold: i32,
}

impl Sequential {
    pub fn new(threshold: i32) -> Self {
        Self { threshold }
    }
}

impl Reducer for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn threshold(&self) -> i32 {
        self.threshold
    }

    fn reduce(&self, values: &[i32]) -> Aggregate {
        Aggregate::scan(values, self.threshold)
    }
}
