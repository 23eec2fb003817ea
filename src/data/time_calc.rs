use std::time::Duration;

/// Accumulated wall time per pipeline stage.
#[derive(Debug, Default, Clone)]
pub struct TimeCalc {
    runs: u32,
    duration: Vec<Duration>,
}

impl TimeCalc {
    pub fn total(&self) -> Duration {
        self.duration.iter().sum::<Duration>()
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn avg(&self) -> Duration {
        self.total().checked_div(self.runs).unwrap_or_default()
    }

    pub fn avg_i(&self, i: usize) -> Duration {
        self.duration
            .get(i)
            .and_then(|d| d.checked_div(self.runs))
            .unwrap_or_default()
    }

    pub fn ts(&self) -> &[Duration] {
        &self.duration
    }

    pub fn add_or_push(&mut self, i: usize, x: Duration) {
        match self.duration.get_mut(i) {
            Some(elem) => *elem += x,
            None => {
                self.duration.resize(i, Duration::ZERO);
                self.duration.push(x);
            }
        }
    }

    /// Marks the end of one full pass over all stages.
    pub fn finish_run(&mut self) {
        self.runs += 1;
    }
}
