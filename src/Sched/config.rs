use crate::Core::error::ConfigError;

/// Lane count used when none is configured.
pub const DEFAULT_LANES: usize = 3;

/// Conventional lane roles for a three-lane scheduler. Lower index is polled first.
pub const LANE_INTERACTIVE: usize = 0;
pub const LANE_NORMAL: usize = 1;
pub const LANE_BACKGROUND: usize = 2;

/// Construction parameters for a [`LaneScheduler`](super::LaneScheduler).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub lanes: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            lanes: DEFAULT_LANES,
        }
    }
}

impl SchedulerConfig {
    pub fn with_lanes(mut self, lanes: usize) -> Self {
        self.lanes = lanes;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lanes == 0 {
            return Err(ConfigError::NoLanes);
        }
        Ok(())
    }
}
