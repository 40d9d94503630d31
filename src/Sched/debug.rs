use super::LaneScheduler;
use std::fmt;

impl fmt::Debug for LaneScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_lane_scheduler(self, f)
    }
}
