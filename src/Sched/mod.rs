pub mod Lanes;
pub mod config;
mod debug;

pub use config::{SchedulerConfig, DEFAULT_LANES, LANE_BACKGROUND, LANE_INTERACTIVE, LANE_NORMAL};
pub use Lanes::LaneScheduler; // re-export for stable path
