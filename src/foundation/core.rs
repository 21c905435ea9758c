pub use kurbo::{Affine, Point, Vec2};

/// History states per track in the canonical dataset layout, including the
/// prediction-time state.
pub const NUM_HISTORY_STEPS: usize = 25;

/// Future states per track in the canonical dataset layout.
pub const NUM_FUTURE_STEPS: usize = 25;

/// Farthest known past offset, with offset 0 being prediction time.
pub const MAX_HISTORY_OFFSET: u32 = NUM_HISTORY_STEPS as u32 - 1;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Stable per-scene identifier of one agent track.
pub struct TrackId(pub u32);
