/// Detections scoring below this neither create nor update tracks.
pub const DETECTION_THRESHOLD: f32 = 0.3;

/// Tracks whose smoothed score decays below this are expired.
pub const REMOVAL_THRESHOLD: f32 = 0.1;

/// Raw-box IoU required to match a detection to an existing track.
pub const IOU_THRESHOLD: f32 = 0.5;

/// Smoothed-box IoU above which same-class tracks are merged.
pub const MERGE_THRESHOLD: f32 = 0.4;

/// Weight of history in the exponential moving average; the incoming
/// observation gets the remainder.
pub const SMOOTHING_FACTOR: f32 = 0.7;

/// Seconds a track may go unmatched before it is expired.
pub const MAX_PREDICTION_AGE: f32 = 0.5;

/// Raw detections retained per track.
pub const BUFFER_SIZE: usize = 15;

/// Retired tracks kept around for reuse.
pub const POOL_CAPACITY: usize = 50;

/// Detector output coordinate space.
pub const TENSOR_WIDTH: u32 = 300;
pub const TENSOR_HEIGHT: u32 = 300;

/// Tuning knobs for a [`Tracker`](crate::Tracker). `Default` is the
/// recognized configuration; tests and callers may override individual
/// fields.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub detection_threshold: f32,
    pub removal_threshold: f32,
    pub iou_threshold: f32,
    pub merge_threshold: f32,
    pub smoothing_factor: f32,
    pub max_prediction_age: f32,
    pub buffer_size: usize,
    pub pool_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detection_threshold: DETECTION_THRESHOLD,
            removal_threshold: REMOVAL_THRESHOLD,
            iou_threshold: IOU_THRESHOLD,
            merge_threshold: MERGE_THRESHOLD,
            smoothing_factor: SMOOTHING_FACTOR,
            max_prediction_age: MAX_PREDICTION_AGE,
            buffer_size: BUFFER_SIZE,
            pool_capacity: POOL_CAPACITY,
        }
    }
}
