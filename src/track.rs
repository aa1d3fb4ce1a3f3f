use crate::bbox::BBox;
use crate::object::TrackedObject;

/// Per-frame snapshot of one live track, handed to the rendering
/// collaborator. Boxes are in tensor coordinates; mapping to display space
/// is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub track_id: u64,
    pub class: String,
    /// Smoothed confidence.
    pub score: f32,
    /// Latest raw detection box.
    pub bbox: BBox,
    /// Smoothed box, the one to display.
    pub smoothed_bbox: BBox,
    /// Seconds since the last matched update.
    pub time_since_update: f32,
}

impl From<&TrackedObject> for Track {
    fn from(obj: &TrackedObject) -> Track {
        Track {
            track_id: obj.id,
            class: obj.class.clone(),
            score: obj.score,
            bbox: obj.bbox,
            smoothed_bbox: obj.smoothed_bbox,
            time_since_update: obj.time_since_update,
        }
    }
}
