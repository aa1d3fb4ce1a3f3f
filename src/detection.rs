use serde_derive::{Deserialize, Serialize};

use crate::bbox::BBox;

/// One raw detector output: a class label, a confidence in `[0, 1]` and a
/// box in tensor coordinates. Ephemeral, lives for a single frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    pub class: String,
    pub score: f32,
    pub bbox: BBox,
}

impl Detection {
    pub fn new(class: impl Into<String>, score: f32, bbox: BBox) -> Self {
        Self {
            class: class.into(),
            score,
            bbox,
        }
    }

    /// A detection the pipeline is allowed to consume: finite score, finite
    /// box components, non-empty class label.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.score.is_finite() && self.bbox.is_finite() && !self.class.is_empty()
    }
}
