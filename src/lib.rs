//! Detection-to-track association and smoothing engine.
//!
//! Turns the per-frame output of an external object detector into a stable
//! set of persistent tracked objects for overlay rendering: expire stale
//! tracks, associate detections greedily by class and IoU, smooth boxes and
//! scores with an exponential moving average, merge overlapping duplicates.
//!
//! The tracker is frame-synchronous and single-owner by design; drive it
//! from one logical worker with non-decreasing timestamps.

pub mod bbox;
pub mod config;
pub mod detection;
pub mod error;
pub mod frame;
pub mod object;
pub mod pool;
pub mod track;
pub mod tracker;

mod history;

pub use bbox::BBox;
pub use config::TrackerConfig;
pub use detection::Detection;
pub use frame::Frame;
pub use object::TrackedObject;
pub use track::Track;
pub use tracker::Tracker;

use error::Error;

/// Seam between the frame source and a tracker implementation. The shipped
/// [`Tracker`] does greedy first-match association; an optimal-assignment
/// variant could sit behind the same trait.
pub trait Tracking {
    fn update(&mut self, frame: &Frame) -> Result<(), Error>;
    fn tracks(&self) -> Vec<Track>;
}

impl Tracking for Tracker {
    #[inline]
    fn update(&mut self, frame: &Frame) -> Result<(), Error> {
        self.process(frame.timestamp, &frame.detections)
    }

    #[inline]
    fn tracks(&self) -> Vec<Track> {
        Tracker::tracks(self)
    }
}
