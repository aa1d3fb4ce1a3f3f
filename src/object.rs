use std::sync::atomic::{AtomicU64, Ordering};

use crate::bbox::BBox;
use crate::detection::Detection;
use crate::history::HistoryBuffer;

static SEQ_ID: AtomicU64 = AtomicU64::new(1);

#[inline]
fn next_id() -> u64 {
    SEQ_ID.fetch_add(1, Ordering::Relaxed)
}

/// One object persisted across frames. Owned and mutated exclusively by the
/// [`Tracker`](crate::Tracker) holding it; only `id` is immutable for the
/// lifetime of a track incarnation.
#[derive(Debug, Clone)]
pub struct TrackedObject {
    pub id: u64,
    pub class: String,
    /// Exponentially smoothed confidence.
    pub score: f32,
    /// Latest raw detection box, used for matching.
    pub bbox: BBox,
    /// Exponentially smoothed box, used for merging and display.
    pub smoothed_bbox: BBox,
    /// Timestamp of the most recent matched update, in seconds.
    pub last_seen: f32,
    /// Seconds since the last matched update, refreshed once per pipeline
    /// pass.
    pub time_since_update: f32,
    history: HistoryBuffer<Detection>,
}

impl TrackedObject {
    pub fn new(ts: f32, det: &Detection, history_capacity: usize) -> Self {
        let mut history = HistoryBuffer::with_capacity(history_capacity);
        history.push(det.clone());

        Self {
            id: next_id(),
            class: det.class.clone(),
            score: det.score,
            bbox: det.bbox,
            smoothed_bbox: det.bbox,
            last_seen: ts,
            time_since_update: 0.,
            history,
        }
    }

    /// Reinitialize in place from a fresh detection, exactly as `new`
    /// would. Called by the pool on reuse; the recycled track gets a fresh
    /// id.
    pub fn reset(&mut self, ts: f32, det: &Detection) {
        self.id = next_id();
        self.class.clear();
        self.class.push_str(&det.class);
        self.score = det.score;
        self.bbox = det.bbox;
        self.smoothed_bbox = det.bbox;
        self.last_seen = ts;
        self.time_since_update = 0.;
        self.history.clear();
        self.history.push(det.clone());
    }

    /// Fold a matched detection in: plain exponential moving average on the
    /// score and every smoothed box component, raw box stored as-is.
    pub fn update(&mut self, ts: f32, det: &Detection, smoothing: f32) {
        self.last_seen = ts;
        self.history.push(det.clone());

        self.score = self.score * smoothing + det.score * (1.0 - smoothing);
        self.smoothed_bbox = self.smoothed_bbox.lerp(&det.bbox, 1.0 - smoothing);
        self.bbox = det.bbox;
    }

    /// True once the smoothed confidence has decayed below
    /// `removal_threshold` or the track has gone unmatched for longer than
    /// `max_age` seconds.
    #[inline]
    pub fn should_remove(&self, now: f32, removal_threshold: f32, max_age: f32) -> bool {
        self.score < removal_threshold || now - self.last_seen > max_age
    }

    /// Raw detections folded into this track, oldest first.
    #[inline]
    pub fn history(&self) -> impl Iterator<Item = &Detection> {
        self.history.iter()
    }

    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BUFFER_SIZE, SMOOTHING_FACTOR};
    use approx::assert_relative_eq;

    fn person(score: f32, bbox: BBox) -> Detection {
        Detection::new("person", score, bbox)
    }

    #[test]
    fn new_starts_from_the_raw_detection() {
        let det = person(0.9, BBox::ltwh(10., 10., 50., 50.));
        let track = TrackedObject::new(1.0, &det, BUFFER_SIZE);

        assert_eq!(track.class, "person");
        assert_eq!(track.score, 0.9);
        assert_eq!(track.smoothed_bbox, track.bbox);
        assert_eq!(track.history_len(), 1);
        assert_eq!(track.last_seen, 1.0);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let det = person(0.9, BBox::ltwh(0., 0., 10., 10.));
        let a = TrackedObject::new(0., &det, BUFFER_SIZE);
        let b = TrackedObject::new(0., &det, BUFFER_SIZE);
        assert!(b.id > a.id);
    }

    #[test]
    fn update_smooths_box_and_score() {
        let mut track = TrackedObject::new(
            0.,
            &person(0.9, BBox::ltwh(10., 10., 50., 50.)),
            BUFFER_SIZE,
        );

        track.update(
            0.033,
            &person(0.5, BBox::ltwh(12., 10., 50., 50.)),
            SMOOTHING_FACTOR,
        );

        // 70% weight on history, 30% on the new observation
        assert_relative_eq!(track.smoothed_bbox.left(), 10.6, epsilon = 1e-5);
        assert_relative_eq!(track.smoothed_bbox.top(), 10.0, epsilon = 1e-5);
        assert_relative_eq!(track.score, 0.9 * 0.7 + 0.5 * 0.3, epsilon = 1e-5);

        // raw box is stored unsmoothed
        assert_eq!(track.bbox, BBox::ltwh(12., 10., 50., 50.));
        assert_eq!(track.last_seen, 0.033);
    }

    #[test]
    fn history_is_bounded() {
        let det = person(0.9, BBox::ltwh(0., 0., 10., 10.));
        let mut track = TrackedObject::new(0., &det, BUFFER_SIZE);

        for i in 0..BUFFER_SIZE * 2 {
            track.update(i as f32 * 0.033, &det, SMOOTHING_FACTOR);
        }

        assert_eq!(track.history_len(), BUFFER_SIZE);
    }

    #[test]
    fn removal_by_score_decay() {
        let mut track = TrackedObject::new(
            0.,
            &person(0.5, BBox::ltwh(0., 0., 10., 10.)),
            BUFFER_SIZE,
        );

        let mut now = 0.;
        while !track.should_remove(now, 0.1, 0.5) {
            now += 0.033;
            track.update(now, &person(0.0, BBox::ltwh(0., 0., 10., 10.)), 0.7);
        }

        assert!(track.score < 0.1);
    }

    #[test]
    fn removal_by_age() {
        let track = TrackedObject::new(
            0.,
            &person(0.95, BBox::ltwh(0., 0., 10., 10.)),
            BUFFER_SIZE,
        );

        assert!(!track.should_remove(0.5, 0.1, 0.5));
        assert!(track.should_remove(0.51, 0.1, 0.5));
    }

    #[test]
    fn reset_reinitializes_with_a_fresh_id() {
        let mut track = TrackedObject::new(
            0.,
            &person(0.9, BBox::ltwh(0., 0., 10., 10.)),
            BUFFER_SIZE,
        );
        for i in 1..5 {
            track.update(
                i as f32 * 0.033,
                &person(0.9, BBox::ltwh(0., 0., 10., 10.)),
                SMOOTHING_FACTOR,
            );
        }
        let old_id = track.id;

        let det = Detection::new("car", 0.6, BBox::ltwh(100., 100., 40., 40.));
        track.reset(2.0, &det);

        assert_ne!(track.id, old_id);
        assert_eq!(track.class, "car");
        assert_eq!(track.score, 0.6);
        assert_eq!(track.bbox, det.bbox);
        assert_eq!(track.smoothed_bbox, det.bbox);
        assert_eq!(track.history_len(), 1);
        assert_eq!(track.last_seen, 2.0);
        assert_eq!(track.time_since_update, 0.);
    }
}
