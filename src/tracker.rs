use log::{debug, warn};

use crate::config::TrackerConfig;
use crate::detection::Detection;
use crate::error::Error;
use crate::object::TrackedObject;
use crate::pool::TrackPool;
use crate::track::Track;

/// Per-frame tracking pipeline: expire stale tracks, associate detections,
/// merge duplicates, emit the live set.
///
/// Frame-synchronous and single-owner: one `process` call runs to
/// completion before the next frame is accepted, and consumers only ever
/// observe the live set between calls. Timestamps must be non-decreasing.
pub struct Tracker {
    config: TrackerConfig,
    tracks: Vec<TrackedObject>,
    pool: TrackPool,
    last_timestamp: f32,
    skipped: u64,
}

impl Tracker {
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        let pool = TrackPool::new(config.pool_capacity);

        Self {
            config,
            tracks: Vec::with_capacity(32),
            pool,
            last_timestamp: f32::NEG_INFINITY,
            skipped: 0,
        }
    }

    /// Run one frame through the pipeline. An empty `detections` slice is a
    /// normal frame; expiry and merge still run, so a failed detector call
    /// upstream just ages tracks out.
    pub fn process(&mut self, now: f32, detections: &[Detection]) -> Result<(), Error> {
        if now < self.last_timestamp {
            return Err(Error::TimestampRegression {
                last: self.last_timestamp,
                got: now,
            });
        }
        self.last_timestamp = now;

        self.expire(now);
        self.associate(now, detections);
        self.merge();

        for track in &mut self.tracks {
            track.time_since_update = now - track.last_seen;
        }

        Ok(())
    }

    /// Snapshot of the live set, in creation order.
    pub fn tracks(&self) -> Vec<Track> {
        self.tracks.iter().map(Into::into).collect()
    }

    /// Malformed detections skipped so far.
    #[inline]
    pub fn skipped_detections(&self) -> u64 {
        self.skipped
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn expire(&mut self, now: f32) {
        let mut i = 0;
        while i < self.tracks.len() {
            let stale = self.tracks[i].should_remove(
                now,
                self.config.removal_threshold,
                self.config.max_prediction_age,
            );

            if stale {
                let track = self.tracks.remove(i);
                debug!("track {} expired (score {:.3})", track.id, track.score);
                self.pool.release(track);
            } else {
                i += 1;
            }
        }
    }

    /// Greedy first-match association in detection order. Tracks created
    /// earlier in the same pass are candidates for later detections.
    fn associate(&mut self, now: f32, detections: &[Detection]) {
        for det in detections {
            if !det.is_valid() {
                self.skipped += 1;
                warn!("skipping malformed detection: {:?}", det);
                continue;
            }

            if det.score < self.config.detection_threshold {
                continue;
            }

            let matched = self.tracks.iter_mut().find(|t| {
                t.class == det.class && t.bbox.iou(&det.bbox) > self.config.iou_threshold
            });

            match matched {
                Some(track) => track.update(now, det, self.config.smoothing_factor),
                None => {
                    let track = self.pool.acquire(now, det, self.config.buffer_size);
                    debug!("track {} created for class {:?}", track.id, track.class);
                    self.tracks.push(track);
                }
            }
        }
    }

    /// One pass over the live set. Each unconsumed track anchors a group of
    /// later same-class tracks overlapping its pre-merge smoothed box; the
    /// anchor takes the group's box union and maximum score.
    fn merge(&mut self) {
        let mut i = 0;
        while i < self.tracks.len() {
            let anchor_box = self.tracks[i].smoothed_bbox;
            let mut merged_box = anchor_box;
            let mut merged_score = self.tracks[i].score;
            let mut absorbed = false;

            let mut j = i + 1;
            while j < self.tracks.len() {
                let duplicate = {
                    let cand = &self.tracks[j];
                    cand.class == self.tracks[i].class
                        && anchor_box.iou(&cand.smoothed_bbox) > self.config.merge_threshold
                };

                if duplicate {
                    let track = self.tracks.remove(j);
                    merged_box = merged_box.union(&track.smoothed_bbox);
                    merged_score = merged_score.max(track.score);
                    debug!("track {} merged into {}", track.id, self.tracks[i].id);
                    self.pool.release(track);
                    absorbed = true;
                } else {
                    j += 1;
                }
            }

            if absorbed {
                self.tracks[i].smoothed_bbox = merged_box;
                self.tracks[i].score = merged_score;
            }

            i += 1;
        }
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
