use crate::detection::Detection;
use crate::object::TrackedObject;

/// Bounded free list of retired [`TrackedObject`]s. Instances move out on
/// `acquire` and back in on `release`, so a track is never simultaneously
/// pooled and live.
#[derive(Debug)]
pub struct TrackPool {
    free: Vec<TrackedObject>,
    capacity: usize,
}

impl TrackPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Recycle a pooled instance reset to `det`'s values, or allocate a
    /// fresh one. Either way the returned track carries a fresh id.
    pub fn acquire(&mut self, ts: f32, det: &Detection, history_capacity: usize) -> TrackedObject {
        match self.free.pop() {
            Some(mut track) => {
                track.reset(ts, det);
                track
            }
            None => TrackedObject::new(ts, det, history_capacity),
        }
    }

    /// Hand a removed track back for reuse. Discarded once the free list is
    /// at capacity.
    pub fn release(&mut self, track: TrackedObject) {
        if self.free.len() < self.capacity {
            self.free.push(track);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
