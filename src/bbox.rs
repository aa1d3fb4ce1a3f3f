use serde_derive::{Deserialize, Serialize};

/// Axis-aligned box in left-top-width-height order, in the detector's
/// tensor coordinate space.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BBox([f32; 4]);

impl From<[f32; 4]> for BBox {
    #[inline]
    fn from(v: [f32; 4]) -> Self {
        BBox(v)
    }
}

impl From<BBox> for [f32; 4] {
    #[inline]
    fn from(bbox: BBox) -> Self {
        bbox.0
    }
}

impl BBox {
    #[inline]
    pub fn ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        BBox([left, top, width, height])
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32; 4] {
        &self.0
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[0] + self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[1] + self.0[3]
    }

    #[inline(always)]
    pub fn area(&self) -> f32 {
        self.0[2] * self.0[3]
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Intersection over union. Zero when the boxes are disjoint on either
    /// axis or either box has no area.
    pub fn iou(&self, other: &BBox) -> f32 {
        let i_left = self.left().max(other.left());
        let i_top = self.top().max(other.top());
        let i_right = self.right().min(other.right());
        let i_bottom = self.bottom().min(other.bottom());

        let i_area = (i_right - i_left).max(0.) * (i_bottom - i_top).max(0.);
        if i_area == 0. {
            return 0.;
        }

        i_area / (self.area() + other.area() - i_area)
    }

    /// Smallest axis-aligned box containing both inputs.
    pub fn union(&self, other: &BBox) -> BBox {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        BBox([left, top, right - left, bottom - top])
    }

    /// Component-wise interpolation, `factor` weighting `other`.
    #[inline]
    pub fn lerp(&self, other: &BBox, factor: f32) -> BBox {
        let mut out = [0f32; 4];
        for (i, v) in out.iter_mut().enumerate() {
            *v = self.0[i] * (1.0 - factor) + other.0[i] * factor;
        }

        BBox(out)
    }
}
