//! `PathBuilder`: an ordered list of points with a running great-circle
//! length.

use sar_core::GeoPoint;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathBuilder {
    points:   Vec<GeoPoint>,
    length_m: f64,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A path consisting of the single point `start`.
    pub fn starting_at(start: GeoPoint) -> Self {
        Self { points: vec![start], length_m: 0.0 }
    }

    pub fn from_points(points: Vec<GeoPoint>) -> Self {
        let length_m = segment_length(&points);
        Self { points, length_m }
    }

    pub fn append_point(&mut self, p: GeoPoint) {
        if let Some(last) = self.points.last() {
            self.length_m += last.distance_m(p);
        }
        self.points.push(p);
    }

    pub fn prepend_point(&mut self, p: GeoPoint) {
        if let Some(first) = self.points.first() {
            self.length_m += p.distance_m(*first);
        }
        self.points.insert(0, p);
    }

    /// Append every point of `other`, joined by a segment from this path's
    /// last point to `other`'s first.
    pub fn append_path(&mut self, other: &PathBuilder) {
        if let (Some(last), Some(first)) = (self.points.last(), other.points.first()) {
            self.length_m += last.distance_m(*first);
        }
        self.length_m += other.length_m;
        self.points.extend_from_slice(&other.points);
    }

    /// Remove and return the point at `index`, or `None` if out of range.
    pub fn remove_point(&mut self, index: usize) -> Option<GeoPoint> {
        if index >= self.points.len() {
            return None;
        }
        let removed = self.points.remove(index);
        self.length_m = segment_length(&self.points);
        Some(removed)
    }

    /// Sum of great-circle segment lengths, metres.
    #[inline]
    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<GeoPoint> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }
}

fn segment_length(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance_m(w[1])).sum()
}
