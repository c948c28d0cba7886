//! Polygon containment via ray casting

use crate::ZoneError;
use serde::{Deserialize, Serialize};

/// Zone classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// The monitored animal must not enter
    Forbidden,
}

/// A named polygonal region of the camera image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonePolygon {
    /// Zone name (shown in alerts and logs)
    pub name: String,

    /// Polygon vertices in image coordinates [(x, y), ...]
    pub points: Vec<(f32, f32)>,

    /// Overlay color (RGB), used by external renderers
    pub color: [u8; 3],

    /// Zone classification
    #[serde(rename = "type")]
    pub kind: ZoneKind,
}

impl ZonePolygon {
    /// Validate the polygon invariant (at least 3 vertices)
    pub fn validate(&self) -> Result<(), ZoneError> {
        if self.points.len() < 3 {
            return Err(ZoneError::DegeneratePolygon {
                name: self.name.clone(),
                count: self.points.len(),
            });
        }
        Ok(())
    }

    /// Test whether `point` lies inside the polygon.
    ///
    /// Ray casting toward +x: count edge crossings of the horizontal ray
    /// from `point`; an odd count means inside. Horizontal edges have no
    /// defined x-intercept and are skipped entirely. Points exactly on an
    /// edge or vertex are treated as outside.
    pub fn contains(&self, point: (f32, f32)) -> Result<bool, ZoneError> {
        self.validate()?;

        let (px, py) = point;
        let n = self.points.len();

        if self.on_boundary(point) {
            return Ok(false);
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (x1, y1) = self.points[j];
            let (x2, y2) = self.points[i];
            j = i;

            if y1 == y2 {
                continue;
            }

            // Half-open span (min, max] keeps vertex crossings counted once.
            if py > y1.min(y2) && py <= y1.max(y2) {
                let x_intercept = (py - y1) * (x2 - x1) / (y2 - y1) + x1;
                if px <= x_intercept {
                    inside = !inside;
                }
            }
        }

        Ok(inside)
    }

    /// Whether `point` lies exactly on one of the polygon's edges
    fn on_boundary(&self, point: (f32, f32)) -> bool {
        let (px, py) = point;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let (x1, y1) = self.points[j];
            let (x2, y2) = self.points[i];
            j = i;

            let cross = (x2 - x1) * (py - y1) - (y2 - y1) * (px - x1);
            if cross == 0.0
                && px >= x1.min(x2)
                && px <= x1.max(x2)
                && py >= y1.min(y2)
                && py <= y1.max(y2)
            {
                return true;
            }
        }
        false
    }
}
