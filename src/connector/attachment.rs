//! Attachment points on rectangle borders
//!
//! A [`ConnectionPoint`] pairs a point with the outward direction of the
//! border it sits on. Callers build points with [`ConnectionPoint::on_side`]
//! and keep them in sync with their rectangle via [`ConnectionPoint::resync`];
//! the router re-checks them with [`validate`] on every call.

use super::error::AttachmentError;
use super::types::{Point, Rect};

/// Outward direction of a rectangle side, in canvas degrees (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Angle {
    /// 0°, +x
    Right,
    /// 90°, +y
    Down,
    /// 180°, -x
    Left,
    /// -90°, -y
    Up,
}

impl Angle {
    pub const ALL: [Angle; 4] = [Angle::Right, Angle::Down, Angle::Left, Angle::Up];

    pub fn degrees(self) -> i32 {
        match self {
            Angle::Right => 0,
            Angle::Down => 90,
            Angle::Left => 180,
            Angle::Up => -90,
        }
    }

    /// Outward unit normal `(nx, ny)`
    pub fn normal(self) -> (f64, f64) {
        match self {
            Angle::Right => (1.0, 0.0),
            Angle::Left => (-1.0, 0.0),
            Angle::Down => (0.0, 1.0),
            Angle::Up => (0.0, -1.0),
        }
    }

    /// True for left/right sides, where the offset runs along y
    pub fn is_horizontal(self) -> bool {
        matches!(self, Angle::Right | Angle::Left)
    }
}

impl TryFrom<i32> for Angle {
    type Error = AttachmentError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Angle::Right),
            90 => Ok(Angle::Down),
            180 => Ok(Angle::Left),
            -90 => Ok(Angle::Up),
            other => Err(AttachmentError::invalid_angle(other)),
        }
    }
}

impl From<Angle> for i32 {
    fn from(angle: Angle) -> Self {
        angle.degrees()
    }
}

/// A point on a rectangle border plus that border's outward direction
///
/// The angle is kept as raw degrees so that values coming from outside the
/// crate can be represented and rejected by [`validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPoint {
    pub point: Point,
    pub angle: i32,
}

impl ConnectionPoint {
    pub fn new(point: Point, angle: i32) -> Self {
        Self { point, angle }
    }

    /// Build the point on `angle`'s side of `rect`, shifted by `offset` along that side
    pub fn on_side(rect: &Rect, angle: Angle, offset: f64) -> Self {
        let (nx, ny) = angle.normal();
        let c = rect.position;
        let point = if angle.is_horizontal() {
            Point::new(c.x + nx * rect.half_width(), c.y + offset)
        } else {
            Point::new(c.x + offset, c.y + ny * rect.half_height())
        };
        Self::new(point, angle.degrees())
    }

    /// Parsed angle
    pub fn side(&self) -> Result<Angle, AttachmentError> {
        Angle::try_from(self.angle)
    }

    /// Offset of the point along its side, measured from the rect center
    pub fn offset_in(&self, rect: &Rect) -> Result<f64, AttachmentError> {
        let offset = if self.side()?.is_horizontal() {
            self.point.y - rect.position.y
        } else {
            self.point.x - rect.position.x
        };
        Ok(offset)
    }

    /// Rebuild the point after its rect changed from `old` to `new`, keeping the offset
    pub fn resync(&self, old: &Rect, new: &Rect) -> Result<Self, AttachmentError> {
        let offset = self.offset_in(old)?;
        Ok(Self::on_side(new, self.side()?, offset))
    }

    /// Move the point to another side of `rect`, keeping the current offset
    pub fn with_angle(&self, rect: &Rect, angle: Angle) -> Result<Self, AttachmentError> {
        let offset = self.offset_in(rect)?;
        Ok(Self::on_side(rect, angle, offset))
    }
}

/// Legal offset range `(min, max)` for a point on `angle`'s side of `rect`
pub fn offset_bounds(rect: &Rect, angle: Angle) -> (f64, f64) {
    let half = if angle.is_horizontal() {
        rect.half_height()
    } else {
        rect.half_width()
    };
    (-half, half)
}

/// Check that `cp` lies on the border of `rect` selected by its angle and faces outward
pub fn validate(rect: &Rect, cp: &ConnectionPoint, tolerance: f64) -> Result<(), AttachmentError> {
    let angle = cp.side()?;
    let (nx, ny) = angle.normal();

    let Rect { position: c, .. } = *rect;
    let half_w = rect.half_width();
    let half_h = rect.half_height();
    let p = cp.point;

    let border_x = c.x + nx * half_w;
    let border_y = c.y + ny * half_h;

    let on_border = if nx != 0.0 {
        (p.x - border_x).abs() < tolerance
            && p.y >= c.y - half_h - tolerance
            && p.y <= c.y + half_h + tolerance
    } else {
        (p.y - border_y).abs() < tolerance
            && p.x >= c.x - half_w - tolerance
            && p.x <= c.x + half_w + tolerance
    };

    if !on_border {
        return Err(AttachmentError::not_on_border(p, c, cp.angle));
    }

    // Only reachable for rects with negative extents
    let dot = (p.x - c.x) * nx + (p.y - c.y) * ny;
    if dot < -tolerance {
        return Err(AttachmentError::faces_inward(p, c, cp.angle));
    }

    Ok(())
}
