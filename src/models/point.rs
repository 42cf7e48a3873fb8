/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at parameter `t` along the unit direction towards `other`
    pub fn towards(&self, other: &Point, t: f32) -> Self {
        let length = self.distance(other);
        if length == 0.0 {
            return *self;
        }
        Self {
            x: self.x + (other.x - self.x) / length * t,
            y: self.y + (other.y - self.y) / length * t,
        }
    }
}
