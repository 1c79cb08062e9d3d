//! Bounding sphere

use crate::core::types::Vec3;

/// Sphere defined by center and radius
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create sphere from center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if two spheres overlap. Touching spheres count as overlapping.
    pub fn intersects(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        reach * reach >= self.center.distance_squared(other.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_spheres_intersect() {
        let claw = Sphere::new(Vec3::new(12.0, 0.0, 0.0), 8.0);
        let cube = Sphere::new(Vec3::ZERO, 4.0);
        assert!(claw.intersects(&cube));
        assert!(cube.intersects(&claw));
    }

    #[test]
    fn test_separated_spheres() {
        let a = Sphere::new(Vec3::new(12.01, 0.0, 0.0), 8.0);
        let b = Sphere::new(Vec3::ZERO, 4.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_diagonal_boundary() {
        // 3-4-12 -> distance 13
        let a = Sphere::new(Vec3::new(3.0, 4.0, 12.0), 9.0);
        let b = Sphere::new(Vec3::ZERO, 4.0);
        assert!(a.intersects(&b));
        let c = Sphere::new(Vec3::new(3.0, 4.0, 12.0), 8.5);
        assert!(!c.intersects(&b));
    }
}
