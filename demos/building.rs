//! Synthetic building survey data
//!
//! A 50 x 30 footprint with outer walls, a column grid, a central hall,
//! a stair core and two doors on every storey, topped by a sparser roof.

use pointview_core::{LabeledPoint, LabeledPointCloud, Vector3d};
use rand::Rng;

pub const WALL: &str = "wall";
pub const COLUMN: &str = "column";
pub const HALL: &str = "hall";
pub const STAIRS: &str = "stairs";
pub const DOOR: &str = "door";

pub const STOREY_HEIGHT: f64 = 3.0;

const WIDTH: i32 = 50;
const DEPTH: i32 = 30;
const COLUMN_XS: [i32; 4] = [10, 20, 30, 40];
const COLUMN_YS: [i32; 2] = [10, 20];

/// Building with `storeys` full floors and a roof level above them
pub fn building(storeys: usize) -> LabeledPointCloud {
    let mut points = Vec::new();
    for storey in 0..storeys {
        let z = storey as f64 * STOREY_HEIGHT;
        outline(&mut points, z, 5);
        columns(&mut points, z);
        grid(&mut points, HALL, (15..=35).step_by(5), (15..=25).step_by(5), z);
        grid(&mut points, STAIRS, 45..=47, 5..=7, z);
        points.push(point(25, 0, z, DOOR));
        points.push(point(25, DEPTH, z, DOOR));
    }

    let roof = storeys as f64 * STOREY_HEIGHT;
    outline(&mut points, roof, 10);
    columns(&mut points, roof);
    grid(&mut points, HALL, (20..=30).step_by(5), (15..=25).step_by(5), roof);
    LabeledPointCloud::from_points(points)
}

/// Move every point by a uniform random offset of at most `amount` per axis
pub fn jitter<R: Rng>(points: &mut [LabeledPoint], amount: f64, rng: &mut R) {
    if amount <= 0.0 {
        return;
    }
    for p in points.iter_mut() {
        let offset = Vector3d::new(
            rng.gen_range(-amount..=amount),
            rng.gen_range(-amount..=amount),
            rng.gen_range(-amount..=amount),
        );
        *p = LabeledPoint::from_position(p.position() + offset, p.category());
    }
}

fn outline(points: &mut Vec<LabeledPoint>, z: f64, step: usize) {
    for x in [0, WIDTH] {
        for y in (0..=DEPTH).step_by(step) {
            points.push(point(x, y, z, WALL));
        }
    }
    for y in [0, DEPTH] {
        for x in (0..=WIDTH).step_by(step) {
            points.push(point(x, y, z, WALL));
        }
    }
}

fn columns(points: &mut Vec<LabeledPoint>, z: f64) {
    for x in COLUMN_XS {
        for y in COLUMN_YS {
            points.push(point(x, y, z, COLUMN));
        }
    }
}

fn grid<X, Y>(points: &mut Vec<LabeledPoint>, category: &str, xs: X, ys: Y, z: f64)
where
    X: Iterator<Item = i32>,
    Y: Iterator<Item = i32> + Clone,
{
    for x in xs {
        for y in ys.clone() {
            points.push(point(x, y, z, category));
        }
    }
}

fn point(x: i32, y: i32, z: f64, category: &str) -> LabeledPoint {
    LabeledPoint::new(x as f64, y as f64, z, category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointview_core::{Aabb, Bounded, Point3d};
    use rand::{rngs::StdRng, SeedableRng};

    fn count(cloud: &LabeledPointCloud, category: &str) -> usize {
        cloud.iter().filter(|p| p.category() == category).count()
    }

    #[test]
    fn test_two_storey_building() {
        let points = building(2);

        // 14 + 22 wall points per storey, 8 + 12 on the roof
        assert_eq!(count(&points, WALL), 2 * 36 + 20);
        assert_eq!(count(&points, COLUMN), 3 * 8);
        assert_eq!(count(&points, HALL), 2 * 15 + 9);
        assert_eq!(count(&points, STAIRS), 2 * 9);
        assert_eq!(count(&points, DOOR), 2 * 2);

        assert_eq!(points.categories(), vec![WALL, COLUMN, HALL, STAIRS, DOOR]);
        let bounds: Aabb = points.bounding_box().unwrap();
        assert_eq!(bounds.min, Point3d::origin());
        assert_eq!(bounds.max, Point3d::new(50.0, 30.0, 6.0));
    }

    #[test]
    fn test_jitter_stays_within_amount() {
        let original = building(1);
        let mut jittered = original.clone();
        jitter(&mut jittered.points, 0.25, &mut StdRng::seed_from_u64(7));

        for (a, b) in original.iter().zip(&jittered) {
            assert_eq!(a.category(), b.category());
            assert!((a.position() - b.position()).abs().max() <= 0.25);
        }
    }
}
