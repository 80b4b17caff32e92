//! Line-of-sight test between two points through a set of walls.

use crate::constants::guard::{SIGHT_PROBE, SIGHT_STEPS};
use crate::geometry::{Rect, Vec2};

/// Sample small probes along the segment; any probe touching a wall blocks sight.
///
/// The endpoints themselves are not probed, so a target standing flush against
/// a wall can still be seen.
pub fn line_of_sight(from: Vec2, to: Vec2, walls: &[Rect]) -> bool {
    let delta = to - from;
    (1..SIGHT_STEPS).all(|i| {
        let t = i as f32 / SIGHT_STEPS as f32;
        let point = from + delta * t;
        let probe = Rect::new(
            point.x - SIGHT_PROBE / 2.0,
            point.y - SIGHT_PROBE / 2.0,
            SIGHT_PROBE,
            SIGHT_PROBE,
        );
        !walls.iter().any(|w| w.intersects(&probe))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_line() {
        let walls = [Rect::new(0.0, 0.0, 10.0, 10.0)];
        assert!(line_of_sight(
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 100.0),
            &walls
        ));
    }

    #[test]
    fn test_wall_blocks() {
        let walls = [Rect::new(190.0, 0.0, 20.0, 400.0)];
        assert!(!line_of_sight(
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 100.0),
            &walls
        ));
    }

    #[test]
    fn test_symmetric_for_centered_wall() {
        let walls = [Rect::new(190.0, 50.0, 20.0, 100.0)];
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(300.0, 100.0);
        assert_eq!(line_of_sight(a, b, &walls), line_of_sight(b, a, &walls));
    }

    #[test]
    fn test_same_point_is_visible() {
        let walls = [Rect::new(0.0, 0.0, 10.0, 10.0)];
        let p = Vec2::new(50.0, 50.0);
        assert!(line_of_sight(p, p, &walls));
    }
}
