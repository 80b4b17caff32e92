//! Pure movement logic - wall collision and Harbor footing.
//!
//! Algorithm: "move then snap", one axis at a time
//! 1. Shift the body along x; any wall it now overlaps pushes it back to the
//!    wall edge facing the direction of travel
//! 2. Repeat for y
//!
//! Resolving the axes separately lets bodies slide along walls.

use crate::constants::{arena, harbor};
use crate::geometry::{Rect, Vec2};

/// Move `body` by `velocity`, stopping flush against any wall it runs into.
pub fn move_and_collide(body: Rect, velocity: Vec2, walls: &[Rect]) -> Rect {
    let mut rect = body;

    rect.x += velocity.x;
    for wall in walls {
        if rect.intersects(wall) {
            if velocity.x > 0.0 {
                rect.set_right(wall.left());
            } else if velocity.x < 0.0 {
                rect.set_left(wall.right());
            }
        }
    }

    rect.y += velocity.y;
    for wall in walls {
        if rect.intersects(wall) {
            if velocity.y > 0.0 {
                rect.set_bottom(wall.top());
            } else if velocity.y < 0.0 {
                rect.set_top(wall.bottom());
            }
        }
    }

    rect
}

/// Keep a body inside the border walls.
pub fn clamp_to_arena(body: Rect) -> Rect {
    let mut rect = body;
    let b = arena::BORDER;
    if rect.left() < b {
        rect.set_left(b);
    }
    if rect.right() > arena::WIDTH - b {
        rect.set_right(arena::WIDTH - b);
    }
    if rect.top() < b {
        rect.set_top(b);
    }
    if rect.bottom() > arena::HEIGHT - b {
        rect.set_bottom(arena::HEIGHT - b);
    }
    rect
}

/// Where a body stands in the Harbor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Footing {
    /// On the pier or aboard the boat.
    Pier,
    /// On land; the rect may have been nudged south of the shoreline.
    Land(Rect),
    /// Fell in the water and was put back ashore.
    Water(Rect),
}

/// Harbor water rule: the pier and boat are walkable, open water is not.
pub fn harbor_footing(body: Rect) -> Footing {
    if harbor::PIER.intersects(&body) || harbor::BOAT.intersects(&body) {
        return Footing::Pier;
    }
    if body.center().y < harbor::SHORELINE_Y {
        let mut rect = body;
        rect.set_center(harbor::LAND_RESCUE);
        return Footing::Water(rect);
    }
    let mut rect = body;
    if rect.top() < harbor::SHORELINE_Y {
        rect.set_top(harbor::SHORELINE_Y);
    }
    Footing::Land(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Rect {
        Rect::new(100.0, 0.0, 20.0, 200.0)
    }

    #[test]
    fn test_free_move() {
        let body = Rect::new(10.0, 10.0, 22.0, 32.0);
        let moved = move_and_collide(body, Vec2::new(3.0, 2.0), &[wall()]);
        assert_eq!(moved.top_left(), Vec2::new(13.0, 12.0));
    }

    #[test]
    fn test_snap_to_wall_moving_right() {
        let body = Rect::new(75.0, 50.0, 22.0, 32.0);
        let moved = move_and_collide(body, Vec2::new(5.0, 0.0), &[wall()]);
        assert_eq!(moved.right(), 100.0);
    }

    #[test]
    fn test_snap_to_wall_moving_left() {
        let body = Rect::new(122.0, 50.0, 22.0, 32.0);
        let moved = move_and_collide(body, Vec2::new(-5.0, 0.0), &[wall()]);
        assert_eq!(moved.left(), 120.0);
    }

    #[test]
    fn test_slides_along_wall() {
        let body = Rect::new(78.0, 50.0, 22.0, 32.0);
        let moved = move_and_collide(body, Vec2::new(4.0, 3.0), &[wall()]);
        assert_eq!(moved.right(), 100.0);
        assert_eq!(moved.top(), 53.0);
    }

    #[test]
    fn test_clamp_to_arena() {
        let body = Rect::new(5.0, 700.0, 22.0, 32.0);
        let clamped = clamp_to_arena(body);
        assert_eq!(clamped.left(), arena::BORDER);
        assert_eq!(clamped.bottom(), arena::HEIGHT - arena::BORDER);
    }

    #[test]
    fn test_water_resets_to_land() {
        let body = Rect::new(300.0, 100.0, 22.0, 32.0);
        match harbor_footing(body) {
            Footing::Water(rect) => assert_eq!(rect.center(), harbor::LAND_RESCUE),
            other => panic!("expected water, got {:?}", other),
        }
    }

    #[test]
    fn test_pier_is_walkable() {
        let body = Rect::new(900.0, 190.0, 22.0, 32.0);
        assert_eq!(harbor_footing(body), Footing::Pier);
    }

    #[test]
    fn test_beach_pushed_to_shoreline() {
        // Center just below the shoreline, top edge above it
        let body = Rect::new(300.0, 190.0, 22.0, 32.0);
        match harbor_footing(body) {
            Footing::Land(rect) => assert_eq!(rect.top(), harbor::SHORELINE_Y),
            other => panic!("expected land, got {:?}", other),
        }
    }
}
