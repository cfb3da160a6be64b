use crate::chain::Segment;
use crate::surface::SurfaceSize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Pixel offset of one step of `thickness`.
    pub fn offset(self, thickness: u32) -> (i32, i32) {
        let t = thickness as i32;
        match self {
            Direction::Right => (t, 0),
            Direction::Left => (-t, 0),
            Direction::Up => (0, -t),
            Direction::Down => (0, t),
        }
    }
}

/// Direction being applied plus the one waiting to be applied.
///
/// A wall found by `check_walls` only sets `queued`; `commit` moves it into
/// `direction` right before the chain steps. The head therefore sits on the
/// wall cell for one tick before turning, which is what gives the corners
/// their shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionState {
    pub direction: Direction,
    pub queued: Direction,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a turn when `head` touches a wall. Walls are tried in the order
    /// bottom, left, top, right and only the first hit counts.
    pub fn check_walls(&mut self, head: Segment, size: SurfaceSize, thickness: u32) {
        let t = thickness as i32;
        let max_x = size.width as i32 - t;
        let max_y = size.height as i32 - t;

        let turn = if head.y >= max_y && self.free(Direction::Left) {
            Some(Direction::Left)
        } else if head.x <= 0 && self.free(Direction::Up) {
            Some(Direction::Up)
        } else if head.y <= 0 && self.free(Direction::Right) {
            Some(Direction::Right)
        } else if head.x >= max_x && self.free(Direction::Down) {
            Some(Direction::Down)
        } else {
            None
        };

        if let Some(dir) = turn {
            self.queued = dir;
        }
    }

    fn free(&self, dir: Direction) -> bool {
        self.queued != dir && self.direction != dir
    }

    /// Applies the queued direction and returns it.
    pub fn commit(&mut self) -> Direction {
        self.direction = self.queued;
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: SurfaceSize = SurfaceSize::new(100, 50);

    fn at(x: i32, y: i32) -> Segment {
        Segment { x, y }
    }

    #[test]
    fn open_field_keeps_course() {
        let mut m = MotionState::new();
        m.check_walls(at(40, 20), SIZE, 10);
        assert_eq!(m, MotionState::new());
    }

    #[test]
    fn each_wall_queues_the_clockwise_turn() {
        let cases = [
            (Direction::Right, at(90, 0), Direction::Down),
            (Direction::Down, at(90, 40), Direction::Left),
            (Direction::Left, at(0, 40), Direction::Up),
            (Direction::Up, at(0, 0), Direction::Right),
        ];
        for (dir, head, expect) in cases {
            let mut m = MotionState { direction: dir, queued: dir };
            m.check_walls(head, SIZE, 10);
            assert_eq!(m.queued, expect, "heading {dir:?} at {head:?}");
            assert_eq!(m.direction, dir);
        }
    }

    #[test]
    fn bottom_wins_over_right() {
        let mut m = MotionState { direction: Direction::Right, queued: Direction::Right };
        m.check_walls(at(90, 40), SIZE, 10);
        assert_eq!(m.queued, Direction::Left);
    }

    #[test]
    fn guard_skips_to_next_wall() {
        // Already heading left along the bottom: the left wall decides.
        let mut m = MotionState { direction: Direction::Left, queued: Direction::Left };
        m.check_walls(at(0, 40), SIZE, 10);
        assert_eq!(m.queued, Direction::Up);
    }

    #[test]
    fn commit_applies_queue() {
        let mut m = MotionState { direction: Direction::Right, queued: Direction::Down };
        assert_eq!(m.commit(), Direction::Down);
        assert_eq!(m.direction, Direction::Down);
    }
}
