use crate::config::Config;
use crate::motion::Direction;
use crate::surface::SurfaceSize;
use std::collections::VecDeque;

/// Top-left corner of one square cell, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub x: i32,
    pub y: i32,
}

impl Segment {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The snake body. Front is the head.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chain {
    segments: VecDeque<Segment>,
}

impl Chain {
    /// Starting shape: a row along the top edge, spilling down the right
    /// edge when it is longer than the surface is wide. It only depends on
    /// the size and config, so rebuilding always gives the same layout.
    pub fn initialize(size: SurfaceSize, config: &Config) -> Self {
        let t = config.thickness as i64;
        let columns = size.width as i64 / t;
        let mut segments = VecDeque::with_capacity(config.length);
        for i in (0..config.length as i64).rev() {
            let extra = i - columns;
            let seg = if extra > 0 {
                Segment::new((size.width as i64 - t) as i32, (extra * t) as i32)
            } else {
                Segment::new((i * t) as i32, 0)
            };
            segments.push_back(seg);
        }
        Self { segments }
    }

    pub fn head(&self) -> Option<Segment> {
        self.segments.front().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Moves the snake one cell: the tail slot is reused as the new head.
    pub fn advance(&mut self, direction: Direction, thickness: u32) {
        let Some(head) = self.head() else {
            return;
        };
        let (dx, dy) = direction.offset(thickness);
        if let Some(mut tail) = self.segments.pop_back() {
            tail.x = head.x + dx;
            tail.y = head.y + dy;
            self.segments.push_front(tail);
        }
    }
}

impl FromIterator<Segment> for Chain {
    /// Builds a chain head first.
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
