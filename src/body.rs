use std::collections::VecDeque;

use crate::grid::{Cell, Direction};

/// The snake itself: occupied cells ordered head to tail.
///
/// Moving is a push at the front plus a pop at the back, both O(1) on the
/// deque. A pending growth skips exactly one pop.
#[derive(Clone, Debug)]
pub struct Body {
    cells: VecDeque<Cell>,
    grow_pending: bool,
}

impl Body {
    /// Lays `length` cells out horizontally with the head at `head` and the
    /// rest trailing to the left, ready to move right.
    ///
    /// Panics if `length` is zero; an empty snake is never a playable state.
    pub fn new(head: Cell, length: usize) -> Self {
        assert!(length > 0, "snake body needs at least one segment");

        let cells = (0..length)
            .map(|i| Cell::new(head.x - i as i16, head.y))
            .collect();

        Body {
            cells,
            grow_pending: false,
        }
    }

    /// Moves one cell in `direction` and returns the new head.
    pub fn advance(&mut self, direction: Direction) -> Cell {
        let new_head = self.head() + direction;
        self.cells.push_front(new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.cells.pop_back();
        }

        new_head
    }

    pub fn head(&self) -> Cell {
        *self.cells.front().expect("snake body should never be empty")
    }

    /// The segment right behind the head, if the snake has one.
    pub fn neck(&self) -> Option<Cell> {
        self.cells.get(1).copied()
    }

    pub fn request_growth(&mut self) {
        self.grow_pending = true;
    }

    pub fn is_growing(&self) -> bool {
        self.grow_pending
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// True when the head shares a cell with any later segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.cells.iter().skip(1).any(|&segment| segment == head)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
