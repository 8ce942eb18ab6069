use crate::position::Position;
use std::ops::Add;

/// A Rectangle defined by its top left corner, width and height.
#[derive(Copy, Clone, Debug)]
pub struct Rect<T> {
    /// The x coordinate of the top left corner.
    pub x: T,
    /// The y coordinate of the top left corner.
    pub y: T,
    /// The rectangle's width.
    pub width: T,
    /// The rectangle's height.
    pub height: T,
}

impl<T: Copy> Rect<T> {
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T> Rect<T>
where
    T: Add<Output = T> + Copy,
{
    pub fn x_min(&self) -> T {
        self.x
    }

    pub fn x_max(&self) -> T {
        self.x + self.width
    }

    pub fn y_min(&self) -> T {
        self.y
    }

    pub fn y_max(&self) -> T {
        self.y + self.height
    }
}

impl Rect<usize> {
    /// Bounds of a `width` x `height` grid anchored at the origin.
    pub fn of_grid(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn contains(&self, position: &Position) -> bool {
        position.x >= self.x_min()
            && position.x < self.x_max()
            && position.y >= self.y_min()
            && position.y < self.y_max()
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}
