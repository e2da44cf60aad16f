use rand::Rng;

/// Distance between two neighbouring cells.
pub const STEP: i32 = 2;
/// Largest valid coordinate on either axis.
pub const MAX_COORD: i32 = 98;
/// Number of aligned cells along one axis.
pub const CELLS_PER_AXIS: i32 = MAX_COORD / STEP + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit vector, with `Up` pointing towards smaller `y`.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A cell in percentage space. Valid cells are step-aligned and lie in `[0, MAX_COORD]`,
/// but a coordinate one step past the edge is representable so walls can be detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }

    pub fn moved(&self, direction: Direction) -> Coordinate {
        let (dx, dy) = direction.delta();
        Coordinate {
            x: self.x + dx * step(),
            y: self.y + dy * step(),
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.x.rem_euclid(STEP) == 0 && self.y.rem_euclid(STEP) == 0
    }
}

pub fn step() -> i32 {
    STEP
}

pub fn in_bounds(c: Coordinate) -> bool {
    (0..=MAX_COORD).contains(&c.x) && (0..=MAX_COORD).contains(&c.y)
}

pub fn random_cell(rng: &mut impl Rng) -> Coordinate {
    Coordinate {
        x: rng.gen_range(0..CELLS_PER_AXIS) * STEP,
        y: rng.gen_range(0..CELLS_PER_AXIS) * STEP,
    }
}

/// Every aligned cell on the board, row by row.
pub fn cells() -> impl Iterator<Item = Coordinate> {
    (0..CELLS_PER_AXIS)
        .flat_map(|row| (0..CELLS_PER_AXIS).map(move |col| Coordinate::new(col * STEP, row * STEP)))
}
