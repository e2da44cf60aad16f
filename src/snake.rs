use crate::geometry::Coordinate;
use std::collections::VecDeque;

/// Initial snake, tail first.
pub const SEED: [Coordinate; 2] = [Coordinate::new(50, 50), Coordinate::new(52, 50)];

#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    head: Coordinate,
    // Tail at the front, segment behind the head at the back.
    body: VecDeque<Coordinate>,
}

impl Default for Snake {
    fn default() -> Self {
        Self::seed()
    }
}

impl Snake {
    pub fn seed() -> Self {
        let [tail, head] = SEED;
        Snake {
            head,
            body: VecDeque::from([tail]),
        }
    }

    /// Builds a snake from segments listed tail first. Returns `None` for fewer than two.
    pub fn from_segments(segments: &[Coordinate]) -> Option<Self> {
        let (head, body) = segments.split_last()?;
        if body.is_empty() {
            return None;
        }
        Some(Snake {
            head: *head,
            body: body.iter().copied().collect(),
        })
    }

    pub fn head(&self) -> Coordinate {
        self.head
    }

    pub fn tail(&self) -> Coordinate {
        self.body.front().copied().unwrap_or(self.head)
    }

    /// Always at least 2.
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Segments from tail to head.
    pub fn segments(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.body.iter().copied().chain(std::iter::once(self.head))
    }

    pub fn occupies(&self, pos: Coordinate) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Moves the head to `new_head`, keeping the tail when `grow` is set.
    pub fn slither(&mut self, new_head: Coordinate, grow: bool) {
        self.body.push_back(self.head);
        self.head = new_head;

        if !grow {
            self.body.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_snake() {
        let snake = Snake::seed();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Coordinate::new(52, 50));
        assert_eq!(snake.tail(), Coordinate::new(50, 50));
        assert_eq!(snake.segments().collect::<Vec<_>>(), SEED.to_vec());
    }

    #[test]
    fn test_from_segments_requires_two() {
        assert!(Snake::from_segments(&[]).is_none());
        assert!(Snake::from_segments(&[Coordinate::new(0, 0)]).is_none());

        let snake =
            Snake::from_segments(&[Coordinate::new(0, 0), Coordinate::new(2, 0), Coordinate::new(4, 0)])
                .unwrap();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Coordinate::new(4, 0));
        assert_eq!(snake.tail(), Coordinate::new(0, 0));
    }

    #[test]
    fn test_slither_without_growth() {
        let mut snake = Snake::seed();
        snake.slither(Coordinate::new(54, 50), false);

        assert_eq!(snake.len(), 2, "Length remained the same");
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            vec![Coordinate::new(52, 50), Coordinate::new(54, 50)]
        );
        assert!(!snake.occupies(Coordinate::new(50, 50)), "Tail was removed");
    }

    #[test]
    fn test_slither_with_growth() {
        let mut snake = Snake::seed();
        snake.slither(Coordinate::new(54, 50), true);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Coordinate::new(50, 50));
        assert_eq!(snake.head(), Coordinate::new(54, 50));
    }

    #[test]
    fn test_occupies() {
        let snake = Snake::seed();
        assert!(snake.occupies(Coordinate::new(50, 50)));
        assert!(snake.occupies(Coordinate::new(52, 50)));
        assert!(!snake.occupies(Coordinate::new(54, 50)));
    }
}
