//! Collision and feeding predicates. Nothing here mutates state; the engine decides what to do
//! with the answers.

use crate::geometry::{in_bounds, Coordinate};
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}

pub fn is_wall_collision(head: Coordinate) -> bool {
    !in_bounds(head)
}

/// `body` is the snake before the move. The tail still counts even though it is about to
/// vacate its cell on a non-growing step.
pub fn is_self_collision(head: Coordinate, body: &Snake) -> bool {
    body.occupies(head)
}

pub fn is_feeding(head: Coordinate, food: Coordinate) -> bool {
    head == food
}

pub fn check_collision(head: Coordinate, body: &Snake) -> Option<CollisionKind> {
    if is_wall_collision(head) {
        Some(CollisionKind::Wall)
    } else if is_self_collision(head, body) {
        Some(CollisionKind::SelfCollision)
    } else {
        None
    }
}
