use crate::arena::ArenaBounds;
use bevy::prelude::*;
use rand::Rng;

/// A food item. Only ever removed, never moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub position: Vec2,
}

impl Food {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }
}

/// Scatter `count` food items uniformly over the arena interior
pub fn scatter_food<R: Rng + ?Sized>(bounds: &ArenaBounds, count: usize, rng: &mut R) -> Vec<Food> {
    (0..count)
        .map(|_| {
            let point = bounds.random_interior_point(rng);
            Food { position: point }
        })
        .collect()
}
