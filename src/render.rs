use crate::camera::{arena_center, to_world};
use bevy::prelude::*;
use forage_sim::Arena;
use forage_sim::config::MARKER_RADIUS;

const ARENA_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
const FOOD_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
const PARTICLE_COLOR: Color = Color::srgb(0.2, 0.4, 1.0);
const SEARCH_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.2);
const TRAIL_COLOR: Color = Color::srgba(0.2, 0.4, 1.0, 0.5);

/// System drawing the arena outline, food, particles, search radii and trails
pub fn draw_arena(arena: Res<Arena>, mut gizmos: Gizmos) {
    let bounds = arena.bounds();
    gizmos.rect_2d(
        arena_center(bounds),
        Vec2::new(bounds.width(), bounds.height()),
        ARENA_COLOR,
    );

    for food in arena.food() {
        gizmos.circle_2d(to_world(food.position), MARKER_RADIUS * 0.5, FOOD_COLOR);
    }

    for particle in arena.particles() {
        let position = to_world(particle.position);
        gizmos.circle_2d(position, particle.search_radius, SEARCH_COLOR);
        gizmos.circle_2d(position, MARKER_RADIUS, PARTICLE_COLOR);

        if arena.show_trails() && particle.history().len() > 1 {
            gizmos.linestrip_2d(particle.history().map(to_world), TRAIL_COLOR);
        }
    }
}
