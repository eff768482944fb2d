use bevy::prelude::*;
use forage_sim::ArenaBounds;
use forage_sim::config::{FIELD_HEIGHT, FIELD_WIDTH};

#[derive(Component)]
pub struct MainCamera;

/// Arena coordinates grow downward like screen pixels; bevy's world y grows upward.
pub fn to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

pub fn arena_center(bounds: &ArenaBounds) -> Vec2 {
    to_world(Vec2::new(
        bounds.x_min + bounds.width() / 2.0,
        bounds.y_min + bounds.height() / 2.0,
    ))
}

pub fn setup_camera(mut commands: Commands) {
    // Frame the whole field, margins included
    let center = to_world(Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0));
    commands.spawn((
        Camera2d,
        MainCamera,
        Transform::from_xyz(center.x, center.y, 0.0),
        OrthographicProjection {
            scale: 1.0,
            ..OrthographicProjection::default_2d()
        },
    ));
}
