//! Configuration constants for the foraging simulation

use std::ops::RangeInclusive;

// ============================================================================
// ARENA
// ============================================================================

/// Window width in pixels
pub const FIELD_WIDTH: f32 = 550.0;

/// Window height in pixels
pub const FIELD_HEIGHT: f32 = 550.0;

/// Gap between the window edge and the arena rectangle
pub const ARENA_MARGIN: f32 = 50.0;

// ============================================================================
// PARTICLE MOVEMENT
// ============================================================================

/// Distance covered by a single move attempt
pub const STEP_SIZE: f32 = 20.0;

/// Default radius within which a particle notices food
pub const SEARCH_RADIUS: f32 = 100.0;

/// Below this distance a particle snaps directly onto its target food
pub const CONTACT_DISTANCE: f32 = 1.0;

/// A move is rejected if another particle sits closer than this to the candidate position
pub const COLLISION_DISTANCE: f32 = 10.0;

/// Maximum number of positions kept for trail rendering
pub const HISTORY_LENGTH: usize = 10;

// ============================================================================
// EATING & CADENCE
// ============================================================================

/// A particle eats every food item closer than this after its move
pub const EAT_DISTANCE: f32 = 10.0;

/// Milliseconds between move attempts for a fresh lineage
pub const DEFAULT_MOVE_INTERVAL_MS: u64 = 1000;

/// The speed-up never pushes the move interval below this
pub const MIN_MOVE_INTERVAL_MS: u64 = 200;

/// Meal count at which the one-time speed-up fires
pub const SPEED_UP_MEALS: u32 = 2;

// ============================================================================
// PLACEMENT
// ============================================================================

/// Minimum spacing between particles placed at simulation start
pub const INITIAL_SPACING: f32 = 20.0;

/// Placement attempts per particle at start before falling back to any interior point
pub const INITIAL_PLACEMENT_ATTEMPTS: usize = 100;

/// Spacing between particles respawned at a cycle transition (strictly greater)
pub const RESPAWN_SPACING: f32 = 10.0;

// ============================================================================
// USER PARAMETERS
// ============================================================================

pub const STEPS_PER_CYCLE_RANGE: RangeInclusive<u32> = 1..=20;
pub const PARTICLE_COUNT_RANGE: RangeInclusive<u32> = 1..=30;
pub const FOOD_COUNT_RANGE: RangeInclusive<u32> = 1..=30;
pub const MAX_CYCLES_RANGE: RangeInclusive<u32> = 1..=20;

// ============================================================================
// SHELL
// ============================================================================

/// Seconds the end-of-simulation message stays up before the app closes
pub const END_MESSAGE_SECONDS: f32 = 8.0;

/// Drawn radius of particle and food markers
pub const MARKER_RADIUS: f32 = 10.0;
