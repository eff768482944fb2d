use crate::arena::ArenaBounds;
use crate::config::*;
use crate::food::Food;
use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;

/// Why a candidate move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    OutOfBounds,
    Crowded,
}

/// What happened on a single move attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No steps left, nothing was done
    Exhausted,
    /// Snapped onto the food at this index; the arena resolves the meal
    Contact { food: usize },
    Moved { from: Vec2, to: Vec2 },
    Blocked(BlockReason),
}

/// A foraging particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u32,
    pub position: Vec2,
    pub steps_remaining: u32,
    pub eaten_count: u32,
    pub move_interval_ms: u64,
    pub last_move_ms: u64,
    pub search_radius: f32,
    /// Whether this lineage has already had its speed-up
    pub accelerated: bool,
    history: VecDeque<Vec2>,
}

impl Particle {
    pub fn new(id: u32, position: Vec2, steps: u32) -> Self {
        let mut history = VecDeque::with_capacity(HISTORY_LENGTH + 1);
        history.push_back(position);

        Self {
            id,
            position,
            steps_remaining: steps,
            eaten_count: 0,
            move_interval_ms: DEFAULT_MOVE_INTERVAL_MS,
            last_move_ms: 0,
            search_radius: SEARCH_RADIUS,
            accelerated: false,
            history,
        }
    }

    /// Next generation of this lineage: same id and cadence, fresh budget and counters
    pub fn offspring(&self, position: Vec2, steps: u32, now_ms: u64) -> Self {
        Self {
            move_interval_ms: self.move_interval_ms,
            accelerated: self.accelerated,
            last_move_ms: now_ms,
            ..Particle::new(self.id, position, steps)
        }
    }

    /// Recent positions, oldest first. The last entry is always the current position.
    pub fn history(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.history.iter().copied()
    }

    pub fn is_survivor(&self) -> bool {
        self.eaten_count > 0
    }

    /// Still takes part in ticks: has steps left or has eaten this cycle
    pub fn is_active(&self) -> bool {
        self.steps_remaining > 0 || self.eaten_count > 0
    }

    pub fn ready_to_move(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_move_ms) >= self.move_interval_ms
    }

    /// Count one meal. Returns true if this meal triggered the speed-up.
    pub fn record_meal(&mut self) -> bool {
        self.eaten_count += 1;
        if self.eaten_count == SPEED_UP_MEALS && !self.accelerated {
            self.move_interval_ms = (self.move_interval_ms / 2).max(MIN_MOVE_INTERVAL_MS);
            self.accelerated = true;
            return true;
        }
        false
    }

    /// Index and distance of the nearest food within the search radius.
    /// Equal distances resolve to the lowest index.
    pub fn nearest_food(&self, food: &[Food]) -> Option<(usize, f32)> {
        food.iter()
            .enumerate()
            .map(|(index, item)| (index, self.position.distance(item.position)))
            .filter(|&(_, distance)| distance <= self.search_radius)
            .fold(None, |best, candidate| match best {
                Some((_, best_distance)) if best_distance <= candidate.1 => best,
                _ => Some(candidate),
            })
    }

    /// Try one step: toward the nearest visible food, or in a random direction.
    ///
    /// `neighbours` holds the positions of every other particle in the arena.
    pub fn attempt_move<R: Rng + ?Sized>(
        &mut self,
        bounds: &ArenaBounds,
        food: &[Food],
        neighbours: &[Vec2],
        rng: &mut R,
    ) -> MoveOutcome {
        if self.steps_remaining == 0 {
            return MoveOutcome::Exhausted;
        }

        let delta = match self.nearest_food(food) {
            Some((index, distance)) if distance < CONTACT_DISTANCE => {
                self.position = food[index].position;
                self.push_history();
                return MoveOutcome::Contact { food: index };
            }
            Some((index, distance)) => approach_step(self.position, food[index].position, distance),
            None => random_step(rng),
        };

        let from = self.position;
        let candidate = from + delta;

        let outcome = if !bounds.contains(candidate) {
            MoveOutcome::Blocked(BlockReason::OutOfBounds)
        } else if neighbours
            .iter()
            .any(|other| other.distance(candidate) < COLLISION_DISTANCE)
        {
            self.steps_remaining -= 1;
            MoveOutcome::Blocked(BlockReason::Crowded)
        } else {
            self.position = candidate;
            self.steps_remaining -= 1;
            MoveOutcome::Moved { from, to: candidate }
        };

        self.push_history();
        outcome
    }

    fn push_history(&mut self) {
        self.history.push_back(self.position);
        while self.history.len() > HISTORY_LENGTH {
            self.history.pop_front();
        }
    }
}

/// Orthogonal step toward `target` along whichever axis is further off
fn approach_step(from: Vec2, target: Vec2, distance: f32) -> Vec2 {
    let offset = target - from;
    let step = STEP_SIZE.min(distance);

    if offset.x.abs() > offset.y.abs() {
        Vec2::new(step.copysign(offset.x), 0.0)
    } else {
        Vec2::new(0.0, step.copysign(offset.y))
    }
}

fn random_step<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    match rng.gen_range(0..4) {
        0 => Vec2::new(STEP_SIZE, 0.0),
        1 => Vec2::new(-STEP_SIZE, 0.0),
        2 => Vec2::new(0.0, STEP_SIZE),
        _ => Vec2::new(0.0, -STEP_SIZE),
    }
}
