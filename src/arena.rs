use crate::config::*;
use crate::food::{Food, scatter_food};
use crate::particle::{MoveOutcome, Particle};
use crate::settings::SimulationSettings;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Axis-aligned rectangle the particles live in (inclusive on every edge)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::new(
            ARENA_MARGIN,
            FIELD_WIDTH - ARENA_MARGIN,
            ARENA_MARGIN,
            FIELD_HEIGHT - ARENA_MARGIN,
        )
    }
}

impl ArenaBounds {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }

    pub fn on_edge(&self, point: Vec2) -> bool {
        self.contains(point)
            && (point.x == self.x_min
                || point.x == self.x_max
                || point.y == self.y_min
                || point.y == self.y_max)
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn random_interior_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.gen_range(self.x_min..=self.x_max),
            rng.gen_range(self.y_min..=self.y_max),
        )
    }

    /// Uniform point on one of the four edges, the edge itself picked uniformly
    pub fn random_edge_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        match rng.gen_range(0..4) {
            0 => Vec2::new(rng.gen_range(self.x_min..=self.x_max), self.y_min),
            1 => Vec2::new(rng.gen_range(self.x_min..=self.x_max), self.y_max),
            2 => Vec2::new(self.x_min, rng.gen_range(self.y_min..=self.y_max)),
            _ => Vec2::new(self.x_max, rng.gen_range(self.y_min..=self.y_max)),
        }
    }
}

/// Why the run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// A cycle ended with nobody having eaten
    Extinct,
    /// Survivors remained but the last cycle was played
    CycleLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Set up, waiting for the start command
    #[default]
    Idle,
    Running,
    Paused,
    Finished(EndReason),
}

/// One food item consumed during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meal {
    pub particle_id: u32,
    pub position: Vec2,
    pub eaten_count: u32,
    pub sped_up: bool,
}

/// Everything that happened during one `advance` call
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickReport {
    pub moves: Vec<(u32, MoveOutcome)>,
    pub meals: Vec<Meal>,
    /// Set to the new cycle number when a cycle transition happened
    pub new_cycle: Option<u32>,
    pub finished: Option<EndReason>,
}

/// Simulation state: bounds, population, food and cycle bookkeeping
#[derive(Resource)]
pub struct Arena {
    bounds: ArenaBounds,
    particles: Vec<Particle>,
    food: Vec<Food>,
    cycle: u32,
    max_cycles: u32,
    steps_per_cycle: u32,
    particle_count: usize,
    phase: Phase,
    show_trails: bool,
    rng: StdRng,
}

impl Arena {
    /// Build an arena from validated settings: particles on the edges, food scattered inside
    pub fn new(settings: &SimulationSettings) -> Self {
        Self::with_bounds(settings, ArenaBounds::default())
    }

    pub fn with_bounds(settings: &SimulationSettings, bounds: ArenaBounds) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let food = scatter_food(&bounds, settings.food_count as usize, &mut rng);

        let mut arena = Self::with_population(settings, bounds, Vec::new(), food, rng);
        arena.particles = arena.place_initial_particles();
        info!(
            particles = arena.particles.len(),
            food = arena.food.len(),
            max_cycles = arena.max_cycles,
            "Arena initialized"
        );
        arena
    }

    /// Arena with a hand-placed population, used by scenarios and tests
    pub fn with_population(
        settings: &SimulationSettings,
        bounds: ArenaBounds,
        particles: Vec<Particle>,
        food: Vec<Food>,
        rng: StdRng,
    ) -> Self {
        Self {
            bounds,
            particle_count: settings.particle_count as usize,
            particles,
            food,
            cycle: 1,
            max_cycles: settings.max_cycles,
            steps_per_cycle: settings.steps_per_cycle,
            phase: Phase::Idle,
            show_trails: true,
            rng,
        }
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn max_cycles(&self) -> u32 {
        self.max_cycles
    }

    pub fn steps_per_cycle(&self) -> u32 {
        self.steps_per_cycle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn show_trails(&self) -> bool {
        self.show_trails
    }

    pub fn end_message(&self) -> Option<String> {
        let Phase::Finished(reason) = self.phase else {
            return None;
        };
        let remaining = self.max_cycles.saturating_sub(self.cycle);
        Some(match reason {
            EndReason::Extinct => format!(
                "No particles left after cycle {} of {}, {} cycles remaining.",
                self.cycle, self.max_cycles, remaining
            ),
            EndReason::CycleLimit => format!(
                "All {} cycles completed with {} survivors.",
                self.max_cycles,
                self.particles.iter().filter(|p| p.is_survivor()).count()
            ),
        })
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
            info!("Simulation started");
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
    }

    /// Fresh particles and cycle counter. The remaining food stays where it is.
    pub fn reset(&mut self) {
        self.particles = self.place_initial_particles();
        self.cycle = 1;
        self.phase = Phase::Idle;
        info!(food = self.food.len(), "Simulation reset");
    }

    pub fn toggle_trails(&mut self) {
        self.show_trails = !self.show_trails;
    }

    /// Advance simulation time to `now_ms`. Does nothing unless running.
    pub fn advance(&mut self, now_ms: u64) -> TickReport {
        let mut report = TickReport::default();
        if self.phase != Phase::Running {
            return report;
        }

        for index in 0..self.particles.len() {
            if !self.particles[index].is_active() || !self.particles[index].ready_to_move(now_ms) {
                continue;
            }

            let neighbours: Vec<Vec2> = self
                .particles
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != index)
                .map(|(_, p)| p.position)
                .collect();

            let particle = &mut self.particles[index];
            let outcome = particle.attempt_move(&self.bounds, &self.food, &neighbours, &mut self.rng);
            particle.last_move_ms = now_ms;
            report.moves.push((particle.id, outcome));

            self.food.retain(|item| {
                if particle.position.distance(item.position) >= EAT_DISTANCE {
                    return true;
                }
                let sped_up = particle.record_meal();
                info!(particle = particle.id, meals = particle.eaten_count, "Particle ate");
                if sped_up {
                    info!(
                        particle = particle.id,
                        interval_ms = particle.move_interval_ms,
                        "Particle sped up"
                    );
                }
                report.meals.push(Meal {
                    particle_id: particle.id,
                    position: item.position,
                    eaten_count: particle.eaten_count,
                    sped_up,
                });
                false
            });
        }

        if self.particles.iter().all(|p| p.steps_remaining == 0) {
            self.finish_cycle(now_ms, &mut report);
        }

        report
    }

    fn finish_cycle(&mut self, now_ms: u64, report: &mut TickReport) {
        let survivors: Vec<&Particle> = self.particles.iter().filter(|p| p.is_survivor()).collect();

        if survivors.is_empty() || self.cycle >= self.max_cycles {
            let reason = if survivors.is_empty() {
                EndReason::Extinct
            } else {
                EndReason::CycleLimit
            };
            self.phase = Phase::Finished(reason);
            report.finished = Some(reason);
            info!(cycle = self.cycle, survivors = survivors.len(), ?reason, "Simulation finished");
            return;
        }

        let mut taken: Vec<Vec2> = Vec::with_capacity(survivors.len());
        let mut next_generation = Vec::with_capacity(survivors.len());
        for survivor in survivors {
            let position = loop {
                let candidate = self.bounds.random_edge_point(&mut self.rng);
                if taken.iter().all(|p| p.distance(candidate) > RESPAWN_SPACING) {
                    break candidate;
                }
            };
            taken.push(position);
            next_generation.push(survivor.offspring(position, self.steps_per_cycle, now_ms));
        }

        self.cycle += 1;
        self.particles = next_generation;
        report.new_cycle = Some(self.cycle);
        info!(
            cycle = self.cycle,
            survivors = self.particles.len(),
            food = self.food.len(),
            "Cycle advanced"
        );
    }

    fn place_initial_particles(&mut self) -> Vec<Particle> {
        let mut taken: Vec<Vec2> = Vec::with_capacity(self.particle_count);

        for id in 1..=self.particle_count as u32 {
            let spaced = (0..INITIAL_PLACEMENT_ATTEMPTS)
                .map(|_| self.bounds.random_edge_point(&mut self.rng))
                .find(|candidate| taken.iter().all(|p| p.distance(*candidate) >= INITIAL_SPACING));

            let position = match spaced {
                Some(position) => position,
                None => {
                    warn!(
                        particle = id,
                        attempts = INITIAL_PLACEMENT_ATTEMPTS,
                        "No spaced edge position found, placing particle anywhere"
                    );
                    self.bounds.random_interior_point(&mut self.rng)
                }
            };
            taken.push(position);
        }

        taken
            .into_iter()
            .zip(1..)
            .map(|(position, id)| Particle::new(id, position, self.steps_per_cycle))
            .collect()
    }
}
