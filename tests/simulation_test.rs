use bevy::prelude::*;
use forage_sim::config::*;
use forage_sim::{
    Arena, ArenaBounds, EndReason, Food, MoveOutcome, Particle, Phase, SimulationSettings,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

fn settings(steps: u32, cycles: u32) -> SimulationSettings {
    SimulationSettings {
        steps_per_cycle: steps,
        particle_count: 1,
        food_count: 1,
        max_cycles: cycles,
        seed: Some(2024),
    }
}

fn staged_arena(steps: u32, cycles: u32, particles: Vec<Particle>, food: Vec<Food>) -> Arena {
    let mut arena = Arena::with_population(
        &settings(steps, cycles),
        ArenaBounds::default(),
        particles,
        food,
        StdRng::seed_from_u64(2024),
    );
    arena.start();
    arena
}

#[test]
fn particle_on_top_of_food_eats_it_in_one_tick() {
    let particle = Particle::new(1, Vec2::new(100.0, 100.0), 5);
    let mut arena = staged_arena(5, 3, vec![particle], vec![Food::new(100.0, 100.5)]);

    let report = arena.advance(1000);

    let eater = &arena.particles()[0];
    assert_eq!(eater.eaten_count, 1);
    assert_eq!(eater.position, Vec2::new(100.0, 100.5));
    assert_eq!(eater.steps_remaining, 5);
    assert!(arena.food().is_empty());
    assert_eq!(report.moves, vec![(1, MoveOutcome::Contact { food: 0 })]);
    assert_eq!(report.meals.len(), 1);
}

#[test]
fn equidistant_food_picks_the_first_inserted() {
    let particle = Particle::new(1, Vec2::new(200.0, 200.0), 5);
    let food = vec![Food::new(230.0, 200.0), Food::new(170.0, 200.0)];
    let mut arena = staged_arena(5, 3, vec![particle], food);

    arena.advance(1000);

    assert_eq!(arena.particles()[0].position, Vec2::new(220.0, 200.0));
    assert_eq!(arena.food().len(), 2);
}

#[test]
fn second_meal_halves_the_move_interval() {
    let particle = Particle::new(1, Vec2::new(100.0, 100.0), 5);
    let food = vec![Food::new(100.0, 103.0), Food::new(100.0, 106.0)];
    let mut arena = staged_arena(5, 3, vec![particle], food);

    let report = arena.advance(1000);

    let eater = &arena.particles()[0];
    assert_eq!(eater.eaten_count, 2);
    assert_eq!(eater.move_interval_ms, DEFAULT_MOVE_INTERVAL_MS / 2);
    assert_eq!(
        report.meals.iter().map(|m| m.sped_up).collect::<Vec<_>>(),
        vec![false, true]
    );

    // The faster cadence applies from the next tick on
    assert!(arena.advance(1499).moves.is_empty());
    assert_eq!(arena.advance(1500).moves.len(), 1);
}

#[test]
fn survivors_respawn_on_the_boundary_in_the_next_cycle() {
    let particles = vec![
        Particle::new(1, Vec2::new(100.0, 100.0), 1),
        Particle::new(2, Vec2::new(300.0, 300.0), 1),
        Particle::new(3, Vec2::new(100.0, 400.0), 1),
    ];
    let food = vec![
        Food::new(100.0, 105.0),
        Food::new(300.0, 305.0),
        Food::new(105.0, 400.0),
        Food::new(450.0, 120.0),
    ];
    let mut arena = staged_arena(1, 3, particles, food);

    let report = arena.advance(1000);

    assert_eq!(report.new_cycle, Some(2));
    assert_eq!(arena.cycle(), 2);
    assert_eq!(arena.phase(), Phase::Running);
    assert_eq!(arena.food().len(), 1);

    let next = arena.particles();
    assert_eq!(next.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    for (i, a) in next.iter().enumerate() {
        assert!(arena.bounds().on_edge(a.position));
        assert_eq!(a.steps_remaining, 1);
        assert_eq!(a.eaten_count, 0);
        assert_eq!(a.last_move_ms, 1000);
        for b in &next[i + 1..] {
            assert!(a.position.distance(b.position) > RESPAWN_SPACING);
        }
    }
}

#[test]
fn only_particles_that_ate_carry_over() {
    let particles = vec![
        Particle::new(1, Vec2::new(100.0, 100.0), 1),
        Particle::new(2, Vec2::new(300.0, 300.0), 1),
    ];
    let mut arena = staged_arena(1, 3, particles, vec![Food::new(100.0, 105.0)]);

    arena.advance(1000);

    assert_eq!(arena.cycle(), 2);
    assert_eq!(arena.particles().len(), 1);
    assert_eq!(arena.particles()[0].id, 1);
}

#[test]
fn no_survivors_ends_the_simulation_for_good() {
    let particle = Particle::new(1, Vec2::new(250.0, 250.0), 2);
    let mut arena = staged_arena(2, 5, vec![particle], Vec::new());

    let mut finished = None;
    for tick in 1..=200u64 {
        let report = arena.advance(tick * 1000);
        if report.finished.is_some() {
            finished = report.finished;
            break;
        }
    }

    assert_eq!(finished, Some(EndReason::Extinct));
    assert!(arena.is_finished());
    assert!(arena.end_message().is_some());

    let frozen = arena.particles()[0].clone();
    let report = arena.advance(1_000_000);
    assert!(report.moves.is_empty());
    assert_eq!(arena.particles()[0].position, frozen.position);
    assert_eq!(arena.cycle(), 1);
}

#[test]
fn last_cycle_ends_even_with_survivors() {
    let particle = Particle::new(1, Vec2::new(100.0, 100.0), 1);
    let mut arena = staged_arena(1, 1, vec![particle], vec![Food::new(100.0, 105.0)]);

    let report = arena.advance(1000);

    assert_eq!(report.finished, Some(EndReason::CycleLimit));
    assert_eq!(arena.phase(), Phase::Finished(EndReason::CycleLimit));
    assert_eq!(arena.cycle(), 1);
}

#[test]
fn speed_up_is_not_repeated_in_later_cycles() {
    let particle = Particle::new(7, Vec2::new(100.0, 100.0), 1);
    let food = vec![Food::new(100.0, 103.0), Food::new(100.0, 106.0)];
    let mut arena = staged_arena(1, 3, vec![particle], food);

    arena.advance(1000);
    assert_eq!(arena.cycle(), 2);

    let mut child = arena.particles()[0].clone();
    assert_eq!(child.move_interval_ms, 500);
    child.record_meal();
    child.record_meal();
    assert_eq!(child.move_interval_ms, 500);
}

#[test]
fn seeded_runs_are_reproducible_and_keep_invariants() {
    let settings = SimulationSettings {
        steps_per_cycle: 20,
        particle_count: 30,
        food_count: 30,
        max_cycles: 5,
        seed: Some(77),
    };
    let mut first = Arena::new(&settings);
    let mut second = Arena::new(&settings);
    first.start();
    second.start();

    let mut last_steps: HashMap<u32, u32> = HashMap::new();
    for tick in 1..=600u64 {
        let now = tick * 100;
        let report = first.advance(now);
        second.advance(now);

        if report.new_cycle.is_some() {
            last_steps.clear();
        }

        for particle in first.particles() {
            assert!(first.bounds().contains(particle.position));
            assert!(particle.history().len() <= HISTORY_LENGTH);
            assert_eq!(particle.history().last(), Some(particle.position));
            if let Some(previous) = last_steps.insert(particle.id, particle.steps_remaining) {
                assert!(particle.steps_remaining <= previous);
            }
        }

        let a: Vec<Vec2> = first.particles().iter().map(|p| p.position).collect();
        let b: Vec<Vec2> = second.particles().iter().map(|p| p.position).collect();
        assert_eq!(a, b);
        assert_eq!(first.food(), second.food());
        assert_eq!(first.cycle(), second.cycle());
    }
}

#[test]
fn accepted_moves_keep_their_distance() {
    let bounds = ArenaBounds::default();
    let mut rng = StdRng::seed_from_u64(9);
    let neighbours = [
        Vec2::new(200.0, 180.0),
        Vec2::new(220.0, 200.0),
        Vec2::new(180.0, 200.0),
    ];

    for _ in 0..50 {
        let mut particle = Particle::new(1, Vec2::new(200.0, 200.0), 1);
        if let MoveOutcome::Moved { to, .. } = particle.attempt_move(&bounds, &[], &neighbours, &mut rng) {
            assert_eq!(to, Vec2::new(200.0, 220.0));
            assert!(neighbours.iter().all(|n| n.distance(to) >= COLLISION_DISTANCE));
        } else {
            assert_eq!(particle.position, Vec2::new(200.0, 200.0));
        }
    }
}

/// Simulated milliseconds handed to the arena on every frame
#[derive(Resource, Default)]
struct SimClock(u64);

fn advance_arena(mut clock: ResMut<SimClock>, mut arena: ResMut<Arena>) {
    clock.0 += 250;
    arena.advance(clock.0);
}

fn headless_app(arena: Arena) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.init_resource::<SimClock>();
    app.insert_resource(arena);
    app.add_systems(
        Update,
        advance_arena.run_if(|arena: Res<Arena>| arena.phase() == Phase::Running),
    );
    app
}

/// The arena runs as a plain resource inside a headless bevy app
#[test]
fn headless_app_plays_until_extinction() {
    let arena = staged_arena(3, 4, vec![Particle::new(1, Vec2::new(250.0, 250.0), 3)], Vec::new());
    let mut app = headless_app(arena);

    for _ in 0..400 {
        app.update();
        if app.world().resource::<Arena>().is_finished() {
            break;
        }
    }

    let arena = app.world().resource::<Arena>();
    assert_eq!(arena.phase(), Phase::Finished(EndReason::Extinct));
    assert_eq!(arena.particles()[0].steps_remaining, 0);
}

#[test]
fn headless_app_skips_ticks_while_paused() {
    let mut arena = staged_arena(3, 4, vec![Particle::new(1, Vec2::new(250.0, 250.0), 3)], Vec::new());
    arena.toggle_pause();
    let mut app = headless_app(arena);

    for _ in 0..20 {
        app.update();
    }

    let arena = app.world().resource::<Arena>();
    assert_eq!(arena.particles()[0].steps_remaining, 3);
    assert_eq!(app.world().resource::<SimClock>().0, 0);
}
