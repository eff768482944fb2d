mod camera;
mod render;
mod ui;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use camera::setup_camera;
use clap::Parser;
use forage_sim::config::*;
use forage_sim::{Arena, PartialSettings, Phase, SimulationSettings};
use render::draw_arena;
use std::process::ExitCode;
use ui::{handle_keyboard, ui_system};

/// Particles forage for food across cycles; only those that eat carry over.
#[derive(Parser, Debug)]
#[command(name = "forage-sim", version, about)]
struct Cli {
    /// Step budget each particle gets per cycle (1-20). Prompted for if omitted.
    #[arg(long)]
    steps: Option<u32>,
    /// Number of particles (1-30). Prompted for if omitted.
    #[arg(long)]
    particles: Option<u32>,
    /// Number of food items (1-30). Prompted for if omitted.
    #[arg(long)]
    food: Option<u32>,
    /// Maximum number of cycles (1-20). Prompted for if omitted.
    #[arg(long)]
    cycles: Option<u32>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

impl From<Cli> for PartialSettings {
    fn from(cli: Cli) -> Self {
        Self {
            steps_per_cycle: cli.steps,
            particle_count: cli.particles,
            food_count: cli.food,
            max_cycles: cli.cycles,
            seed: cli.seed,
        }
    }
}

/// Counts down once the simulation has finished, then closes the app
#[derive(Resource)]
struct EndTimer(Timer);

fn main() -> ExitCode {
    let partial = PartialSettings::from(Cli::parse());
    let stdin = std::io::stdin();
    let settings = match partial.complete(&mut stdin.lock(), &mut std::io::stdout()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    run(settings);
    ExitCode::SUCCESS
}

fn run(settings: SimulationSettings) {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Foraging Particles".to_string(),
                resolution: (FIELD_WIDTH, FIELD_HEIGHT).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(Arena::new(&settings))
        .insert_resource(EndTimer(Timer::from_seconds(END_MESSAGE_SECONDS, TimerMode::Once)))
        .add_systems(Startup, setup_camera)
        .add_systems(Update, (handle_keyboard, ui_system, draw_arena, close_after_finish))
        .add_systems(
            Update,
            tick_simulation.run_if(|arena: Res<Arena>| arena.phase() == Phase::Running),
        )
        .run();
}

/// System advancing the simulation to the current app time
fn tick_simulation(time: Res<Time>, mut arena: ResMut<Arena>) {
    let now_ms = time.elapsed().as_millis() as u64;
    let report = arena.advance(now_ms);
    if let Some(cycle) = report.new_cycle {
        debug!(cycle, moves = report.moves.len(), "Cycle transition");
    }
}

fn close_after_finish(
    time: Res<Time>,
    arena: Res<Arena>,
    mut timer: ResMut<EndTimer>,
    mut exit: EventWriter<AppExit>,
) {
    if !arena.is_finished() {
        timer.0.reset();
        return;
    }

    if timer.0.tick(time.delta()).just_finished() {
        if let Some(message) = arena.end_message() {
            info!("{}", message);
        }
        exit.send(AppExit::Success);
    }
}
