use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use forage_sim::{Arena, Phase};

/// Keyboard commands: Space pauses, R resets, T toggles trails, Escape quits
pub fn handle_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut arena: ResMut<Arena>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Space) {
        arena.toggle_pause();
    }
    if keys.just_pressed(KeyCode::KeyR) {
        arena.reset();
    }
    if keys.just_pressed(KeyCode::KeyT) {
        arena.toggle_trails();
    }
    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}

pub fn ui_system(mut contexts: EguiContexts, mut arena: ResMut<Arena>) {
    egui::Window::new("Simulation")
        .default_pos(egui::pos2(10.0, 10.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.heading(format!("Cycle: {}/{}", arena.cycle(), arena.max_cycles()));
            ui.label(format!("Food left: {}", arena.food().len()));
            ui.label(format!("Steps per cycle: {}", arena.steps_per_cycle()));

            ui.separator();
            ui.horizontal(|ui| {
                match arena.phase() {
                    Phase::Idle => {
                        if ui.button("▶ Start").clicked() {
                            arena.start();
                        }
                    }
                    Phase::Running => {
                        if ui.button("⏸ Pause").clicked() {
                            arena.toggle_pause();
                        }
                    }
                    Phase::Paused => {
                        if ui.button("▶ Resume").clicked() {
                            arena.toggle_pause();
                        }
                    }
                    Phase::Finished(_) => {}
                }

                if ui.button("Reset").clicked() {
                    arena.reset();
                }

                let mut trails = arena.show_trails();
                if ui.checkbox(&mut trails, "Trails").changed() {
                    arena.toggle_trails();
                }
            });

            if let Some(message) = arena.end_message() {
                ui.separator();
                ui.colored_label(egui::Color32::YELLOW, message);
            }

            ui.separator();
            egui::Grid::new("particles").striped(true).show(ui, |ui| {
                ui.strong("ID");
                ui.strong("Meals");
                ui.strong("Steps");
                ui.strong("Interval");
                ui.end_row();

                for particle in arena.particles() {
                    ui.label(particle.id.to_string());
                    ui.label(particle.eaten_count.to_string());
                    ui.label(particle.steps_remaining.to_string());
                    ui.label(format!("{} ms", particle.move_interval_ms));
                    ui.end_row();
                }
            });

            ui.separator();
            ui.label("Controls:");
            ui.label("• Space - Pause/resume");
            ui.label("• R - Reset particles");
            ui.label("• T - Toggle trails");
            ui.label("• Esc - Quit");
        });
}
