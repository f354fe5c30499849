// ui.rs - egui front end for the pattern hunt

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};
use conway::{PATTERNS, PatternClass};
use crate::{LifeInterface, LifeViewer};

const BOARD_PIXELS: f32 = 780.0;

impl eframe::App for LifeViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life - Pattern Hunt");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏭ Step").clicked() {
                    self.is_running = false;
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.hunting = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.is_running = false;
                    self.reseed();
                }

                if ui.button("🔍 Hunt").clicked() {
                    self.hunting = true;
                    self.reseed();
                    self.is_running = true;
                    self.last_update = Instant::now();
                }

                ui.separator();
                ui.label(format!("Trial: {}  Generation: {}", self.trial, self.generation));
            });

            ui.horizontal(|ui| {
                // Class being watched
                ui.label("Watch for:");
                let mut class = self.class;
                egui::ComboBox::from_id_source("class_selector")
                    .selected_text(class.label())
                    .show_ui(ui, |ui| {
                        for option in PatternClass::ALL {
                            ui.selectable_value(&mut class, option, option.label());
                        }
                    });
                if class != self.class {
                    self.set_class(class);
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.hunting = false;
                    self.apply_selected_pattern();
                }
            });

            ui.separator();

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();
            ui.label(self.status.as_str());
            ui.separator();

            // Draw the board, scaled to fit
            let (rows, cols) = (self.grid.height(), self.grid.width());
            let spacing = 0.5;
            let box_size = (BOARD_PIXELS / rows.max(cols) as f32 - spacing).max(1.0);
            let pitch = box_size + spacing;

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(pitch * cols as f32 - spacing, pitch * rows as f32 - spacing);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            for row in 0..rows {
                for col in 0..cols {
                    let x = start_pos.x + col as f32 * pitch;
                    let y = start_pos.y + row as f32 * pitch;
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    let cell_color = if self.grid.get(row, col) {
                        self.live_color
                    } else {
                        self.dead_color
                    };
                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }

            // Clicking toggles a cell (only when paused)
            if !self.is_running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let col = ((pos.x - start_pos.x) / pitch) as usize;
                    let row = ((pos.y - start_pos.y) / pitch) as usize;
                    self.toggle_cell(row, col);
                }
            }

            ui.separator();

            // Statistics
            let live_cells = self.grid.population();
            let area = self.grid.area();
            let tracker = self.tracker();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", area - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / area as f32) * 100.0));
                ui.separator();
                ui.label(format!("Consecutive sightings: {}/{}", tracker.count(), tracker.threshold()));
            });
        });

        // Keep animating while running
        if self.is_running {
            ctx.request_repaint();
        }
    }
}
