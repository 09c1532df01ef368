//! The speed slider and status readout

use crate::config::SpeedConfig;
use crate::orbit::Orrery;

/// Slider state for the global speed factor
#[derive(Debug, Clone)]
pub struct SpeedControl {
    value: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl SpeedControl {
    /// The initial value is kept even when it lies outside the slider range.
    pub fn new(config: &SpeedConfig) -> Self {
        Self {
            value: config.initial,
            min: config.min.min(config.max),
            max: config.max.max(config.min),
            step: config.step,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Take a new slider value and push it into the orrery. Returns whether
    /// the factor changed; unchanged values leave the bodies untouched.
    pub fn submit(&mut self, value: f32, orrery: &mut Orrery) -> bool {
        if value == self.value && value == orrery.speed_factor() {
            return false;
        }
        self.value = value;
        orrery.set_speed_factor(value);
        log::info!("Speed factor set to {:.2}", value);
        true
    }

    /// Draw the slider; applies the factor only on change
    pub fn show(&mut self, ui: &mut egui::Ui, orrery: &mut Orrery) {
        let mut value = self.value;
        let response = ui.add(
            egui::Slider::new(&mut value, self.min..=self.max)
                .step_by(self.step as f64)
                .clamp_to_range(false)
                .text("speed"),
        );
        if response.changed() {
            self.submit(value, orrery);
        }
    }
}

/// Small floating window with the slider and a status line
pub fn draw_controls(ctx: &egui::Context, speed: &mut SpeedControl, orrery: &mut Orrery, fps: f32) {
    egui::Window::new("Orrery")
        .id(egui::Id::new("speed"))
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            speed.show(ui, orrery);
            ui.separator();
            ui.horizontal(|ui| {
                ui.label(format!("Planets: {}", orrery.bodies().len()));
                ui.separator();
                ui.label(format!("Tick: {}", orrery.ticks()));
                ui.separator();
                ui.label(format!("{:.0} fps", fps));
            });
            let factor = orrery.speed_factor();
            if factor == 0.0 {
                ui.label(egui::RichText::new("HALTED").color(egui::Color32::YELLOW));
            } else if factor < 0.0 {
                ui.label(egui::RichText::new("REVERSED").color(egui::Color32::LIGHT_RED));
            }
            ui.label(
                egui::RichText::new("Drag to orbit · scroll to zoom · R resets view")
                    .small()
                    .italics(),
            );
        });
}
