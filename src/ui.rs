// src/ui.rs

use std::ops::RangeInclusive;

use raycast_fov::animator::ViewMode;
use raycast_fov::settings::DisplaySettings;

use crate::rendering_lib::TextLabel;

pub const MAX_RAY_COUNT: usize = 1440;

/// Slider range for the ray count. Widened so a larger configured count is kept, not clamped.
pub fn ray_slider_range(current: usize) -> RangeInclusive<usize> {
    0..=MAX_RAY_COUNT.max(current)
}

/// Requests from the control window that the app applies after the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    SampleScene,
    RandomScene,
}

pub fn build_ui(
    ctx: &egui::Context,
    settings: &mut DisplaySettings,
    view: &mut ViewMode,
    shape_count: usize,
) -> Option<UiAction> {
    let mut action = None;
    egui::Window::new("Ray Cast")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                egui::ComboBox::from_label("View")
                    .selected_text(view.label())
                    .show_ui(ui, |ui| {
                        for mode in ViewMode::ALL {
                            ui.selectable_value(view, mode, mode.label());
                        }
                    });
                let range = ray_slider_range(settings.ray_count);
                ui.add(egui::Slider::new(&mut settings.ray_count, range).text("Rays"));
                ui.separator();

                ui.checkbox(&mut settings.show_light_source, "Light source");
                ui.checkbox(&mut settings.show_intersections, "Intersections");
                ui.checkbox(&mut settings.show_sectors, "Sectors");
                ui.checkbox(&mut settings.show_joints, "Shape joints");
                ui.checkbox(&mut settings.show_bounds, "Bounds");
                ui.checkbox(&mut settings.show_fps, "FPS");
                ui.separator();

                ui.label(format!("Shapes: {shape_count}"));
                ui.horizontal(|ui| {
                    if ui.button("Sample shapes").clicked() {
                        action = Some(UiAction::SampleScene);
                    }
                    if ui.button("Random shapes").clicked() {
                        action = Some(UiAction::RandomScene);
                    }
                });
            });
        });
    action
}

/// Paints labels queued by the renderer on egui's background layer, above the scene pass.
pub fn paint_labels(ctx: &egui::Context, labels: &[TextLabel]) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    for label in labels {
        let [r, g, b, a] = label.color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        painter.text(
            egui::pos2(label.position[0], label.position[1]),
            egui::Align2::LEFT_BOTTOM,
            &label.text,
            egui::FontId::proportional(label.size),
            egui::Color32::from_rgba_unmultiplied(r, g, b, a),
        );
    }
}
