use grove_kernel::World;
use grove_render::Hud;
use grove_render_wgpu::FrameStats;
use grove_tools::{EventTally, GameInspector};

const PANEL_TEXT: egui::Color32 = egui::Color32::WHITE;
const HEALTH_FILL: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);
const BANNER_TEXT: egui::Color32 = egui::Color32::from_rgb(255, 110, 110);

/// Score, counters and health bar in the top-left corner.
pub fn hud(ctx: &egui::Context, hud: &Hud) {
    egui::Area::new(egui::Id::new("hud"))
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                let line = |ui: &mut egui::Ui, text: String| {
                    ui.label(egui::RichText::new(text).color(PANEL_TEXT).size(16.0));
                };
                line(ui, format!("Score: {}", hud.score));
                line(ui, format!("Fruits: {}", hud.fruits));
                line(ui, format!("Enemies defeated: {}", hud.enemies_defeated));
                ui.add(
                    egui::ProgressBar::new(hud.health_percent / 100.0)
                        .desired_width(180.0)
                        .fill(HEALTH_FILL)
                        .text(format!("Health {:.0}%", hud.health_percent)),
                );
            });
        });
}

/// Centred game-over window. Returns true when restart was clicked.
pub fn game_over(ctx: &egui::Context, hud: &Hud) -> bool {
    let Some(line) = hud.final_score_line() else {
        return false;
    };
    let mut restart = false;
    egui::Window::new("Game Over")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(line);
                ui.add_space(8.0);
                restart = ui.button("Restart (R)").clicked();
            });
        });
    restart
}

/// Debug side panel: round summary, nearest enemy, event tally and recent
/// events.
pub fn inspector(
    ctx: &egui::Context,
    world: &World,
    tally: &EventTally,
    recent: &[String],
    stats: FrameStats,
) {
    egui::SidePanel::right("inspector")
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.heading("Inspector");
            ui.separator();
            ui.monospace(GameInspector::summary(world).to_string());
            if let Some((id, distance)) = GameInspector::nearest_enemy(world) {
                ui.label(format!("Nearest enemy {} at {:.1}", id.short(), distance));
            }
            ui.label(format!(
                "Draw calls {} / instances {} / terrain tris {}",
                stats.draw_calls, stats.instances, stats.terrain_triangles
            ));

            ui.separator();
            ui.label("Events");
            ui.monospace(tally.to_string());

            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for line in recent.iter().rev() {
                        ui.monospace(line.as_str());
                    }
                });
        });
}

pub fn error_banner(ctx: &egui::Context, message: &str) {
    egui::TopBottomPanel::top("error_banner").show(ctx, |ui| {
        ui.colored_label(BANNER_TEXT, message);
    });
}

/// One-line hint along the bottom edge.
pub fn controls_hint(ctx: &egui::Context, text: &str) {
    egui::Area::new(egui::Id::new("controls_hint"))
        .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(text).color(PANEL_TEXT).small());
        });
}
