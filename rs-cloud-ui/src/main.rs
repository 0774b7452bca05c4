use std::time::Duration;

use eframe::{egui, Frame};
use egui::{Align2, Color32, Context, FontId, Sense};
use log::{error, info};

use reqwest::blocking::Client;
use reqwest::Result;

use rs_cloud_core::model::layout::{PositionedGlyph, Viewport};
use rs_cloud_core::model::session::{Generation, Session};
use rs_cloud_core::model::transition::Stage;
use rs_cloud_core::CloudConfig;

const SERVER_URL: &str = "http://127.0.0.1:5000";

/// Canvas background, light grey.
const BACKGROUND: Color32 = Color32::from_rgb(0xe6, 0xe6, 0xe6);

/// REST context holding a reusable blocking HTTP client.
struct RESTContext {
    client: Client,
}

impl RESTContext {
    /// Creates a new REST context with a timeout.
    fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::new(5, 0))
            .build()?;
        Ok(Self { client })
    }

    /// Sends a POST request to `/v1/generate` with the text as body.
    fn post_generate(&self, text: &str) -> Result<Generation> {
        let response = self.client
            .post(format!("{SERVER_URL}/v1/generate"))
            .body(text.to_owned())
            .send()?
            .error_for_status()?;

        response.json()
    }
}

/// Global UI state (MUST persist between frames in egui).
struct CloudUI {
    rest: RESTContext,
    text: String,
    session: Session,
    stage: Stage,
    viewport: Viewport,

    use_server: bool,
    status: Option<String>,
}

impl CloudUI {
    /// Initializes the UI from a configuration.
    fn new(config: &CloudConfig) -> Result<Self> {
        Ok(Self {
            rest: RESTContext::new()?,
            text: String::new(),
            session: Session::with_config(config),
            stage: Stage::new(config.durations),
            viewport: config.viewport,

            use_server: false,
            status: None,
        })
    }

    /// Computes a new layout for the current text, locally or on the server.
    fn fetch_generation(&mut self) -> std::result::Result<Generation, String> {
        if self.use_server {
            return self.rest.post_generate(&self.text).map_err(|e| e.to_string());
        }
        self.session.set_text(self.text.as_str());
        Ok(self.session.generate())
    }

    /// Handles the Generate button: counts, lays out and hands the
    /// glyphs over to the stage for animation.
    fn generate(&mut self, now: f64) {
        match self.fetch_generation() {
            Ok(generation) => {
                let reconciliation = self.stage.apply(&generation.glyphs, now);
                info!(
                    "Revision {}: {} entered, {} updated, {} exited",
                    generation.revision,
                    reconciliation.entered.len(),
                    reconciliation.updated.len(),
                    reconciliation.exited.len()
                );
                self.status = Some(describe(&generation.glyphs));
            }
            Err(e) => {
                error!("Generation failed: {e}");
                self.status = Some(format!("Error: {e}"));
            }
        }
    }

    /// Paints the current animation frame.
    fn paint_cloud(&mut self, ui: &mut egui::Ui, now: f64) {
        let size = egui::vec2(self.viewport.width as f32, self.viewport.height as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, BACKGROUND);

        self.stage.prune(now);
        for glyph in self.stage.sample(now) {
            // Snap to half pixels so animated sizes reuse cached fonts.
            let font_size = (glyph.font_size * 2.0).round() / 2.0;
            if font_size <= 0.0 || glyph.opacity <= 0.0 {
                continue;
            }
            let (x, y) = self.viewport.to_canvas(glyph.x, glyph.y);
            painter.text(
                rect.min + egui::vec2(x as f32, y as f32),
                Align2::CENTER_CENTER,
                &glyph.word,
                FontId::proportional(font_size as f32),
                Color32::BLACK.gamma_multiply(glyph.opacity as f32),
            );
        }
    }
}

/// One-line summary of a layout.
fn describe(glyphs: &[PositionedGlyph]) -> String {
    if glyphs.is_empty() {
        return "No words to display".to_owned();
    }
    glyphs
        .iter()
        .map(|glyph| format!("{} ({})", glyph.word, glyph.count))
        .collect::<Vec<_>>()
        .join(", ")
}

impl eframe::App for CloudUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        let now = ctx.input(|i| i.time);
        let width = self.viewport.width as f32;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.text)
                        .hint_text("Paste your text here...")
                        .desired_width(width)
                        .desired_rows(8),
                );

                ui.add_space(10.0);
                if ui
                    .add_sized([width, 40.0], egui::Button::new("Generate WordCloud"))
                    .clicked()
                {
                    self.generate(now);
                }

                ui.horizontal(|ui| {
                    ui.checkbox(&mut self.use_server, "Use server");
                    match &self.status {
                        Some(status) => ui.label(status),
                        None => ui.label("Click Generate to start"),
                    };
                });

                ui.add_space(10.0);
                self.paint_cloud(ui, now);
            });
        });

        if self.stage.is_animating(now) {
            ctx.request_repaint();
        }
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let config = CloudConfig::from_env().unwrap_or_else(|e| {
        error!("{e}, falling back to defaults");
        CloudConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.viewport.width as f32 + 40.0, config.viewport.height as f32 + 320.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "rs-cloud",
        options,
        Box::new(move |_| Ok(Box::new(CloudUI::new(&config)?))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(word: &str, count: usize) -> PositionedGlyph {
        PositionedGlyph { word: word.into(), count, rank: 0, font_size: 20.0, x: 0.0, y: 0.0 }
    }

    #[test]
    fn test_describe_lists_words() {
        assert_eq!(describe(&[glyph("cats", 3), glyph("run", 1)]), "cats (3), run (1)");
        assert_eq!(describe(&[]), "No words to display");
    }
}
