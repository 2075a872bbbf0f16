//! Interactive lightning bolt viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the growth parameters, the
//! last grown bolt and its animation state, and implements [`eframe::App`]
//! to draw and control them through an egui UI.

use crate::{
    export::{self, ExportError},
    playback::{Playback, Timeline},
    style::{self, Appearance, PIVOT},
};
use bolt_core::{Bolt, Growth, GrowthConfig, GrowthOutcome, SegmentTree};
use eframe::App;
use glam::Vec3;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

/// Frames per second of the strike animation.
const DEFAULT_FPS: f64 = 24.0;

/// Wall time spent growing per frame; at least one iteration always runs.
const GROWTH_FRAME_BUDGET: Duration = Duration::from_millis(12);

/// Main application state for the viewer.
///
/// [`Viewer`] glues together:
/// - The growth parameters ([`GrowthConfig`]) and the last [`Growth`].
/// - Presentation settings ([`Appearance`]) and the strike [`Playback`].
/// - Camera state (zoom, pan, orbit yaw) and the export target.
///
/// The bolt is only regenerated when Apply is pressed. Growth then runs
/// a few iterations per frame (see [`Viewer::grow_for`]) and the previous
/// bolt stays on screen until the new one is finished.
///
/// ### Fields
/// - `cfg` - Growth parameters edited in the side panel.
/// - `appearance` - Thickness, colour, glow, transform and animation toggles.
/// - `fixed_seed` - Reuse `seed` on Apply instead of drawing a new one.
/// - `seed` - Seed of the current bolt, or the one to use next.
///
/// - `growing` - Bolt still being grown, drawn live while in progress.
/// - `growth` - The last successfully grown bolt.
/// - `playback` - Animation state for `growth`.
/// - `status` - Last message shown in the status bar.
///
/// - `zoom` - Pixels per world unit.
/// - `pan` - Screen-space pan offset in pixels.
/// - `yaw` - Orbit angle around the vertical axis, in radians.
///
/// - `export_path` - Where Export writes the segment records.
/// - `last_time` - egui time of the previous frame, for playback.
pub struct Viewer {
    cfg: GrowthConfig,
    appearance: Appearance,
    fixed_seed: bool,
    seed: u64,

    growing: Option<Bolt>,
    growth: Option<Growth>,
    playback: Option<Playback>,
    status: Status,

    zoom: f32,
    pan: egui::Vec2,
    yaw: f32,

    export_path: String,
    last_time: f64,
}

/// Message for the status bar.
#[derive(Clone, Debug, PartialEq)]
enum Status {
    Info(String),
    Error(String),
}

impl Viewer {
    /// Creates a viewer and starts growing a first bolt with default parameters.
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`] ready to be passed to `eframe::run_native`.
    pub fn new() -> Self {
        let mut viewer = Self {
            cfg: GrowthConfig::default(),
            appearance: Appearance::default(),
            fixed_seed: false,
            seed: rand::random(),

            growing: None,
            growth: None,
            playback: None,
            status: Status::Info(String::new()),

            zoom: 8.0,
            pan: egui::vec2(0.0, 0.0),
            yaw: 0.0,

            export_path: "lightning.json".to_owned(),
            last_time: 0.0,
        };
        viewer.apply();
        viewer
    }

    /// Starts growing a new bolt from the current parameters.
    ///
    /// Replaces any bolt still in progress. On a configuration error the
    /// previous bolt is kept and the error is shown in the status bar.
    fn apply(&mut self) {
        let cfg = GrowthConfig {
            seed: self.fixed_seed.then_some(self.seed),
            ..self.cfg.clone()
        };

        match Bolt::new(cfg) {
            Ok(bolt) => {
                self.seed = bolt.seed();
                self.status = Status::Info("growing".to_owned());
                self.growing = Some(bolt);
            }
            Err(err) => {
                tracing::error!(%err, "invalid growth parameters");
                self.status = Status::Error(err.to_string());
            }
        }
    }

    /// Advances the bolt in progress for up to `budget` of wall time.
    ///
    /// Once every attractor is captured or the iteration cap is hit, the
    /// finished bolt replaces the displayed one and its animation starts.
    ///
    /// ### Returns
    /// `true` while growth is still in progress.
    fn grow_for(&mut self, budget: Duration) -> bool {
        let progress = {
            let Some(bolt) = self.growing.as_mut() else {
                return false;
            };
            let started = Instant::now();
            let mut emitted = 0;
            while !bolt.is_finished() {
                emitted += bolt.step().new_ids.len();
                if started.elapsed() >= budget {
                    break;
                }
            }

            (!bolt.is_finished()).then(|| {
                format!(
                    "growing: iteration {}/{}, {} segments (+{emitted}), {} attractors left",
                    bolt.iteration(),
                    bolt.config().max_iterations,
                    bolt.tree().len(),
                    bolt.attractors().len()
                )
            })
        };

        match progress {
            Some(msg) => {
                self.status = Status::Info(msg);
                true
            }
            None => {
                if let Some(bolt) = self.growing.take() {
                    self.show(bolt.grow());
                }
                false
            }
        }
    }

    /// Makes `growth` the displayed bolt and restarts its animation.
    fn show(&mut self, growth: Growth) {
        self.seed = growth.seed;
        self.status = Status::Info(match growth.outcome {
            GrowthOutcome::Complete => format!(
                "grown: {} segments in {} iterations",
                growth.tree.len(),
                growth.iterations
            ),
            GrowthOutcome::CapReached { remaining } => format!(
                "iteration cap hit with {remaining} attractors left ({} segments)",
                growth.tree.len()
            ),
        });
        let timeline = Timeline::new(growth.iterations, growth.tree.last_iteration());
        let fps = self.playback.as_ref().map_or(DEFAULT_FPS, |p| p.fps());
        self.playback = Some(Playback::new(
            timeline,
            fps,
            self.appearance.play_animation,
        ));
        self.growth = Some(growth);
    }

    /// Writes the current bolt to `export_path`.
    fn export(&mut self) {
        let result = match &self.growth {
            Some(growth) => {
                export::write_json(&PathBuf::from(&self.export_path), &growth.tree)
            }
            None => Err(ExportError::NothingToExport),
        };

        self.status = match result {
            Ok(count) => {
                Status::Info(format!("exported {count} segments to {}", self.export_path))
            }
            Err(err) => {
                tracing::error!(%err, "export failed");
                Status::Error(err.to_string())
            }
        };
    }

    /// Converts a world-space position to screen-space.
    ///
    /// The bolt transform from [`Appearance::transform`] is applied first,
    /// then the point is orbited by `yaw` around the vertical axis through
    /// the pivot and projected orthographically. The y-axis is flipped so
    /// that positive y goes up on screen.
    ///
    /// ### Parameters
    /// - `p` - World-space position.
    /// - `rect` - Screen-space rectangle representing the drawing area.
    ///
    /// ### Returns
    /// The corresponding egui position in screen-space.
    fn world_to_screen(&self, p: Vec3, rect: egui::Rect) -> egui::Pos2 {
        let q = self.appearance.transform().transform_point3(p) - PIVOT;
        let (sin, cos) = self.yaw.sin_cos();
        let x = q.x * cos + q.z * sin;
        let center = rect.center();
        egui::pos2(
            center.x + x * self.zoom + self.pan.x,
            center.y - q.y * self.zoom + self.pan.y,
        )
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (apply, playback, export, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⚡ Apply").clicked() {
                    self.apply();
                }

                if let Some(playback) = &mut self.playback {
                    let label = if playback.is_playing() {
                        "⏸ Pause"
                    } else {
                        "▶ Play"
                    };
                    if ui.button(label).clicked() {
                        playback.toggle();
                    }

                    let end = playback.timeline().end_frame();
                    let mut frame = playback.current_frame();
                    if ui
                        .add(egui::Slider::new(&mut frame, 0..=end).text("frame"))
                        .changed()
                    {
                        playback.seek(frame);
                    }
                }

                ui.separator();
                ui.add(egui::TextEdit::singleline(&mut self.export_path).desired_width(160.0));
                if ui.button("Export").clicked() {
                    self.export();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.5..=40.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (last message, bolt stats, seed).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("seed = {}", self.seed));
                if let Some(bolt) = &self.growing {
                    ui.separator();
                    ui.label(format!("iterations = {}", bolt.iteration()));
                    ui.label(format!("segments = {}", bolt.tree().len()));
                } else if let Some(growth) = &self.growth {
                    ui.separator();
                    ui.label(format!("iterations = {}", growth.iterations));
                    ui.label(format!("segments = {}", growth.tree.len()));
                }
                if let Some(playback) = &self.playback {
                    ui.separator();
                    ui.label(format!("frame = {}", playback.current_frame()));
                }
                ui.separator();
                match &self.status {
                    Status::Info(msg) => ui.label(msg),
                    Status::Error(msg) => {
                        ui.label(egui::RichText::new(msg).color(egui::Color32::LIGHT_RED))
                    }
                };
            });
        });
    }

    /// Builds the right-hand panel for growth and appearance parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Control parameters");
                    ui.add(
                        egui::Slider::new(&mut self.cfg.attractor_count, 10..=200)
                            .text("Lightning concentration"),
                    );
                    ui.add(
                        egui::Slider::new(&mut self.appearance.thickness, 1.0..=5.0)
                            .text("Segment thickness"),
                    );
                    ui.add(
                        egui::Slider::new(&mut self.cfg.origin_height, 1.0..=20.0)
                            .text("Starting height"),
                    );
                    ui.add(
                        egui::Slider::new(&mut self.cfg.area_extent, 5.0..=50.0)
                            .step_by(1.0)
                            .text("Area size"),
                    );
                    ui.add(
                        egui::Slider::new(&mut self.appearance.rotation_deg, 0.0..=360.0)
                            .text("Rotation angle"),
                    );
                    ui.add(
                        egui::Slider::new(&mut self.appearance.scale, 0.1..=10.0)
                            .text("Scaling value"),
                    );
                    ui.checkbox(&mut self.appearance.segment_falloff, "Segment size falloff");

                    ui.separator();
                    ui.heading("Shader");
                    ui.add(
                        egui::Slider::new(&mut self.appearance.brightness, 0.0..=10.0)
                            .text("Brightness"),
                    );
                    ui.horizontal(|ui| {
                        ui.label("Colour");
                        egui::color_picker::color_edit_button_rgb(
                            ui,
                            &mut self.appearance.colour,
                        );
                    });
                    ui.checkbox(&mut self.appearance.brightness_falloff, "Brightness falloff");
                    ui.checkbox(&mut self.appearance.colour_falloff, "Colour falloff");

                    ui.separator();
                    ui.heading("Growth");
                    Self::labeled_drag_f32(
                        ui,
                        "min_dist:",
                        &mut self.cfg.min_dist,
                        0.1..=50.0,
                        0.1,
                    );
                    Self::labeled_drag_f32(
                        ui,
                        "max_dist:",
                        &mut self.cfg.max_dist,
                        0.1..=500.0,
                        0.5,
                    );
                    Self::labeled_drag_f32(
                        ui,
                        "segment_length:",
                        &mut self.cfg.segment_length,
                        0.1..=10.0,
                        0.05,
                    );
                    Self::labeled_drag_f32(
                        ui,
                        "jitter_range:",
                        &mut self.cfg.jitter_range,
                        0.0..=2.0,
                        0.01,
                    );
                    ui.horizontal(|ui| {
                        ui.label("max_iterations:");
                        ui.add(
                            egui::DragValue::new(&mut self.cfg.max_iterations)
                                .range(1..=100_000)
                                .speed(10.0),
                        );
                    });
                    ui.checkbox(&mut self.cfg.heading_bias, "Heading bias");
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut self.fixed_seed, "Fixed seed");
                        ui.add_enabled(self.fixed_seed, egui::DragValue::new(&mut self.seed));
                    });

                    ui.separator();
                    ui.heading("Animation");
                    ui.checkbox(&mut self.appearance.play_animation, "Play animation");
                    if let Some(playback) = &mut self.playback {
                        let mut fps = playback.fps();
                        ui.horizontal(|ui| {
                            ui.label("fps:");
                            if ui
                                .add(egui::DragValue::new(&mut fps).range(1.0..=120.0))
                                .changed()
                            {
                                playback.set_fps(fps);
                            }
                        });
                    }

                    ui.separator();
                    if ui.button("Reset to defaults").clicked() {
                        self.cfg = GrowthConfig::default();
                        self.appearance = Appearance::default();
                    }
                });
            });
    }

    /// Builds the central panel where the bolt is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_rgb(8, 8, 16)))
            .show(ctx, |ui| {
                let response =
                    ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                // Primary drag pans, secondary drag orbits.
                if response.dragged_by(egui::PointerButton::Primary) {
                    self.pan += response.drag_delta();
                }
                if response.dragged_by(egui::PointerButton::Secondary) {
                    self.yaw += response.drag_delta().x * 0.01;
                }

                let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                    self.zoom = (self.zoom * factor).clamp(0.5, 40.0);
                }

                let now = ctx.input(|i| i.time);
                let dt = if self.last_time > 0.0 {
                    now - self.last_time
                } else {
                    0.0
                };
                self.last_time = now;

                if let Some(playback) = &mut self.playback {
                    playback.advance(dt);
                    if playback.is_playing() {
                        ctx.request_repaint();
                    }
                }

                // A bolt in progress is drawn whole; a finished one follows playback.
                if let Some(bolt) = &self.growing {
                    self.draw_tree(&painter, rect, bolt.tree(), |_| true);
                } else if let (Some(growth), Some(playback)) = (&self.growth, &self.playback) {
                    self.draw_tree(&painter, rect, &growth.tree, |it| playback.shows(it));
                }
            });
    }

    /// Draws every segment of `tree` whose creation iteration is `visible`.
    fn draw_tree(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        tree: &SegmentTree,
        visible: impl Fn(u32) -> bool,
    ) {
        // The root marks the origin and is never drawn.
        for id in 1..tree.len() {
            let seg = &tree.segments[id];
            if !visible(seg.iteration) {
                continue;
            }
            let Some(edge) = tree.edge(id) else {
                continue;
            };

            let a = self.world_to_screen(edge.start, rect);
            let b = self.world_to_screen(edge.end, rect);
            let radius = self.appearance.radius(seg.iteration) * self.appearance.scale;
            let width = (radius * 2.0 * self.zoom).max(1.0);

            if let Some(glow) = self.appearance.glow(seg.iteration) {
                let [r, g, b8] = style::to_rgb8(glow);
                painter.line_segment(
                    [a, b],
                    egui::Stroke::new(
                        width * 4.0,
                        egui::Color32::from_rgba_unmultiplied(r, g, b8, 48),
                    ),
                );
            }

            let [r, g, b8] = style::to_rgb8(self.appearance.colour(seg.iteration));
            painter.line_segment(
                [a, b],
                egui::Stroke::new(width, egui::Color32::from_rgb(r, g, b8)),
            );
        }
    }
}

impl App for Viewer {
    /// eframe callback that grows the pending bolt and builds all UI panels
    /// for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.grow_for(GROWTH_FRAME_BUDGET) {
            ctx.request_repaint();
        }
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
