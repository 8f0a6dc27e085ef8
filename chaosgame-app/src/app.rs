use std::time::{Duration, Instant};

use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use chaosgame_core::{CanvasSize, GamePoint, Phase, PlaybackConfig, Rgb, Session, Vec2};
use chaosgame_playback::{
    assemble_frame, frame_color, LabelSink, PlaybackController, RenderSink, TickScheduler,
};

/// Upper bound of the speed slider in milliseconds. The stored interval is
/// `SPEED_SLIDER_MAX - slider value`, so sliding right means faster.
const SPEED_SLIDER_MAX: u64 = 2000;

const POINT_RADIUS: f32 = 4.0;
/// Bordered points get a black backing disc this much larger.
const BORDER_EXTRA: f32 = 1.5;

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

/// Top-level screen the application is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppScreen {
    /// Pick the number of anchor vertices before a board is created.
    VertexSelect,
    /// The game board itself.
    Game,
}

// ---------------------------------------------------------------------------
// Sinks and scheduler backed by egui
// ---------------------------------------------------------------------------

/// Deadline-based tick scheduler on top of egui's repaint requests.
#[derive(Debug, Default)]
struct RepaintScheduler {
    deadline: Option<Instant>,
}

impl RepaintScheduler {
    /// True when the pending tick's deadline has passed.
    fn due(&self) -> bool {
        matches!(self.deadline, Some(d) if Instant::now() >= d)
    }

    /// Time until the pending tick, for repaint scheduling.
    fn time_to_deadline(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

impl TickScheduler for RepaintScheduler {
    fn schedule(&mut self, interval: Duration) {
        self.deadline = Some(Instant::now() + interval);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Render sink holding the frame the canvas paints from.
struct FrameBuffer {
    points: Vec<GamePoint>,
    color: Rgb,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            color: Rgb::from_hue(PlaybackConfig::DEFAULT_HUE),
        }
    }
}

impl RenderSink for FrameBuffer {
    fn render(&mut self, points: &[GamePoint], color: Rgb) {
        self.points.clear();
        self.points.extend_from_slice(points);
        self.color = color;
    }
}

/// Label sink holding keyed annotations in canvas-pixel coordinates.
#[derive(Debug, Default)]
struct LabelBuffer {
    labels: Vec<(String, String, f64, f64)>,
}

impl LabelSink for LabelBuffer {
    fn place_label(&mut self, id: &str, text: &str, x: f64, y: f64) {
        if let Some(entry) = self.labels.iter_mut().find(|(i, ..)| i == id) {
            *entry = (id.to_owned(), text.to_owned(), x, y);
        } else {
            self.labels
                .push((id.to_owned(), text.to_owned(), x, y));
        }
    }

    fn remove_last_label(&mut self) {
        self.labels.pop();
    }

    fn clear_labels(&mut self) {
        self.labels.clear();
    }
}

// ---------------------------------------------------------------------------
// The application
// ---------------------------------------------------------------------------

pub struct ChaosGameApp {
    screen: AppScreen,
    vertex_choice: usize,
    session: Session,
    controller: PlaybackController,
    scheduler: RepaintScheduler,
    frame: FrameBuffer,
    labels: LabelBuffer,
    rng: StdRng,
    /// Last random-pick message shown while running.
    run_message: Option<String>,
}

impl Default for ChaosGameApp {
    fn default() -> Self {
        let canvas = CanvasSize::new(800, 600).expect("static canvas size is valid");
        Self {
            screen: AppScreen::VertexSelect,
            vertex_choice: 3,
            session: Session::new(3, PlaybackConfig::default()),
            controller: PlaybackController::new(canvas),
            scheduler: RepaintScheduler::default(),
            frame: FrameBuffer::default(),
            labels: LabelBuffer::default(),
            rng: StdRng::from_entropy(),
            run_message: None,
        }
    }
}

impl ChaosGameApp {
    fn new_board(&mut self, n: usize) {
        debug!(n, "creating new board");
        self.session = Session::new(n, PlaybackConfig::default());
        self.scheduler.cancel();
        self.labels.clear_labels();
        self.run_message = None;
        self.screen = AppScreen::Game;
    }

    fn status_message(&self) -> String {
        match self.session.phase() {
            Phase::Collecting => "Click on the board to select points!".to_owned(),
            Phase::AwaitingStart => "Select a starting position!".to_owned(),
            Phase::Ready => "Press the 'Run' button to start the game!".to_owned(),
            Phase::Running if !self.session.config().playing => "Paused.".to_owned(),
            Phase::Running => self
                .run_message
                .clone()
                .unwrap_or_else(|| "Running...".to_owned()),
            Phase::Finished => {
                "Look at your fascinating fractal pattern! \
                 Press Reset or New Board to play again!"
                    .to_owned()
            }
        }
    }

    /// Advance the tick loop when the pending deadline has passed.
    fn drive_ticks(&mut self) {
        if !self.scheduler.due() {
            return;
        }
        let report = self.controller.tick(
            &mut self.session,
            &mut self.rng,
            &mut self.scheduler,
            &mut self.frame,
            &mut self.labels,
        );
        if let Some(step) = report.step {
            let letter = self
                .session
                .anchors()
                .get(step.anchor_index)
                .and_then(|a| a.label.clone())
                .unwrap_or_default();
            self.run_message = Some(format!(
                "Random number chosen: {} Point Associated: {}",
                step.anchor_index, letter
            ));
        }
    }

    // -----------------------------------------------------------------------
    // Vertex selection screen
    // -----------------------------------------------------------------------

    fn show_vertex_select(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.heading("The Chaos Game");
                ui.add_space(16.0);
                ui.label("How many anchor vertices?");
                ui.add(egui::Slider::new(&mut self.vertex_choice, 3..=12));
                ui.add_space(8.0);
                if ui.button("Start").clicked() {
                    self.new_board(self.vertex_choice);
                }
            });
        });
    }

    // -----------------------------------------------------------------------
    // Game screen
    // -----------------------------------------------------------------------

    fn show_controls(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("controls")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                let actions = self.session.actions();
                let (interval_ms, hue_value, playing) = {
                    let config = self.session.config();
                    (config.interval_ms, config.hue(), config.playing)
                };

                ui.add_space(8.0);
                ui.label(self.status_message());
                ui.label(format!("Points: {}", self.session.points_placed()));
                ui.separator();

                if ui.add_enabled(actions.run, egui::Button::new("Run")).clicked() {
                    self.session.request_run();
                    self.controller.start(&self.session, &mut self.scheduler);
                    self.controller.sync_labels(&self.session, &mut self.labels);
                }

                let play_text = if playing { "Pause" } else { "Play" };
                if ui
                    .add_enabled(actions.play_pause, egui::Button::new(play_text))
                    .clicked()
                {
                    self.session.toggle_play();
                }

                ui.horizontal(|ui| {
                    if ui.add_enabled(actions.undo, egui::Button::new("Undo")).clicked() {
                        self.session.request_undo();
                        self.labels.remove_last_label();
                        self.controller.sync_labels(&self.session, &mut self.labels);
                    }
                    if ui.add_enabled(actions.redo, egui::Button::new("Redo")).clicked() {
                        self.session.request_redo();
                        self.controller.sync_labels(&self.session, &mut self.labels);
                    }
                });

                ui.separator();

                let mut speed = SPEED_SLIDER_MAX.saturating_sub(interval_ms);
                if ui
                    .add(egui::Slider::new(&mut speed, 0..=SPEED_SLIDER_MAX).text("Speed"))
                    .changed()
                {
                    self.session.set_interval_ms(SPEED_SLIDER_MAX - speed);
                }

                let mut hue = hue_value;
                if ui
                    .add(egui::Slider::new(&mut hue, 0.0..=359.0).text("Color"))
                    .changed()
                {
                    self.session.set_hue(hue);
                }

                ui.separator();

                if ui.button("Reset").clicked() {
                    self.session.reset();
                    self.scheduler.cancel();
                    self.labels.clear_labels();
                    self.run_message = None;
                }
                if ui.button("New Board").clicked() {
                    self.scheduler.cancel();
                    self.labels.clear_labels();
                    self.screen = AppScreen::VertexSelect;
                }
            });
    }

    fn show_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click());
            let rect = response.rect;

            // Track resizes so label layout follows the canvas.
            if let Ok(canvas) =
                CanvasSize::new(rect.width().max(1.0) as u32, rect.height().max(1.0) as u32)
            {
                if canvas != self.controller.canvas() {
                    self.controller.set_canvas(canvas);
                    self.labels.clear_labels();
                    self.controller.sync_labels(&self.session, &mut self.labels);
                }
            }

            // Pointer events in canvas-normalized coordinates.
            match response.hover_pos() {
                Some(pos) => self.session.pointer_moved(to_ndc(pos, rect)),
                None => self.session.pointer_left(),
            }
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.session.pointer_clicked(to_ndc(pos, rect));
                    self.controller.sync_labels(&self.session, &mut self.labels);
                }
            }

            // Refresh the paint buffer after input so clicks show up in the
            // same repaint.
            self.frame.render(
                &assemble_frame(&self.session),
                frame_color(&self.session),
            );

            painter.rect_filled(rect, 0.0, egui::Color32::from_gray(12));

            let color = egui::Color32::from_rgb(
                self.frame.color.r,
                self.frame.color.g,
                self.frame.color.b,
            );
            for point in &self.frame.points {
                // The parked cursor sits outside NDC and is simply not drawn.
                if point.pos.x.abs() > 1.0 || point.pos.y.abs() > 1.0 {
                    continue;
                }
                let center = from_ndc(point.pos, rect);
                if point.bordered {
                    painter.circle_filled(
                        center,
                        POINT_RADIUS + BORDER_EXTRA,
                        egui::Color32::BLACK,
                    );
                }
                painter.circle_filled(center, POINT_RADIUS, color);
            }

            for (_, text, x, y) in &self.labels.labels {
                painter.text(
                    egui::pos2(rect.min.x + *x as f32, rect.min.y + *y as f32),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(14.0),
                    egui::Color32::WHITE,
                );
            }
        });
    }
}

impl eframe::App for ChaosGameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.screen {
            AppScreen::VertexSelect => self.show_vertex_select(ctx),
            AppScreen::Game => {
                self.drive_ticks();
                self.show_controls(ctx);
                self.show_canvas(ctx);

                if let Some(wait) = self.scheduler.time_to_deadline() {
                    ctx.request_repaint_after(wait);
                }
            }
        }
    }
}

/// Map a screen position inside `rect` to normalized device coordinates.
fn to_ndc(pos: egui::Pos2, rect: egui::Rect) -> Vec2 {
    Vec2::new(
        2.0 * ((pos.x - rect.min.x) / rect.width()) as f64 - 1.0,
        -2.0 * ((pos.y - rect.min.y) / rect.height()) as f64 + 1.0,
    )
}

/// Inverse of [`to_ndc`].
fn from_ndc(pos: Vec2, rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(
        rect.min.x + rect.width() * ((pos.x + 1.0) / 2.0) as f32,
        rect.min.y + rect.height() * ((1.0 - pos.y) / 2.0) as f32,
    )
}
