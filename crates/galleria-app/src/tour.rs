//! Headless gallery tour.
//!
//! A [`TourScript`] of timed actions is replayed against the interaction
//! controller on a fixed-timestep loop. Selection changes drive the light
//! rig's spotlight focus; the performance governor samples the scene once per
//! frame.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase};
use winit::keyboard::KeyCode;

use galleria_assets::{CacheStats, TextureCache};
use galleria_camera::{CameraState, InteractionController, InteractionSettings, SelectionChanged};
use galleria_input::{InputEvent, Viewport};
use galleria_lighting::{FocusSettings, LightRigDirector, LightStats, LightTheme};
use galleria_perf::{
    PerformanceGovernor, PerformanceGrade, PerformanceSample, PerformanceThresholds,
    SamplingSettings,
};
use galleria_runtime::{Completion, CompletionState, Subscription};

use crate::gallery::Gallery;
use crate::pacing::{STEP_SECONDS, TourClock};
use crate::probe::SceneProbe;
use crate::sink::TracingLightSink;

/// Texture memory the governor's memory ratio is measured against.
pub const TEXTURE_BUDGET_BYTES: u64 = 512 * 1024 * 1024;

/// Gap between the two taps of a scripted double tap, and between a tap's
/// start and end.
const TAP_GAP: f64 = 0.05;

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// Something the script does at a point in simulated time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TourAction {
    Input(InputEvent),
    Focus(usize),
    ResetView,
    Theme(LightTheme),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TourStep {
    /// Simulated seconds since the tour started.
    pub at: f64,
    pub action: TourAction,
}

/// Time-ordered list of actions. Actions scheduled for the same instant keep
/// the order they were added in.
#[derive(Clone, Debug, Default)]
pub struct TourScript {
    steps: Vec<TourStep>,
}

impl TourScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, at: f64, action: TourAction) -> &mut Self {
        let index = self.steps.partition_point(|s| s.at <= at);
        self.steps.insert(index, TourStep { at, action });
        self
    }

    pub fn input(&mut self, at: f64, event: InputEvent) -> &mut Self {
        self.push(at, TourAction::Input(event))
    }

    pub fn key(&mut self, at: f64, key: KeyCode) -> &mut Self {
        self.input(at, InputEvent::key_pressed(key))
    }

    /// Mouse click at `(x, y)`.
    pub fn click(&mut self, at: f64, x: f64, y: f64) -> &mut Self {
        self.input(at, InputEvent::CursorMoved { x, y })
            .input(at, mouse(ElementState::Pressed))
            .input(at, mouse(ElementState::Released))
    }

    /// Mouse drag from `(x, y)` by `dx` pixels in `steps` moves spread over `duration`.
    pub fn drag(&mut self, at: f64, x: f64, y: f64, dx: f64, steps: u32, duration: f64) -> &mut Self {
        let steps = steps.max(1);
        self.input(at, InputEvent::CursorMoved { x, y })
            .input(at, mouse(ElementState::Pressed));
        for i in 1..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.input(at + duration * t, InputEvent::CursorMoved { x: x + dx * t, y });
        }
        self.input(at + duration, mouse(ElementState::Released))
    }

    /// Two quick single-finger taps at `(x, y)`.
    pub fn double_tap(&mut self, at: f64, x: f64, y: f64) -> &mut Self {
        for tap in 0..2 {
            let start = at + f64::from(tap) * 2.0 * TAP_GAP;
            self.input(start, InputEvent::touch(1, TouchPhase::Started, x, y))
                .input(start + TAP_GAP, InputEvent::touch(1, TouchPhase::Ended, x, y));
        }
        self
    }

    /// The default tour: programmatic focus, keyboard and wheel nudges, a
    /// drag, a double tap and a click on whatever is in the middle of the
    /// view, a theme change, a reset and one more nudge, then an idle
    /// stretch long enough for auto-rotation, followed by a focus every five
    /// seconds.
    pub fn demo(item_count: usize, viewport: Viewport, duration: f64) -> Self {
        let mut script = Self::new();
        if item_count == 0 {
            return script;
        }
        let center = viewport.center();
        let (cx, cy) = (f64::from(center.x), f64::from(center.y));

        script
            .push(0.5, TourAction::Focus(0))
            .key(2.0, KeyCode::ArrowRight)
            .key(2.1, KeyCode::ArrowRight)
            .key(2.3, KeyCode::ArrowUp)
            .input(
                3.0,
                InputEvent::MouseWheel {
                    delta: MouseScrollDelta::LineDelta(0.0, 1.0),
                },
            )
            .drag(3.5, cx, cy, 120.0, 8, 0.4)
            .push(5.0, TourAction::Focus(1 % item_count))
            .key(7.0, KeyCode::Escape)
            .double_tap(7.5, cx, cy)
            .click(9.0, cx, cy)
            .push(10.0, TourAction::Theme(LightTheme::Dramatic))
            .push(11.0, TourAction::ResetView)
            .key(12.5, KeyCode::ArrowLeft);

        let mut at = 25.0;
        let mut next = 2 % item_count;
        while at < duration {
            script.push(at, TourAction::Focus(next));
            next = (next + 1) % item_count;
            at += 5.0;
        }
        script
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn mouse(state: ElementState) -> InputEvent {
    InputEvent::MouseButton {
        button: MouseButton::Left,
        state,
    }
}

// ---------------------------------------------------------------------------
// Tour
// ---------------------------------------------------------------------------

/// Subsystem settings for one tour.
#[derive(Clone, Debug)]
pub struct TourSettings {
    pub viewport: Viewport,
    pub interaction: InteractionSettings,
    pub focus: FocusSettings,
    pub theme: LightTheme,
    pub thresholds: PerformanceThresholds,
    pub sampling: SamplingSettings,
    /// Simulated duration of one rendered frame.
    pub frame_time: f64,
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            interaction: InteractionSettings::default(),
            focus: FocusSettings::default(),
            theme: LightTheme::default(),
            thresholds: PerformanceThresholds::default(),
            sampling: SamplingSettings::default(),
            frame_time: STEP_SECONDS,
        }
    }
}

/// Summary of a finished run.
#[derive(Clone, Debug, Serialize)]
pub struct TourReport {
    pub frames: u64,
    pub updates: u64,
    pub sim_time: f64,
    pub camera: CameraState,
    pub selections: Vec<SelectionChanged>,
    /// Frame whose spotlight is focused at the end.
    pub light_focus: Option<usize>,
    /// Spotlight focus transitions that ran to completion.
    pub focus_completed: usize,
    pub hover_changes: u64,
    pub camera_moves: u64,
    pub warnings: u64,
    pub lights: LightStats,
    pub performance: PerformanceSample,
    pub grade: PerformanceGrade,
    pub average_frame_time_ms: f32,
    pub textures: CacheStats,
}

#[derive(Default)]
struct Counters {
    hover_changes: Cell<u64>,
    camera_moves: Cell<u64>,
    warnings: Cell<u64>,
}

pub struct Tour {
    settings: TourSettings,
    gallery: Gallery,
    cache: TextureCache,
    controller: InteractionController,
    director: LightRigDirector<TracingLightSink>,
    governor: PerformanceGovernor,

    selection_queue: Rc<RefCell<VecDeque<SelectionChanged>>>,
    selections: Vec<SelectionChanged>,
    counters: Rc<Counters>,
    pending_focus: Option<(usize, Completion)>,
    focus_completed: usize,
    _subscriptions: Vec<Subscription>,
}

impl Tour {
    /// Wire the subsystems around a built gallery and start monitoring.
    pub fn new(gallery: Gallery, cache: TextureCache, settings: TourSettings) -> Self {
        let mut controller =
            InteractionController::new(settings.interaction.clone(), settings.viewport);
        controller.set_hit_test_targets(gallery.targets.clone());

        let mut director = LightRigDirector::new(TracingLightSink::new(), settings.focus);
        director.set_anchors(gallery.layout.light_anchors.clone());
        director.initialize(settings.theme);

        let mut governor = PerformanceGovernor::new(settings.thresholds, settings.sampling);
        governor.start_monitoring();

        let selection_queue = Rc::new(RefCell::new(VecDeque::new()));
        let counters = Rc::new(Counters::default());
        let mut subscriptions = Vec::new();
        {
            let queue = Rc::clone(&selection_queue);
            subscriptions.push(controller.on_selection(move |event: &SelectionChanged| {
                queue.borrow_mut().push_back(*event);
            }));
        }
        {
            let counters = Rc::clone(&counters);
            subscriptions.push(controller.on_hover(move |_| {
                counters.hover_changes.set(counters.hover_changes.get() + 1);
            }));
        }
        {
            let counters = Rc::clone(&counters);
            subscriptions.push(controller.on_camera_move(move |_| {
                counters.camera_moves.set(counters.camera_moves.get() + 1);
            }));
        }
        {
            let counters = Rc::clone(&counters);
            subscriptions.push(governor.on_warning(move |_| {
                counters.warnings.set(counters.warnings.get() + 1);
            }));
        }

        Self {
            settings,
            gallery,
            cache,
            controller,
            director,
            governor,
            selection_queue,
            selections: Vec::new(),
            counters,
            pending_focus: None,
            focus_completed: 0,
            _subscriptions: subscriptions,
        }
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn director(&self) -> &LightRigDirector<TracingLightSink> {
        &self.director
    }

    pub fn governor(&self) -> &PerformanceGovernor {
        &self.governor
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Replay `script` for `duration` simulated seconds.
    pub fn run(&mut self, script: &TourScript, duration: f64) -> TourReport {
        info!(duration, steps = script.len(), "tour started");
        let mut clock = TourClock::new();
        let mut next_step = 0;
        let frame_time = self.settings.frame_time.max(1e-4);

        while clock.sim_time() < duration {
            let counted = clock.frame(frame_time, |dt, sim_time| {
                self.update(script.steps(), &mut next_step, dt, sim_time)
            });
            self.present(counted);
        }

        let report = self.report(&clock);
        info!(
            frames = report.frames,
            selections = report.selections.len(),
            warnings = report.warnings,
            grade = %report.grade,
            "tour finished"
        );
        report
    }

    /// One fixed simulation step.
    fn update(&mut self, steps: &[TourStep], next: &mut usize, dt: f64, sim_time: f64) {
        while let Some(step) = steps.get(*next)
            && step.at <= sim_time
        {
            self.apply(step.action);
            *next += 1;
        }

        self.controller.tick(dt);

        let changes: Vec<SelectionChanged> = self.selection_queue.borrow_mut().drain(..).collect();
        for change in changes {
            match change.current {
                Some(index) => {
                    let completion = self.director.focus(index);
                    self.pending_focus = Some((index, completion));
                }
                None => {
                    self.director.reset_focus();
                    self.pending_focus = None;
                }
            }
            self.selections.push(change);
        }

        self.director.tick(dt);
        if let Some((index, completion)) = &self.pending_focus
            && completion.is_settled()
        {
            if completion.state() == CompletionState::Completed {
                debug!(frame = index, "spotlight focus settled");
                self.focus_completed += 1;
            }
            self.pending_focus = None;
        }
    }

    fn apply(&mut self, action: TourAction) {
        match action {
            TourAction::Input(event) => self.controller.push_input(event),
            TourAction::Focus(index) => {
                if !self.controller.focus_on_frame(index) {
                    debug!(index, "no frame to focus");
                }
            }
            TourAction::ResetView => self.controller.reset_view(),
            TourAction::Theme(theme) => {
                info!(theme = %theme, "changing lighting theme");
                self.director.change_theme(theme);
                self.pending_focus = None;
            }
        }
    }

    /// Once per rendered frame.
    fn present(&mut self, frame_time: f64) {
        let probe = SceneProbe::new(&self.gallery.scene)
            .with_memory(self.cache.stats().estimated_bytes, TEXTURE_BUDGET_BYTES);
        self.governor.tick(frame_time, &probe);
    }

    fn report(&self, clock: &TourClock) -> TourReport {
        TourReport {
            frames: clock.frames(),
            updates: clock.steps(),
            sim_time: clock.sim_time(),
            camera: self.controller.state(),
            selections: self.selections.clone(),
            light_focus: self.director.focus_index(),
            focus_completed: self.focus_completed,
            hover_changes: self.counters.hover_changes.get(),
            camera_moves: self.counters.camera_moves.get(),
            warnings: self.counters.warnings.get(),
            lights: self.director.light_stats(),
            performance: self.governor.stats(),
            grade: self.governor.grade(),
            average_frame_time_ms: self.governor.average_frame_time(),
            textures: self.cache.stats(),
        }
    }

    /// Stop monitoring and take every light out of the scene.
    pub fn dispose(&mut self) {
        self.governor.stop_monitoring();
        self.director.dispose();
    }
}
