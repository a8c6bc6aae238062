use std::collections::VecDeque;

use glam::Vec2;
use tracing::debug;
use winit::event::{ElementState, TouchPhase};

use galleria_input::{
    GestureEvent, GestureTracker, InputEvent, NavigationKey, PointerButtonEvent, PointerState,
    Viewport,
};
use galleria_runtime::{
    CancellationSource, Countdown, EventChannel, Subscription, TaskStatus, TickScheduler,
};

use crate::events::{HoverChanged, Notification, SelectionChanged, SelectionSource};
use crate::hit_test::{HitTarget, Ray, nearest_hit};
use crate::settings::InteractionSettings;
use crate::state::{CameraPose, CameraState, NavigationMode, wrap_angle};
use crate::transition::CameraTransition;

const POSE_EPSILON: f32 = 1e-4;

/// Camera state machine driven by queued input and explicit ticks.
///
/// Within one [`tick`](Self::tick) the order is fixed: queued input is handled
/// first, then timers advance, then scheduled animation steps run, and finally
/// notifications are dispatched to subscribers.
pub struct InteractionController {
    settings: InteractionSettings,
    viewport: Viewport,
    pose: CameraPose,
    mode: NavigationMode,
    selected: Option<usize>,
    hovered: Option<usize>,
    targets: Vec<HitTarget>,

    pointer: PointerState,
    gestures: GestureTracker,
    inputs: VecDeque<InputEvent>,
    clock: f64,

    auto_rotate: Option<Countdown>,
    motion: CancellationSource,
    scheduler: TickScheduler<CameraPose>,

    pending: Vec<Notification>,
    camera_dirty: bool,
    selection_events: EventChannel<SelectionChanged>,
    hover_events: EventChannel<HoverChanged>,
    camera_events: EventChannel<CameraState>,
}

impl std::fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionController")
            .field("state", &self.state())
            .field("targets", &self.targets.len())
            .field("queued_inputs", &self.inputs.len())
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl InteractionController {
    /// Create a controller at the home pose.
    pub fn new(settings: InteractionSettings, viewport: Viewport) -> Self {
        let pose = home_pose(&settings);
        Self {
            pointer: PointerState::new(settings.click_slop),
            gestures: GestureTracker::new(settings.double_tap_window),
            settings,
            viewport,
            pose,
            mode: NavigationMode::Idle,
            selected: None,
            hovered: None,
            targets: Vec::new(),
            inputs: VecDeque::new(),
            clock: 0.0,
            auto_rotate: None,
            motion: CancellationSource::new(),
            scheduler: TickScheduler::new(),
            pending: Vec::new(),
            camera_dirty: false,
            selection_events: EventChannel::new(),
            hover_events: EventChannel::new(),
            camera_events: EventChannel::new(),
        }
    }

    // ── Public API ─────────────────────────────────────────────────────

    /// Snapshot of the camera, selection, hover, and mode.
    pub fn state(&self) -> CameraState {
        CameraState {
            pose: self.pose,
            selected: self.selected,
            hovered: self.hovered,
            mode: self.mode,
        }
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    /// Replace the pickable frames. A hovered frame that disappears is un-hovered.
    pub fn set_hit_test_targets(&mut self, targets: Vec<HitTarget>) {
        self.targets = targets;
        if let Some(hovered) = self.hovered
            && !self.targets.iter().any(|t| t.index == hovered)
        {
            self.set_hover(None);
        }
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.inputs.push_back(event);
    }

    /// Select `index` and animate the camera in front of it.
    /// Returns `false` (and does nothing) when no frame has that index.
    pub fn focus_on_frame(&mut self, index: usize) -> bool {
        self.focus_target(index, SelectionSource::Programmatic)
    }

    /// Animate back to the home pose and clear the selection.
    /// Does nothing when already at rest at home with nothing selected.
    pub fn reset_view(&mut self) {
        let home = home_pose(&self.settings);
        let at_home = self.mode != NavigationMode::Animating
            && self.mode != NavigationMode::AutoRotating
            && self.pose.approx_eq(&home, POSE_EPSILON);
        self.set_selection(None, SelectionSource::Reset);
        if at_home {
            return;
        }
        debug!("resetting view");
        self.animate_to(home);
    }

    /// Advance the controller by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        let dt = dt.max(0.0);

        while let Some(event) = self.inputs.pop_front() {
            self.handle_input(event);
        }

        self.clock += dt;
        if let Some(countdown) = self.auto_rotate.as_mut()
            && countdown.tick(dt)
        {
            self.auto_rotate = None;
            self.start_auto_rotate();
        }

        let before = self.pose;
        self.scheduler.run(&mut self.pose, dt);
        if self.pose != before {
            self.camera_dirty = true;
        }
        if self.mode == NavigationMode::Animating && !self.scheduler.has_live_tasks() {
            debug!("camera animation finished");
            self.mode = NavigationMode::Idle;
        }

        self.dispatch();
    }

    /// Subscribe to selection changes.
    pub fn on_selection(&self, listener: impl FnMut(&SelectionChanged) + 'static) -> Subscription {
        self.selection_events.subscribe(listener)
    }

    /// Subscribe to hover changes.
    pub fn on_hover(&self, listener: impl FnMut(&HoverChanged) + 'static) -> Subscription {
        self.hover_events.subscribe(listener)
    }

    /// Subscribe to camera updates. Fires at most once per tick.
    pub fn on_camera_move(&self, listener: impl FnMut(&CameraState) + 'static) -> Subscription {
        self.camera_events.subscribe(listener)
    }

    // ── Input handling ─────────────────────────────────────────────────

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let delta = self.pointer.on_cursor_moved(x, y);
                self.note_activity();
                if self.mode == NavigationMode::Dragging && self.pointer.is_primary_down() {
                    self.rotate_by_drag(delta);
                }
                self.update_hover(self.pointer.position());
            }
            InputEvent::MouseButton { button, state } => {
                match self.pointer.on_button(button, state) {
                    PointerButtonEvent::PrimaryPressed => self.begin_drag(),
                    PointerButtonEvent::PrimaryReleased { click } => {
                        if self.mode != NavigationMode::Dragging {
                            return;
                        }
                        let hit = if click {
                            self.pick(self.pointer.position())
                        } else {
                            None
                        };
                        match hit {
                            Some(index) => {
                                self.focus_target(index, SelectionSource::Click);
                            }
                            None => self.settle(),
                        }
                    }
                    PointerButtonEvent::Ignored => self.note_activity(),
                }
            }
            InputEvent::MouseWheel { delta } => {
                let lines = self.pointer.on_scroll(delta);
                self.nudge();
                if lines != 0.0 {
                    self.set_fov(self.pose.fov_deg - lines * self.settings.wheel_fov_step_deg);
                }
            }
            InputEvent::Touch { id, phase, x, y } => {
                self.handle_touch(id, phase, Vec2::new(x as f32, y as f32));
            }
            InputEvent::Key { key, state, repeat } => {
                if state != ElementState::Pressed {
                    return;
                }
                // Held Space or Escape acts once; held arrows keep turning.
                if let Some(nav) = NavigationKey::from_key_code(key)
                    && (!repeat || nav.repeats())
                {
                    self.handle_key(nav);
                }
            }
        }
    }

    fn handle_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        match phase {
            TouchPhase::Started => {
                self.note_activity();
                match self.gestures.touch_start(id, position, self.clock) {
                    GestureEvent::SingleStart {
                        position,
                        double_tap,
                    } => {
                        let focused = double_tap
                            && self
                                .pick(position)
                                .is_some_and(|index| self.focus_target(index, SelectionSource::DoubleTap));
                        if !focused {
                            self.begin_drag();
                        }
                    }
                    GestureEvent::PinchStart { baseline } => {
                        debug!(baseline, touches = self.gestures.touch_count(), "pinch started");
                        self.interrupt_motion();
                        self.mode = NavigationMode::Pinching;
                    }
                    _ => {}
                }
            }
            TouchPhase::Moved => match self.gestures.touch_move(id, position) {
                GestureEvent::Drag { delta } if self.mode == NavigationMode::Dragging => {
                    self.rotate_by_drag(delta);
                }
                GestureEvent::Pinch { scale } if self.mode == NavigationMode::Pinching => {
                    if scale > f32::EPSILON {
                        self.set_fov(self.pose.fov_deg / scale);
                    }
                }
                _ => {}
            },
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.gestures.touch_end(id, self.clock) == GestureEvent::Released
                    && matches!(
                        self.mode,
                        NavigationMode::Dragging | NavigationMode::Pinching
                    )
                {
                    self.settle();
                }
            }
        }
    }

    fn handle_key(&mut self, key: NavigationKey) {
        match key {
            NavigationKey::YawLeft => {
                self.nudge();
                self.rotate(self.settings.key_yaw_step, 0.0);
            }
            NavigationKey::YawRight => {
                self.nudge();
                self.rotate(-self.settings.key_yaw_step, 0.0);
            }
            NavigationKey::PitchUp => {
                self.nudge();
                self.rotate(0.0, self.settings.key_pitch_step);
            }
            NavigationKey::PitchDown => {
                self.nudge();
                self.rotate(0.0, -self.settings.key_pitch_step);
            }
            NavigationKey::ResetView => self.reset_view(),
            NavigationKey::ClearSelection => {
                self.note_activity();
                self.set_selection(None, SelectionSource::Cleared);
            }
        }
    }

    // ── Transitions ────────────────────────────────────────────────────

    /// Primary press or single touch: supersede any motion and start dragging.
    fn begin_drag(&mut self) {
        self.interrupt_motion();
        self.mode = NavigationMode::Dragging;
    }

    /// End of a drag or pinch: go idle and arm the auto-rotate countdown.
    fn settle(&mut self) {
        self.mode = NavigationMode::Idle;
        self.auto_rotate = Some(Countdown::new(self.settings.auto_rotate_delay));
    }

    /// Cancel in-flight animation or rotation and clear the countdown.
    fn interrupt_motion(&mut self) {
        self.motion.cancel_all();
        self.auto_rotate = None;
    }

    /// Any input: stops auto-rotation and postpones a pending countdown.
    fn note_activity(&mut self) {
        if self.mode == NavigationMode::AutoRotating {
            debug!("auto-rotate interrupted");
            self.interrupt_motion();
            self.settle();
        } else if let Some(countdown) = self.auto_rotate.as_mut() {
            countdown.restart();
        }
    }

    /// Discrete adjustments (keys, wheel) that take over from any motion.
    fn nudge(&mut self) {
        match self.mode {
            NavigationMode::Animating | NavigationMode::AutoRotating => {
                self.interrupt_motion();
                self.settle();
            }
            NavigationMode::Idle => self.settle(),
            NavigationMode::Dragging | NavigationMode::Pinching => {}
        }
    }

    fn focus_target(&mut self, index: usize, source: SelectionSource) -> bool {
        let Some(target) = self.targets.iter().find(|t| t.index == index).copied() else {
            debug!(index, "focus ignored, no such frame");
            return false;
        };
        self.set_selection(Some(index), source);
        let eye = target.center + target.normal() * self.settings.focus_distance;
        let to = CameraPose::looking_at(eye, target.center, self.pose.fov_deg);
        debug!(index, ?source, "focusing frame");
        self.animate_to(to);
        true
    }

    fn animate_to(&mut self, to: CameraPose) {
        self.interrupt_motion();
        let token = self.motion.issue();
        let mut transition = CameraTransition::new(
            self.pose,
            CameraPose {
                pitch: self.settings.clamp_pitch(to.pitch),
                fov_deg: self.settings.clamp_fov(to.fov_deg),
                ..to
            },
            self.settings.animation_duration,
        );
        self.scheduler
            .schedule("camera-transition", token, move |pose: &mut CameraPose, dt| {
                *pose = transition.advance(dt);
                if transition.is_finished() {
                    TaskStatus::Finished
                } else {
                    TaskStatus::Running
                }
            });
        self.mode = NavigationMode::Animating;
    }

    fn start_auto_rotate(&mut self) {
        debug!("auto-rotate started");
        let token = self.motion.issue();
        let speed = self.settings.auto_rotate_speed;
        self.scheduler
            .schedule("auto-rotate", token, move |pose: &mut CameraPose, dt| {
                pose.yaw = wrap_angle(pose.yaw + speed * dt as f32);
                TaskStatus::Running
            });
        self.mode = NavigationMode::AutoRotating;
    }

    // ── Camera mutation ────────────────────────────────────────────────

    fn rotate_by_drag(&mut self, delta: Vec2) {
        let speed = self.settings.rotation_speed;
        self.rotate(-delta.x * speed, -delta.y * speed);
    }

    fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.pose.yaw = wrap_angle(self.pose.yaw + yaw);
        self.pose.pitch = self.settings.clamp_pitch(self.pose.pitch + pitch);
        self.camera_dirty = true;
    }

    fn set_fov(&mut self, fov_deg: f32) {
        let fov_deg = self.settings.clamp_fov(fov_deg);
        if (fov_deg - self.pose.fov_deg).abs() > f32::EPSILON {
            self.pose.fov_deg = fov_deg;
            self.camera_dirty = true;
        }
    }

    // ── Picking & notifications ────────────────────────────────────────

    fn pick(&self, screen: Vec2) -> Option<usize> {
        let ndc = self.viewport.to_ndc(screen);
        let ray = Ray::from_camera(&self.pose, ndc, self.viewport.aspect_ratio());
        nearest_hit(&ray, &self.targets).map(|hit| hit.index)
    }

    fn update_hover(&mut self, screen: Vec2) {
        let hovered = self.pick(screen);
        self.set_hover(hovered);
    }

    fn set_hover(&mut self, current: Option<usize>) {
        if current == self.hovered {
            return;
        }
        let previous = std::mem::replace(&mut self.hovered, current);
        self.pending
            .push(Notification::Hover(HoverChanged { previous, current }));
    }

    fn set_selection(&mut self, current: Option<usize>, source: SelectionSource) {
        if current == self.selected {
            return;
        }
        let previous = std::mem::replace(&mut self.selected, current);
        self.pending.push(Notification::Selection(SelectionChanged {
            previous,
            current,
            source,
        }));
    }

    fn dispatch(&mut self) {
        if std::mem::take(&mut self.camera_dirty) {
            let state = self.state();
            self.pending.push(Notification::CameraMoved(state));
        }
        for notification in std::mem::take(&mut self.pending) {
            match notification {
                Notification::Selection(event) => self.selection_events.emit(&event),
                Notification::Hover(event) => self.hover_events.emit(&event),
                Notification::CameraMoved(state) => self.camera_events.emit(&state),
            }
        }
    }
}

fn home_pose(settings: &InteractionSettings) -> CameraPose {
    CameraPose::new(
        settings.home_position,
        settings.home_yaw,
        0.0,
        settings.clamp_fov(settings.home_fov_deg),
    )
}
