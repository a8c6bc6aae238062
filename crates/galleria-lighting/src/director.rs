//! Lifecycle and focus transitions for the gallery light rig.

use galleria_layout::LightAnchor;
use galleria_runtime::{
    CancellationSource, Completion, TaskStatus, TickScheduler, ease_in_out_cubic,
};
use tracing::{debug, info};

use crate::light::LightId;
use crate::rig::{LightRig, LightStats};
use crate::sink::LightSink;
use crate::theme::{LightConfig, LightTheme, default_spot_anchors};

/// How a focused spotlight differs from its baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusSettings {
    /// Transition duration in seconds.
    pub duration: f64,
    /// Focused intensity as a multiple of the baseline.
    pub intensity_gain: f32,
    /// Focused cone angle as a fraction of the baseline.
    pub angle_scale: f32,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            duration: 0.5,
            intensity_gain: 1.75,
            angle_scale: 0.6,
        }
    }
}

/// Owns the light rig of one gallery session and keeps a [`LightSink`] in sync.
pub struct LightRigDirector<S: LightSink> {
    sink: S,
    anchors: Vec<LightAnchor>,
    theme: LightTheme,
    focus_settings: FocusSettings,
    rig: Option<LightRig>,
    focus_index: Option<usize>,
    transitions: CancellationSource,
    scheduler: TickScheduler<LightRig>,
    pending_focus: Option<Completion>,
}

impl<S: LightSink> std::fmt::Debug for LightRigDirector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightRigDirector")
            .field("theme", &self.theme)
            .field("initialized", &self.rig.is_some())
            .field("focus_index", &self.focus_index)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl<S: LightSink> LightRigDirector<S> {
    /// Create an uninitialized director. Spotlights default to a fixed ring
    /// until [`set_anchors`](Self::set_anchors) supplies layout anchors.
    pub fn new(sink: S, focus_settings: FocusSettings) -> Self {
        Self {
            sink,
            anchors: default_spot_anchors(),
            theme: LightTheme::default(),
            focus_settings,
            rig: None,
            focus_index: None,
            transitions: CancellationSource::new(),
            scheduler: TickScheduler::new(),
            pending_focus: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn theme(&self) -> LightTheme {
        self.theme
    }

    pub fn is_initialized(&self) -> bool {
        self.rig.is_some()
    }

    pub fn rig(&self) -> Option<&LightRig> {
        self.rig.as_ref()
    }

    /// Frame index currently focused, if any.
    pub fn focus_index(&self) -> Option<usize> {
        self.focus_index
    }

    /// Use layout-derived spotlight anchors. Rebuilds the rig if it is live.
    pub fn set_anchors(&mut self, anchors: Vec<LightAnchor>) {
        self.anchors = anchors;
        if self.rig.is_some() {
            self.initialize(self.theme);
        }
    }

    /// Build the rig for `theme` and attach every light, replacing any existing rig.
    pub fn initialize(&mut self, theme: LightTheme) {
        self.teardown();
        self.theme = theme;
        let rig = LightRig::from_config(&LightConfig::themed(theme, &self.anchors));
        for (id, light) in rig.iter() {
            self.sink.attach(id, light);
        }
        info!(
            theme = %theme,
            lights = rig.len(),
            spotlights = rig.spot_count(),
            "light rig initialized"
        );
        self.rig = Some(rig);
    }

    /// Switch theme. A live rig is rebuilt; otherwise the theme applies at the
    /// next [`initialize`](Self::initialize).
    pub fn change_theme(&mut self, theme: LightTheme) {
        if self.rig.is_some() {
            self.initialize(theme);
        } else {
            self.theme = theme;
        }
    }

    /// Highlight the spotlight associated with `frame_index`.
    ///
    /// The spotlight is `frame_index % spot_count`. Focusing the frame that is
    /// already focused changes nothing and returns an already-completed
    /// handle, as does calling this without a live rig. A previous focus still
    /// in flight is superseded.
    pub fn focus(&mut self, frame_index: usize) -> Completion {
        let Some(rig) = self.rig.as_mut() else {
            return Completion::completed();
        };
        let spot_count = rig.spot_count();
        if spot_count == 0 || self.focus_index == Some(frame_index) {
            return Completion::completed();
        }

        self.transitions.cancel_all();
        if let Some(previous) = self.pending_focus.take() {
            previous.supersede();
        }
        rig.restore_spots();

        let spot = frame_index % spot_count;
        let Some((base_intensity, base_angle)) = rig.spot_baseline(spot) else {
            return Completion::completed();
        };
        let settings = self.focus_settings;
        let target_intensity = base_intensity * settings.intensity_gain;
        let target_angle = base_angle * settings.angle_scale;

        let completion = Completion::pending();
        let signal = completion.clone();
        let mut elapsed = 0.0_f64;
        self.scheduler.schedule(
            "spotlight-focus",
            self.transitions.issue(),
            move |rig: &mut LightRig, dt| {
                elapsed += dt;
                let progress = if settings.duration <= 0.0 {
                    1.0
                } else {
                    (elapsed / settings.duration).min(1.0) as f32
                };
                let t = ease_in_out_cubic(progress);
                rig.set_spot(
                    spot,
                    base_intensity + (target_intensity - base_intensity) * t,
                    base_angle + (target_angle - base_angle) * t,
                );
                if progress >= 1.0 {
                    signal.complete();
                    TaskStatus::Finished
                } else {
                    TaskStatus::Running
                }
            },
        );
        debug!(frame_index, spot, "spotlight focus started");
        self.focus_index = Some(frame_index);
        self.pending_focus = Some(completion.clone());
        self.flush();
        completion
    }

    /// Return every spotlight to its baseline immediately and clear the focus.
    pub fn reset_focus(&mut self) {
        self.cancel_transition();
        self.focus_index = None;
        if let Some(rig) = self.rig.as_mut() {
            rig.restore_spots();
        }
        self.flush();
    }

    /// Advance in-flight transitions by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if let Some(rig) = self.rig.as_mut() {
            self.scheduler.run(rig, dt);
        }
        self.flush();
    }

    /// Light count and summed intensity; zero without a live rig.
    pub fn light_stats(&self) -> LightStats {
        self.rig.as_ref().map(LightRig::stats).unwrap_or_default()
    }

    /// Cancel any transition and detach every light.
    pub fn dispose(&mut self) {
        if self.rig.is_some() {
            info!("light rig disposed");
        }
        self.teardown();
    }

    fn teardown(&mut self) {
        self.cancel_transition();
        self.scheduler.clear();
        self.focus_index = None;
        if let Some(rig) = self.rig.take() {
            let ids: Vec<LightId> = rig.iter().map(|(id, _)| id).collect();
            for id in ids {
                self.sink.detach(id);
            }
        }
    }

    fn cancel_transition(&mut self) {
        self.transitions.cancel_all();
        if let Some(pending) = self.pending_focus.take() {
            pending.supersede();
        }
    }

    fn flush(&mut self) {
        let Some(rig) = self.rig.as_mut() else {
            return;
        };
        for id in rig.take_dirty() {
            if let Some(light) = rig.get(id) {
                self.sink.update(id, light);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::f32::consts::FRAC_PI_4;

    use galleria_runtime::CompletionState;

    use crate::light::Light;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Attach(LightId),
        Update(LightId),
        Detach(LightId),
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<Call>,
        scene: BTreeMap<LightId, Light>,
    }

    impl LightSink for RecordingSink {
        fn attach(&mut self, id: LightId, light: &Light) {
            self.calls.push(Call::Attach(id));
            self.scene.insert(id, *light);
        }

        fn update(&mut self, id: LightId, light: &Light) {
            self.calls.push(Call::Update(id));
            self.scene.insert(id, *light);
        }

        fn detach(&mut self, id: LightId) {
            self.calls.push(Call::Detach(id));
            self.scene.remove(&id);
        }
    }

    fn director() -> LightRigDirector<RecordingSink> {
        let mut d = LightRigDirector::new(RecordingSink::default(), FocusSettings::default());
        d.initialize(LightTheme::Default);
        d.sink_mut().calls.clear();
        d
    }

    fn spot(d: &LightRigDirector<RecordingSink>, index: usize) -> Light {
        d.sink().scene[&LightId::Spot(index)]
    }

    #[test]
    fn test_initialize_attaches_full_topology() {
        let mut d = LightRigDirector::new(RecordingSink::default(), FocusSettings::default());
        d.initialize(LightTheme::Dramatic);
        assert_eq!(d.sink().scene.len(), 9);
        assert!(d.sink().calls.iter().all(|c| matches!(c, Call::Attach(_))));
        assert_eq!(d.light_stats().count, 9);
    }

    #[test]
    fn test_focus_animates_spot_to_target() {
        let mut d = director();
        let done = d.focus(8);
        assert_eq!(done.state(), CompletionState::Pending);

        d.tick(0.25);
        let mid = spot(&d, 2);
        assert!(mid.intensity > 1.5 && mid.intensity < 1.5 * 1.75);

        d.tick(0.3);
        assert!(done.is_complete());
        let focused = spot(&d, 2);
        assert!((focused.intensity - 1.5 * 1.75).abs() < 1e-5);
        assert!((focused.spot_params().unwrap().angle - FRAC_PI_4 * 0.6).abs() < 1e-5);
        assert_eq!(d.focus_index(), Some(8));
    }

    #[test]
    fn test_refocus_same_frame_is_idempotent() {
        let mut d = director();
        d.focus(1);
        d.tick(1.0);
        d.sink_mut().calls.clear();
        let stats = d.light_stats();

        let again = d.focus(1);
        d.tick(1.0);
        assert!(again.is_complete());
        assert!(d.sink().calls.is_empty());
        assert_eq!(d.light_stats(), stats);
    }

    #[test]
    fn test_new_focus_supersedes_and_resets_previous_spot() {
        let mut d = director();
        let first = d.focus(0);
        d.tick(0.2);
        let second = d.focus(1);
        assert_eq!(first.state(), CompletionState::Superseded);
        assert!((spot(&d, 0).intensity - 1.5).abs() < 1e-6);

        d.tick(0.6);
        assert!(second.is_complete());
        assert!((spot(&d, 0).intensity - 1.5).abs() < 1e-6);
        assert!((spot(&d, 1).intensity - 1.5 * 1.75).abs() < 1e-5);
    }

    #[test]
    fn test_reset_focus_restores_baseline() {
        let mut d = director();
        d.focus(3);
        d.tick(1.0);
        d.reset_focus();
        assert_eq!(d.focus_index(), None);
        assert!((spot(&d, 3).intensity - 1.5).abs() < 1e-6);
        assert!((d.light_stats().total_intensity - 11.3).abs() < 1e-4);

        // refocusing the same frame works again after a reset
        let again = d.focus(3);
        assert_eq!(again.state(), CompletionState::Pending);
    }

    #[test]
    fn test_dispose_detaches_everything() {
        let mut d = director();
        let pending = d.focus(2);
        d.dispose();
        assert!(d.sink().scene.is_empty());
        assert_eq!(d.sink().calls.iter().filter(|c| matches!(c, Call::Detach(_))).count(), 11);
        assert_eq!(pending.state(), CompletionState::Superseded);
        assert_eq!(d.light_stats(), LightStats::default());

        d.sink_mut().calls.clear();
        assert!(d.focus(2).is_complete());
        d.tick(1.0);
        assert!(d.sink().calls.is_empty());
    }

    #[test]
    fn test_change_theme_before_initialize_only_records() {
        let mut d = LightRigDirector::new(RecordingSink::default(), FocusSettings::default());
        d.change_theme(LightTheme::Soft);
        assert!(d.sink().calls.is_empty());
        assert_eq!(d.theme(), LightTheme::Soft);
        d.initialize(d.theme());
        let ambient = d.sink().scene[&LightId::Ambient];
        assert!((ambient.intensity - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_change_theme_rebuilds_live_rig() {
        let mut d = director();
        d.focus(0);
        d.change_theme(LightTheme::Gallery);
        assert_eq!(d.focus_index(), None);
        assert!(matches!(d.sink().calls.first(), Some(Call::Detach(_))));
        assert!((spot(&d, 0).intensity - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_anchors_drive_spot_count() {
        let mut d = director();
        let anchors = default_spot_anchors().into_iter().take(4).collect();
        d.set_anchors(anchors);
        assert_eq!(d.rig().map(LightRig::spot_count), Some(4));
        d.focus(6);
        d.tick(1.0);
        assert!((spot(&d, 2).intensity - 1.5 * 1.75).abs() < 1e-5);
    }
}
