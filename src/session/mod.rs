// session/ - Session context and per-frame input
//
// Everything a demo needs across frames lives in `SessionContext`; its
// lifetime follows the XR session start/end events.

mod event;
mod features;

pub use event::*;
pub use features::*;

use std::collections::VecDeque;

use glam::Mat4;

use crate::config::EngineConfig;
use crate::depth::DepthSource;
use crate::error::FrameError;
use crate::project::Camera;

// Events only drain inside frames; the host may post while none run
const MAX_PENDING_EVENTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerPose {
    pub transform: Mat4,
    /// Projection of the first view; `None` keeps the camera's current one.
    pub projection: Option<Mat4>,
}

/// Borrowed data for one frame. Dropped when the frame call returns.
#[derive(Default)]
pub struct FrameInput<'a> {
    pub depth: Option<&'a dyn DepthSource>,
    pub viewer: Option<ViewerPose>,
    pub hit_results: &'a [Mat4],
}

pub struct SessionContext {
    state: SessionState,
    reference_space: bool,
    hit_test_source: Option<HitTestSource>,
    events: VecDeque<SessionEvent>,
    pub camera: Camera,
    frames: u64,
}

impl SessionContext {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            state: SessionState::Idle,
            reference_space: false,
            hit_test_source: None,
            events: VecDeque::new(),
            camera: Camera::new(cfg.camera.clone()),
            frames: 0,
        }
    }

    pub fn post(&mut self, event: SessionEvent) {
        if let SessionEvent::Resize { .. } = event {
            // Only the latest size matters
            self.events.retain(|e| !matches!(e, SessionEvent::Resize { .. }));
        }
        if self.pending_events() >= MAX_PENDING_EVENTS {
            if let Some(dropped) = self.events.pop_front() {
                log::warn!("event queue full, dropping {dropped:?}");
            }
        }
        self.events.push_back(event);
    }

    pub fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.pop_front()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Apply the lifecycle part of an event. Demo-specific events pass
    /// through untouched.
    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::SessionStarted => {
                self.state = SessionState::Active;
                self.reference_space = false;
                self.hit_test_source = None;
                log::info!("XR session started");
            }
            SessionEvent::SessionEnded => {
                self.state = SessionState::Ended;
                self.reference_space = false;
                self.hit_test_source = None;
                log::info!("XR session ended after {} frames", self.frames);
            }
            SessionEvent::ReferenceSpaceReady => self.reference_space = true,
            SessionEvent::HitTestSourceReady(source) => {
                if self.state == SessionState::Active {
                    log::info!("hit-test source initialized: {source:?}");
                    self.hit_test_source = Some(*source);
                } else {
                    log::warn!("hit-test source {source:?} arrived outside a session");
                }
            }
            SessionEvent::Resize { width, height } if *height > 0 => {
                self.camera.set_aspect(*width as f32 / *height as f32);
            }
            _ => {}
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn hit_test_source(&self) -> Option<HitTestSource> {
        self.hit_test_source
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn require_session(&self) -> Result<(), FrameError> {
        match self.state {
            SessionState::Active => Ok(()),
            _ => Err(FrameError::NoSession),
        }
    }

    pub fn require_reference_space(&self) -> Result<(), FrameError> {
        self.require_session()?;
        if self.reference_space { Ok(()) } else { Err(FrameError::NoReferenceSpace) }
    }

    pub fn require_hit_test_source(&self) -> Result<HitTestSource, FrameError> {
        self.hit_test_source.ok_or(FrameError::NoHitTestSource)
    }

    /// Adopt the viewer pose into the camera.
    pub fn require_viewer(&mut self, input: &FrameInput<'_>) -> Result<ViewerPose, FrameError> {
        let pose = input.viewer.ok_or(FrameError::NoViewerPose)?;
        self.camera.update_from_viewer(pose.transform, pose.projection);
        Ok(pose)
    }

    pub(crate) fn count_frame(&mut self) {
        self.frames += 1;
    }
}
