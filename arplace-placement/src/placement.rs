//! The placement state machine
//!
//! Idle -> Placing -> {Placed | Cancelled}. While placing, every hit sample
//! moves the reticle and the candidate object with it; confirming hands the
//! candidate to the scene. Hit samples arrive asynchronously, so calls that
//! come in outside the expected state are silent no-ops.

use std::rc::Rc;

use arplace_core::{HitSample, ObjectHandle, ReticleConfig, Result, SceneHandle};
use tracing::{debug, trace};

use crate::reticle::Reticle;

/// Where the controller is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlacementState {
    #[default]
    Idle,
    Placing,
    Placed,
    Cancelled,
    Disposed,
}

struct PlacementSession {
    candidate: Option<ObjectHandle>,
    scene: SceneHandle,
}

/// Runs one placement session at a time
pub struct PlacementController {
    config: ReticleConfig,
    // Built on the first session, reused until dispose.
    reticle: Option<Reticle>,
    session: Option<PlacementSession>,
    state: PlacementState,
}

impl PlacementController {
    /// Create a controller with the default reticle
    pub fn new() -> Self {
        Self {
            config: ReticleConfig::default(),
            reticle: None,
            session: None,
            state: PlacementState::Idle,
        }
    }

    /// Create a controller with a custom reticle
    pub fn with_config(config: ReticleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// True only while a session is waiting for confirm or cancel
    pub fn is_placement_active(&self) -> bool {
        self.state == PlacementState::Placing
    }

    /// The reticle, once the first session has started
    pub fn reticle(&self) -> Option<&Reticle> {
        self.reticle.as_ref()
    }

    /// The object currently following the reticle
    pub fn candidate(&self) -> Option<ObjectHandle> {
        self.session
            .as_ref()
            .and_then(|s| s.candidate.as_ref())
            .map(Rc::clone)
    }

    /// Begin placing `object` into `scene`, cancelling any active session
    ///
    /// The object is not added to the scene until [`confirm_placement`].
    ///
    /// [`confirm_placement`]: Self::confirm_placement
    pub fn start_placement(&mut self, object: Option<ObjectHandle>, scene: SceneHandle) {
        if self.state == PlacementState::Disposed {
            trace!("start_placement after dispose ignored");
            return;
        }
        if self.is_placement_active() {
            debug!("placement restarted, cancelling previous session");
            self.cancel_placement();
        }

        let config = self.config;
        self.reticle
            .get_or_insert_with(|| Reticle::new(config))
            .reset();

        if let Some(object) = &object {
            debug!(id = %object.borrow().id(), "placement started");
        } else {
            debug!("placement started without candidate");
        }
        self.session = Some(PlacementSession {
            candidate: object,
            scene,
        });
        self.state = PlacementState::Placing;
    }

    /// Move the reticle, and the candidate with it, onto a hit sample
    ///
    /// The candidate mirrors the reticle's pose and keeps its own scale.
    /// Orientation follows the sample's normal only when it has one.
    pub fn show_reticle(&mut self, hit: &HitSample) {
        if !self.is_placement_active() {
            trace!("hit sample outside placement ignored");
            return;
        }
        let (Some(reticle), Some(session)) = (self.reticle.as_mut(), self.session.as_ref()) else {
            return;
        };

        let oriented = reticle.track(hit);
        if let Some(candidate) = &session.candidate {
            let mut candidate = candidate.borrow_mut();
            let transform = candidate.transform_mut();
            if oriented {
                transform.copy_pose_from(reticle.transform());
            } else {
                transform.position = reticle.transform().position;
            }
        }
    }

    /// Hand the candidate to the scene at its current transform
    ///
    /// Returns the placed object; the controller stops tracking it. Returns
    /// `None` without touching the scene when no session is active.
    pub fn confirm_placement(&mut self) -> Option<ObjectHandle> {
        if !self.is_placement_active() {
            trace!("confirm outside placement ignored");
            return None;
        }
        let session = self.session.take()?;
        if let Some(reticle) = self.reticle.as_mut() {
            reticle.hide();
        }
        self.state = PlacementState::Placed;

        let candidate = session.candidate?;
        session.scene.borrow_mut().add(Rc::clone(&candidate));
        debug!(id = %candidate.borrow().id(), "placement confirmed");
        Some(candidate)
    }

    /// Drop the candidate without adding it and hide the reticle. Idempotent.
    pub fn cancel_placement(&mut self) {
        if self.state == PlacementState::Disposed {
            return;
        }
        let was_placing = self.is_placement_active();
        self.session = None;
        if let Some(reticle) = self.reticle.as_mut() {
            reticle.hide();
        }
        self.state = if was_placing {
            debug!("placement cancelled");
            PlacementState::Cancelled
        } else {
            PlacementState::Idle
        };
    }

    /// Cancel any session and free the reticle; the controller is inert afterwards
    pub fn dispose(&mut self) {
        self.cancel_placement();
        if let Some(mut reticle) = self.reticle.take() {
            reticle.release();
        }
        self.state = PlacementState::Disposed;
    }
}

impl Default for PlacementController {
    fn default() -> Self {
        Self::new()
    }
}
