//! Avatar Viewer
//!
//! Loads the avatar model, then the animations, and drives playback.
//!
//! All load completions arrive as [`LoadEvent`]s on one queue and are applied
//! by [`AvatarViewer::handle_event`], on the same thread that ticks frames
//! and handles UI triggers. No state is shared with the loader tasks.
//!
//! ```rust,ignore
//! let mut viewer = AvatarViewer::new(
//!     ViewerSettings::default(),
//!     FileAssetReader::new("assets"),
//!     |s| Ok(HeadlessRenderer::new(s.viewport.0, s.viewport.1)),
//! )?;
//! viewer.start();
//!
//! let mut timer = Timer::new();
//! loop {
//!     timer.tick();
//!     viewer.tick(timer.dt_seconds());
//!     if clicked_sitting {
//!         viewer.trigger("sitting");
//!     }
//! }
//! ```

pub mod renderer;
pub mod settings;

pub use renderer::{HeadlessRenderer, Renderer};
pub use settings::{AnimationSource, CameraSettings, ViewerSettings};

use std::time::{Duration, Instant};

use glam::Vec3;

use crate::animation::AnimationClip;
use crate::animation::controller::AnimationController;
use crate::assets::{AssetReader, AssetServer, LoadEvent};
use crate::errors::{Result, ViewerError};
use crate::scene::{Camera, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelState {
    NotRequested,
    Pending,
    Loaded,
    Failed,
}

/// What the UI shows around the 3D view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerStatus {
    /// Loading indicator: the model or an expected animation is outstanding.
    pub loading: bool,
    /// Blocking error (model or context failure); the avatar is not shown.
    pub blocking_error: Option<String>,
    /// Every error reported so far, blocking or not.
    pub errors: Vec<String>,
    pub active_animation: Option<String>,
}

impl ViewerStatus {
    #[must_use]
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub struct AvatarViewer<R: Renderer, A: AssetReader> {
    settings: ViewerSettings,
    assets: AssetServer<A>,
    events: Option<flume::Receiver<LoadEvent>>,
    renderer: R,
    camera: Camera,

    model: Option<Scene>,
    model_state: ModelState,
    controller: Option<AnimationController>,
    errors: Vec<ViewerError>,

    torn_down: bool,
}

impl<R: Renderer, A: AssetReader> AvatarViewer<R, A> {
    /// Creates the viewer and its rendering context.
    ///
    /// Fails with [`ViewerError::Initialization`] when `init_renderer` fails.
    pub fn new(
        settings: ViewerSettings,
        reader: A,
        init_renderer: impl FnOnce(&ViewerSettings) -> anyhow::Result<R>,
    ) -> Result<Self> {
        let mut renderer = init_renderer(&settings).map_err(|e| {
            log::error!("Failed to initialize the 3D context: {e:#}");
            ViewerError::Initialization(format!("{e:#}"))
        })?;

        let (width, height) = settings.viewport;
        renderer.resize(width, height);

        let cam = &settings.camera;
        let mut camera = Camera::new_perspective(cam.fov, settings.aspect(), cam.near, cam.far);
        camera.transform.position = Vec3::from_array(cam.position);
        camera.look_at(Vec3::from_array(cam.target));

        let (tx, rx) = flume::unbounded();

        Ok(Self {
            assets: AssetServer::new(reader, tx),
            events: Some(rx),
            renderer,
            camera,
            model: None,
            model_state: ModelState::NotRequested,
            controller: None,
            errors: Vec::new(),
            torn_down: false,
            settings,
        })
    }

    /// Issues the model load. Animations are requested once the model is in.
    pub fn start(&mut self) {
        if self.torn_down || self.model_state != ModelState::NotRequested {
            log::warn!("Viewer already started");
            return;
        }
        log::info!("Loading model '{}'", self.settings.model);
        self.model_state = ModelState::Pending;
        self.assets.load_model(&self.settings.model);
    }

    // ========================================================================
    // Load events
    // ========================================================================

    /// Applies every completed load without blocking. Returns how many were applied.
    pub fn poll_loads(&mut self) -> usize {
        let Some(events) = &self.events else {
            return 0;
        };
        let pending: Vec<LoadEvent> = events.try_iter().collect();
        let count = pending.len();
        for event in pending {
            self.handle_event(event);
        }
        count
    }

    /// Blocks until loading settles or `timeout` elapses.
    /// Returns whether loading settled.
    pub fn wait_for_loads(&mut self, timeout: Duration) -> bool {
        let Some(events) = self.events.clone() else {
            return false;
        };
        let deadline = Instant::now() + timeout;

        while self.is_loading() {
            match events.recv_deadline(deadline) {
                Ok(event) => self.handle_event(event),
                Err(_) => break,
            }
        }
        !self.is_loading()
    }

    /// Applies one load outcome. This is the only place loads mutate the viewer.
    pub fn handle_event(&mut self, event: LoadEvent) {
        if self.torn_down {
            log::debug!("Ignoring load event after teardown");
            return;
        }

        match event {
            LoadEvent::Model { locator, result } => self.on_model_loaded(locator, result),
            LoadEvent::Animation {
                name,
                locator,
                result,
            } => self.on_animation_loaded(&name, locator, result),
        }
    }

    fn on_model_loaded(&mut self, locator: String, result: Result<Scene>) {
        if self.model_state == ModelState::Loaded {
            log::warn!("Ignoring second model load for '{locator}'");
            return;
        }

        match result {
            Ok(scene) => {
                log::info!("Model '{locator}' loaded ({} nodes)", scene.node_count());
                self.model = Some(scene);
                self.model_state = ModelState::Loaded;
                self.controller = Some(AnimationController::new(self.settings.controller_config()));

                for source in &self.settings.animations {
                    log::info!("Loading animation '{}' from '{}'", source.name, source.locator);
                    self.assets.load_animation(&source.name, &source.locator);
                }
            }
            Err(e) => {
                log::error!("Failed to load model '{locator}': {e}");
                self.model = None;
                self.controller = None;
                self.model_state = ModelState::Failed;
                self.errors.push(ViewerError::ModelLoad {
                    locator,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn on_animation_loaded(&mut self, name: &str, locator: String, result: Result<AnimationClip>) {
        let (Some(controller), Some(model)) = (self.controller.as_mut(), self.model.as_ref()) else {
            log::debug!("Ignoring animation '{name}': no model to animate");
            return;
        };

        match result {
            Ok(clip) => controller.register_animation(model, name, &clip),
            Err(e) => {
                log::warn!("Failed to load animation '{name}' from '{locator}': {e}");
                controller.report_failure(name);
                self.errors.push(ViewerError::AnimationLoad {
                    name: name.to_string(),
                    locator,
                    reason: e.to_string(),
                });
            }
        }
    }

    // ========================================================================
    // Frame, UI and window events
    // ========================================================================

    /// UI trigger: switch to the animation `name`. Ignored while it is not loaded.
    pub fn trigger(&mut self, name: &str) -> bool {
        if self.torn_down {
            return false;
        }
        self.controller.as_mut().is_some_and(|c| c.switch_to(name))
    }

    /// Per-frame tick: applies finished loads, advances the animation by the
    /// measured `dt` (seconds) and renders.
    pub fn tick(&mut self, dt: f32) {
        if self.torn_down {
            return;
        }
        self.poll_loads();

        if let (Some(controller), Some(model)) = (self.controller.as_mut(), self.model.as_mut()) {
            controller.update(dt, model);
        }
        if let Some(model) = self.model.as_mut() {
            model.update_matrix_world();
        }

        self.renderer.render(self.model.as_ref(), &self.camera);
    }

    /// Viewport resize: updates the camera projection and the renderer output size.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.torn_down {
            return;
        }
        self.camera.set_viewport(width, height);
        self.renderer.resize(width, height);
    }

    /// Releases the renderer and stops listening for loads. Loads still in
    /// flight complete into nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.events = None;
        self.renderer.release();
        log::info!("Viewer torn down");
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    #[must_use]
    pub fn is_loading(&self) -> bool {
        match self.model_state {
            ModelState::Pending => true,
            ModelState::Loaded => self
                .controller
                .as_ref()
                .is_some_and(|c| !c.is_loading_complete()),
            ModelState::NotRequested | ModelState::Failed => false,
        }
    }

    #[must_use]
    pub fn status(&self) -> ViewerStatus {
        ViewerStatus {
            loading: !self.torn_down && self.is_loading(),
            blocking_error: self
                .errors
                .iter()
                .find(|e| matches!(e, ViewerError::ModelLoad { .. }))
                .map(ToString::to_string),
            errors: self.errors.iter().map(ToString::to_string).collect(),
            active_animation: self
                .controller
                .as_ref()
                .and_then(|c| c.active_animation().map(str::to_string)),
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[ViewerError] {
        &self.errors
    }

    #[must_use]
    pub fn controller(&self) -> Option<&AnimationController> {
        self.controller.as_ref()
    }

    #[must_use]
    pub fn model(&self) -> Option<&Scene> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl<R: Renderer, A: AssetReader> Drop for AvatarViewer<R, A> {
    fn drop(&mut self) {
        self.teardown();
    }
}
