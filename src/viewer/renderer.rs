use crate::scene::{Camera, Scene};

/// The rendering backend the viewer draws through.
///
/// Implementations own the native GPU/window resources; the viewer only
/// forwards frames and viewport changes and releases them on teardown.
pub trait Renderer {
    fn resize(&mut self, width: u32, height: u32);

    /// Draws one frame. `scene` is `None` until the model has loaded.
    fn render(&mut self, scene: Option<&Scene>, camera: &Camera);

    /// Frees native resources. Called once, on teardown.
    fn release(&mut self);
}

/// Renderer that draws nothing, for tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub size: (u32, u32),
    pub released: bool,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn render(&mut self, scene: Option<&Scene>, _camera: &Camera) {
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::trace!(
                "Headless frame {} ({} nodes)",
                self.frames,
                scene.map_or(0, Scene::node_count)
            );
        }
    }

    fn release(&mut self) {
        self.released = true;
    }
}
