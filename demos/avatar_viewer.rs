//! Headless avatar viewer.
//!
//! Loads the avatar and its animations from an asset directory, then runs a
//! fixed number of frames, cycling through the animations as a UI would.
//!
//! ```sh
//! RUST_LOG=info cargo run --example avatar_viewer -- [settings.json]
//! ```

use std::time::Duration;

use anyhow::Context;

use avatar_viewer::{AvatarViewer, FileAssetReader, HeadlessRenderer, Timer, ViewerSettings};

const FRAMES: u64 = 600;
const SWITCH_EVERY: u64 = 180;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => ViewerSettings::from_json_file(&path).with_context(|| format!("reading settings from {path}"))?,
        None => ViewerSettings::default(),
    };
    let reader = FileAssetReader::new(&settings.asset_root);
    let names: Vec<String> = settings.animations.iter().map(|a| a.name.clone()).collect();

    let mut viewer = AvatarViewer::new(settings, reader, |s| Ok(HeadlessRenderer::new(s.viewport.0, s.viewport.1)))?;
    viewer.start();

    if !viewer.wait_for_loads(Duration::from_secs(30)) {
        log::warn!("Assets still loading after 30s; continuing");
    }

    let status = viewer.status();
    if let Some(error) = &status.blocking_error {
        anyhow::bail!("{error}");
    }
    for error in &status.errors {
        log::warn!("{error}");
    }
    println!("Playing: {}", status.active_animation.as_deref().unwrap_or("<none>"));

    let mut timer = Timer::new();
    for frame in 1..=FRAMES {
        std::thread::sleep(Duration::from_millis(16));
        viewer.tick(timer.tick());

        if frame % SWITCH_EVERY == 0 && !names.is_empty() {
            let next = &names[(frame / SWITCH_EVERY) as usize % names.len()];
            if viewer.trigger(next) {
                println!("Switched to '{next}' at frame {frame}");
            }
        }
    }

    println!("Rendered {} frames in {:.2}s", viewer.renderer().frames, timer.elapsed().as_secs_f32());
    viewer.teardown();
    Ok(())
}
