//! Headless scene driver.
//!
//! Runs the scene selected by `KILN_DEMO` at a fixed tick rate and logs what would be uploaded to
//! the GPU each frame. Use `RUST_LOG=kiln=trace` to see every uniform value.

use itertools::Itertools;
use kiln::{
    config::Config,
    demo::Demo,
    timer::{FpsCounter, Ticker, Timer},
};

fn main() -> anyhow::Result<()> {
    kiln::init_logger!();

    let config = Config::from_env()?;
    log::info!(
        "running '{}' on a {} canvas, {} ticks every {:?}",
        config.demo,
        config.canvas,
        config
            .ticks
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string()),
        config.tick_interval,
    );

    let rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut demo = config.demo.create(rng)?;
    describe(&*demo);

    let frame_timer = Timer::new("frame");
    let mut fps = FpsCounter::new(demo.name());
    let mut ticker = Ticker::new(config.tick_interval);
    let mut late_ticks = 0u64;
    let mut tick = 0u64;
    while config.ticks.map_or(true, |ticks| tick < ticks) {
        let frame = frame_timer.time(|| demo.frame(config.canvas))?;
        log::debug!(
            "tick {tick}: {:?} of {} vertices, {} uniforms",
            frame.draw.primitive,
            frame.draw.count,
            frame.uniforms.len(),
        );
        for (name, value) in frame.uniforms.iter() {
            log::trace!("  {name}: {value}");
        }
        if let Some(shading) = demo.shading_sample()? {
            log::debug!(
                "  first vertex: diffuse {:.3}, specular {:.3}",
                shading.diffuse,
                shading.specular,
            );
        }

        fps.tick_with([&frame_timer]);
        demo.advance();
        tick += 1;
        if !ticker.wait() {
            late_ticks += 1;
        }
    }

    log::info!("finished after {tick} ticks ({late_ticks} late)");
    Ok(())
}

fn describe(demo: &dyn Demo) {
    let geometry = demo.geometry();
    log::debug!(
        "'{}' geometry: {} vertices, attributes [{}]",
        demo.name(),
        geometry.vertex_count(),
        geometry
            .attributes()
            .iter()
            .map(|attrib| {
                let (ty, normalized) = attrib.pointer_format();
                format!(
                    "{}: {}x {}{}, {} bytes",
                    attrib.name(),
                    attrib.components(),
                    ty,
                    if normalized { " (normalized)" } else { "" },
                    attrib.as_bytes().len(),
                )
            })
            .join(", "),
    );
    let shaders = demo.shaders();
    log::trace!("vertex shader:\n{}", shaders.vertex);
    log::trace!("fragment shader:\n{}", shaders.fragment);
}
