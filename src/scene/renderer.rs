use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, Point, Viewport};
use crate::foundation::error::ShorelineResult;
use crate::plan::builder::PlanBuilder;
use crate::plan::model::FramePlan;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::scene::config::SceneConfig;
use crate::scene::figure::{figure_tilts, paint_figure};
use crate::scene::label::paint_label;
use crate::scene::layers;
use crate::scene::layout::SceneLayout;
use crate::scene::particles::ParticleField;
use crate::scene::surface::Surface;
use crate::session::scheduler::{FrameScheduler, RenderStats};
use crate::text::measure::TextMeasure;

/// The animated beach scene.
///
/// Owns the configuration table, the current surface and the sparkle field. The field is created
/// once in [`SceneRenderer::new`] and only ever advanced by [`SceneRenderer::paint`].
#[derive(Clone, Debug)]
pub struct SceneRenderer {
    config: SceneConfig,
    surface: Surface,
    particles: ParticleField,
}

impl SceneRenderer {
    /// Validate `config`, configure the surface for `viewport` and seed the sparkle field.
    pub fn new(config: SceneConfig, viewport: Viewport) -> ShorelineResult<Self> {
        config.validate()?;
        let surface = Surface::new(viewport)?;
        let particles = ParticleField::seeded(config.seed, &config.sparkles);
        tracing::debug!(
            particles = particles.len(),
            seed = config.seed,
            "scene renderer created"
        );
        Ok(Self {
            config,
            surface,
            particles,
        })
    }

    /// Follow a viewport or pixel-density change. Particles are kept.
    pub fn reconfigure(&mut self, viewport: Viewport) -> ShorelineResult<()> {
        self.surface.reconfigure(viewport)
    }

    /// Configuration table the scene was built with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current drawing surface.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Sparkle field, advanced once per painted frame.
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Layout constants for the current surface.
    pub fn layout(&self) -> SceneLayout {
        let (w, h) = self.surface.display_size();
        SceneLayout::compute(w, h, &self.config.layout)
    }

    /// Record every layer for elapsed time `t`, back to front.
    ///
    /// Advances each particle's phase by one step.
    #[tracing::instrument(level = "trace", skip(self, measure))]
    pub fn paint(&mut self, t: f64, measure: &mut dyn TextMeasure) -> FramePlan {
        let cfg = &self.config;
        let l = self.layout();
        let mut b = PlanBuilder::new(self.surface, measure);

        layers::paint_sky(&mut b, &l, &cfg.sky, t);
        layers::paint_sun(&mut b, &l, &cfg.sun, t);
        layers::paint_band(&mut b, &l, l.horizon, l.beach, &cfg.ocean);
        let (sun, _) = layers::sun_disk(&l, &cfg.sun, t);
        layers::paint_reflection(&mut b, &l, &cfg.reflection, sun.x, t);
        layers::paint_waves(&mut b, &l, &cfg.waves, t);
        layers::paint_band(&mut b, &l, l.beach, l.height, &cfg.sand);
        layers::paint_vignette(&mut b, &l, &cfg.vignette);
        layers::paint_sparkles(&mut b, &l, &mut self.particles, &cfg.sparkles, t);
        layers::paint_ground_shadows(&mut b, &l, &cfg.ground_shadows);

        let (left_tilt, right_tilt) = figure_tilts(&cfg.figures, t);
        let sides = [(l.left_x, left_tilt), (l.right_x, right_tilt)];
        for ((x, tilt), name) in sides.into_iter().zip(&cfg.labels.names) {
            paint_figure(
                &mut b,
                Point::new(x, l.sit),
                cfg.figures.scale,
                tilt,
                &cfg.figures,
            );
            paint_label(
                &mut b,
                name,
                Point::new(x, l.sit - cfg.labels.rise),
                cfg.labels.scale,
                &cfg.labels,
            );
        }

        layers::paint_glow(&mut b, &l, &cfg.glow, t);
        b.finish(t)
    }

    /// Paint and rasterize one frame with `backend`.
    pub fn render_frame(
        &mut self,
        t: f64,
        backend: &mut dyn RenderBackend,
    ) -> ShorelineResult<FrameRGBA> {
        let plan = self.paint(t, backend.text_measure());
        backend.render_plan(&plan)
    }

    /// Drive paint, render and sink until `scheduler` runs out of ticks.
    #[tracing::instrument(skip_all, fields(fps = fps.as_f64()))]
    pub fn run(
        &mut self,
        scheduler: &mut dyn FrameScheduler,
        backend: &mut dyn RenderBackend,
        sink: &mut dyn FrameSink,
        fps: Fps,
    ) -> ShorelineResult<RenderStats> {
        let (width, height) = self.surface.backing_size();
        sink.begin(SinkConfig { width, height, fps })?;

        let mut stats = RenderStats::default();
        while let Some(tick) = scheduler.next_frame() {
            let plan = self.paint(tick.time_secs, backend.text_measure());
            let frame = backend.render_plan(&plan)?;
            sink.push_frame(tick.index, &frame)?;
            stats.frames_rendered += 1;
            stats.ops_recorded += plan.op_count() as u64;
            stats.last_time_secs = Some(tick.time_secs);
        }
        sink.end()?;

        tracing::info!(
            frames = stats.frames_rendered,
            ops = stats.ops_recorded,
            "render loop finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/renderer.rs"]
mod tests;
