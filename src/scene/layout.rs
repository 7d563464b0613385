use crate::scene::config::LayoutConfig;

/// Per-frame layout constants derived from the viewport size.
///
/// Recomputed every frame, so resizes take effect immediately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Sky/ocean boundary.
    pub horizon: f64,
    /// Ocean/sand boundary.
    pub beach: f64,
    /// Line the figures sit on.
    pub sit: f64,
    /// Horizontal centre of the viewport.
    pub center_x: f64,
    /// Anchor x of the left figure.
    pub left_x: f64,
    /// Anchor x of the right figure.
    pub right_x: f64,
}

impl SceneLayout {
    /// Derive the layout for a `width × height` viewport.
    pub fn compute(width: f64, height: f64, cfg: &LayoutConfig) -> Self {
        let horizon = height * cfg.horizon_frac;
        let beach = height * cfg.beach_frac;
        let center_x = width * 0.5;
        Self {
            width,
            height,
            horizon,
            beach,
            sit: beach + (height - beach) * cfg.sit_frac,
            center_x,
            left_x: center_x - cfg.character_offset,
            right_x: center_x + cfg.character_offset,
        }
    }

    /// Shorter viewport side.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
