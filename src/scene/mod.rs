/// Serde configuration table of every scene constant.
pub(crate) mod config;
pub(crate) mod figure;
pub(crate) mod label;
pub(crate) mod layers;
pub(crate) mod layout;
pub(crate) mod particles;
/// Frame loop owner: paint, render, sink.
pub(crate) mod renderer;
pub(crate) mod surface;
