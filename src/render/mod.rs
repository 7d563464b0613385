/// Backend trait and the RGBA frame type.
pub(crate) mod backend;
pub(crate) mod blur;
pub(crate) mod composite;
/// CPU rasterizer built on `vello_cpu`.
pub(crate) mod cpu;
