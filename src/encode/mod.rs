/// `ffmpeg`-based MP4 output.
pub(crate) mod ffmpeg;
/// Frame sink trait plus in-memory and PNG sequence sinks.
pub(crate) mod sink;
