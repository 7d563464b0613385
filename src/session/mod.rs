/// Frame clocks driving the paint loop.
pub(crate) mod scheduler;
