//! Interpreter configuration.
//!
//! The only configurable knob the source language exposes is the runaway-loop
//! safety cap; everything else about a run is fixed by the source text
//! itself. There is no on-disk config file.

/// Default cap on iterations a single loop may perform before the
/// interpreter raises `runaway_loop`.
pub const DEFAULT_MAX_LOOP_ITERATIONS: u64 = 100_000;

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub max_loop_iterations: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
        }
    }
}
