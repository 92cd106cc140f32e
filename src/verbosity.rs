// Global verbosity level shared by the output broker
use std::sync::atomic::{AtomicU8, Ordering};

static VERBOSITY_LEVEL: AtomicU8 = AtomicU8::new(0);

pub fn set_verbosity_level(level: u8) {
    VERBOSITY_LEVEL.store(level.min(2), Ordering::Relaxed);
    if level > 0 {
        println!("📢 Verbosity level: {} (0=summary, 1=info, 2=debug)", level.min(2));
    }
}

pub fn get_verbosity_level() -> u8 {
    VERBOSITY_LEVEL.load(Ordering::Relaxed)
}

/// Whether a message at `level` passes the current verbosity filter.
pub fn is_enabled(level: &crate::output_broker::OutputLevel) -> bool {
    use crate::output_broker::OutputLevel;

    let verbosity = get_verbosity_level();
    match level {
        OutputLevel::Error | OutputLevel::Summary => true,
        OutputLevel::Info => verbosity >= 1,
        OutputLevel::Debug | OutputLevel::Trace => verbosity >= 2,
    }
}
