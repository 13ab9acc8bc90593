use crate::GameRng;
use crate::data::EntityFactory;

/// Per-update context: wall clock, the shared generator and the factory
/// used for drops and respawns
pub struct Frame<'a> {
    pub now_ms: u64,
    pub rng: &'a mut GameRng,
    pub factory: &'a dyn EntityFactory,
}

impl<'a> Frame<'a> {
    pub fn new(now_ms: u64, rng: &'a mut GameRng, factory: &'a dyn EntityFactory) -> Self {
        Self {
            now_ms,
            rng,
            factory,
        }
    }
}
