use crate::prelude::*;

pub mod building;
mod standard;

pub use building::{Building, BuildingFactory};
pub use standard::{StandardColony, StandardColonyFactory};

/// Distance from the world's center to its border, in blocks. No territory reaches further.
pub const MAX_RADIUS: u32 = 30_000_000;

/// Everything needed to found a colony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColonyInput {
    pub dimension: i32,
    pub center: BlockPos,
    pub owner: Uuid,
}

/// What the colony manager needs from a colony.
pub trait Colony: Constructable<Input = ColonyInput> {
    fn id(&self) -> Token;
    fn dimension(&self) -> i32;
    fn is_coord_in_colony(&self, world: &dyn World, pos: BlockPos) -> bool;
    fn distance_sq(&self, pos: BlockPos) -> i128;
    fn owner(&self) -> Uuid;
    fn building(&self, _pos: BlockPos) -> Option<&Building> {
        None
    }
    /// Called once the colony has been removed from its manager.
    /// Failures are reported, never retried.
    fn on_deletion(&mut self) -> Result<()>;
}

/// Registers every factory the standard colony needs.
pub fn register_standard(builder: &mut FactoryControllerBuilder, config: &crate::Config) -> Result<()> {
    builder
        .register(crate::token::TokenFactory)?
        .register(BuildingFactory)?
        .register(StandardColonyFactory::new(config.colony_radius)?)?;
    Ok(())
}
