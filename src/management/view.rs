use crate::prelude::*;
use crate::colony::Colony;
use std::collections::HashMap;

/// Client side snapshots of the server's colonies.
///
/// A view is only ever replaced by a newer sync document or dropped; nothing
/// hands out `&mut` access, so client code can't drift from the server.
pub struct ColonyViews<C> {
    dimension: i32,
    views: HashMap<Token, C>,
}
impl<C: Colony> ColonyViews<C> {
    pub fn new(dimension: i32) -> Self {
        Self { dimension, views: HashMap::new() }
    }
    pub fn dimension(&self) -> i32 {
        self.dimension
    }
    /// Takes a sync document from the server. Returns the token it was filed under.
    ///
    /// Colonies from any other dimension are refused.
    pub fn apply(&mut self, factories: &FactoryController, nbt: &Compound) -> Result<Token> {
        let colony: C = factories.deserialize(nbt)?;
        if colony.dimension() != self.dimension {
            return Err(Error::PartitionMismatch { expected: self.dimension, found: colony.dimension() });
        }
        let id = colony.id();
        if self.views.insert(id, colony).is_none() {
            log::debug!("now viewing colony {id}");
        }
        Ok(id)
    }
    pub fn remove(&mut self, id: &Token) -> Option<C> {
        self.views.remove(id)
    }
    pub fn view(&self, id: &Token) -> Option<&C> {
        self.views.get(id)
    }
    pub fn views(&self) -> impl Iterator<Item = &C> {
        self.views.values()
    }
    pub fn closest_view(&self, pos: BlockPos) -> Option<&C> {
        self.views().min_by_key(|c| c.distance_sq(pos))
    }
    pub fn clear(&mut self) {
        self.views.clear();
    }
}
