//! Per-dimension colony bookkeeping.
//!
//! The server owns one [`WorldColonyController`] per loaded dimension. It is
//! the only place colonies live; everything else refers to them by [`Token`].
//! Clients never get a controller, only [`ColonyViews`] fed from sync documents.
use crate::prelude::*;
use crate::colony::{Building, Colony};
use std::collections::hash_map::{Entry, HashMap};

mod saved_data;
mod view;

pub use saved_data::WorldSavedData;
pub use view::ColonyViews;

const TAG_COLONIES: &str = "Colonies";
const TAG_DIMENSION: &str = "Dimension";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unloaded,
    Loading,
    Ready,
    Unloading,
}

pub struct WorldColonyController<C> {
    world: Box<dyn World>,
    saved_data: Rc<WorldSavedData>,
    factories: Rc<FactoryController>,
    colonies: HashMap<Token, C>,
    state: State,
}

impl<C: Colony> WorldColonyController<C> {
    pub fn new(world: Box<dyn World>, saved_data: Rc<WorldSavedData>, factories: Rc<FactoryController>) -> Self {
        Self {
            world,
            saved_data,
            factories,
            colonies: HashMap::new(),
            state: State::Unloaded,
        }
    }
    pub fn state(&self) -> State {
        self.state
    }
    pub fn world(&self) -> &dyn World {
        &*self.world
    }
    fn ready(&self) -> Result<()> {
        match self.state {
            State::Ready => Ok(()),
            state => Err(Error::NotReady(state)),
        }
    }

    /// Starts a dimension that has no saved colonies.
    pub fn initialize(&mut self) -> Result<()> {
        match self.state {
            State::Unloaded => {
                self.state = State::Ready;
                log::debug!("dimension {} starting without colonies", self.world.dimension());
                Ok(())
            }
            state => Err(Error::NotReady(state)),
        }
    }

    /// Adopts every colony in `nbt`.
    ///
    /// Either all entries are taken or none are: a single bad colony fails the
    /// whole load and leaves the manager as it was.
    pub fn load(&mut self, nbt: &Compound) -> Result<()> {
        let previous = match self.state {
            State::Unloaded | State::Ready => self.state,
            state => return Err(Error::NotReady(state)),
        };
        self.state = State::Loading;
        let staged = self.stage(nbt);
        self.state = previous;
        let staged = staged?;

        let count = staged.len();
        for colony in staged {
            if let Some(old) = self.colonies.insert(colony.id(), colony) {
                log::warn!("colony {} was loaded twice, keeping the later copy", old.id());
            }
        }
        self.state = State::Ready;
        log::info!("loaded {count} colonies in dimension {}", self.world.dimension());
        Ok(())
    }
    fn stage(&self, nbt: &Compound) -> Result<Vec<C>> {
        let expected = self.world.dimension();
        let found = *nbt::int(nbt, TAG_DIMENSION)?;
        if found != expected {
            return Err(Error::PartitionMismatch { expected, found });
        }
        nbt::compounds(nbt, TAG_COLONIES)?
            .map(|entry| {
                let colony = self.factories.deserialize::<C>(entry?)?;
                match colony.dimension() {
                    found if found == expected => Ok(colony),
                    found => Err(Error::PartitionMismatch { expected, found }),
                }
            })
            .collect()
    }

    pub fn save(&self) -> Result<Compound> {
        let colonies = self.colonies
            .values()
            .map(|c| self.factories.serialize(c).map(Value::Compound))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("saving {} colonies in dimension {}", colonies.len(), self.world.dimension());
        let mut nbt = Compound::new();
        nbt.insert(TAG_COLONIES.to_owned(), Value::List(colonies));
        nbt.insert(TAG_DIMENSION.to_owned(), Value::Int(self.world.dimension()));
        Ok(nbt)
    }

    /// Founds a colony at `pos` owned by `owner`.
    pub fn create_colony(&mut self, pos: BlockPos, owner: Uuid) -> Result<&C> {
        self.ready()?;
        let input = crate::colony::ColonyInput {
            dimension: self.world.dimension(),
            center: pos,
            owner,
        };
        let colony: C = self.factories
            .new_instance(input)
            .map_err(|e| Error::ColonyConstructionFailed(Box::new(e)))?;
        let id = colony.id();
        match self.colonies.entry(id) {
            Entry::Occupied(_) => {
                log::warn!("refusing to found a second colony under token {id}");
                Err(Error::TokenInUse(id))
            }
            Entry::Vacant(slot) => {
                log::info!("founded colony {id} at {pos} for {owner}");
                self.saved_data.mark_dirty();
                Ok(&*slot.insert(colony))
            }
        }
    }

    /// Removes the colony, then lets it clean up after itself.
    pub fn delete_colony(&mut self, id: &Token) -> Result<C> {
        self.ready()?;
        let mut colony = self.colonies.remove(id).ok_or(Error::UnknownToken(*id))?;
        if let Err(e) = colony.on_deletion() {
            log::warn!("colony {id} did not tear down cleanly: {e}");
        }
        self.mark_dirty();
        log::info!("deleted colony {id}");
        Ok(colony)
    }

    pub fn colony(&self, id: &Token) -> Option<&C> {
        self.colonies.get(id)
    }
    /// Mutable access marks the dimension dirty, whatever the caller ends up changing.
    pub fn colony_mut(&mut self, id: &Token) -> Option<&mut C> {
        let colony = self.colonies.get_mut(id)?;
        self.saved_data.mark_dirty();
        Some(colony)
    }
    pub fn colonies(&self) -> impl Iterator<Item = &C> {
        self.colonies.values()
    }
    pub fn len(&self) -> usize {
        self.colonies.len()
    }
    pub fn is_empty(&self) -> bool {
        self.colonies.is_empty()
    }

    // Overlapping territories or several colonies per owner make the lookups
    // below depend on map order. Nothing currently prevents either.

    pub fn colony_at(&self, pos: BlockPos) -> Option<&C> {
        self.colonies().find(|c| c.is_coord_in_colony(&*self.world, pos))
    }
    /// Ties go to whichever colony the map yields first.
    pub fn closest_colony(&self, pos: BlockPos) -> Option<&C> {
        self.colonies().min_by_key(|c| c.distance_sq(pos))
    }
    pub fn colony_by_owner(&self, owner: Uuid) -> Option<&C> {
        self.colonies().find(|c| c.owner() == owner)
    }
    pub fn colony_by_player(&self, player: &dyn Player) -> Option<&C> {
        self.colony_by_owner(crate::types::owner_identity(player, self.world.side()))
    }
    pub fn is_coord_in_any_colony(&self, pos: BlockPos) -> bool {
        self.colony_at(pos).is_some()
    }
    pub fn building(&self, pos: BlockPos) -> Option<&Building> {
        self.colony_at(pos)?.building(pos)
    }

    /// What a client needs to (re)build its view of one colony.
    pub fn sync_document(&self, id: &Token) -> Result<Compound> {
        let colony = self.colony(id).ok_or(Error::UnknownToken(*id))?;
        self.factories.serialize(colony)
    }

    pub fn mark_dirty(&self) {
        self.saved_data.mark_dirty();
    }
    pub fn is_dirty(&self) -> bool {
        self.saved_data.is_dirty()
    }

    /// Drops every colony without running deletion hooks; they still exist on disk.
    pub fn unload(mut self) {
        self.state = State::Unloading;
        let count = self.colonies.len();
        self.colonies.clear();
        log::debug!("unloaded {count} colonies from dimension {}", self.world.dimension());
    }
}
