use crate::prelude::*;
use super::{Building, Colony, ColonyInput, MAX_RADIUS};

const TAG_ID: &str = "Id";
const TAG_NAME: &str = "Name";
const TAG_DIMENSION: &str = "Dimension";
const TAG_CENTER: &str = "Center";
const TAG_RADIUS: &str = "Radius";
const TAG_OWNER: &str = "Owner";
const TAG_BUILDINGS: &str = "Buildings";

const DEFAULT_NAME: &str = "New Colony";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardColony {
    id: Token,
    name: String,
    dimension: i32,
    center: BlockPos,
    radius: u32,
    owner: Uuid,
    buildings: Vec<Building>,
}
impl StandardColony {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
    pub fn center(&self) -> BlockPos {
        self.center
    }
    pub fn radius(&self) -> u32 {
        self.radius
    }
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }
    pub fn building_mut(&mut self, pos: BlockPos) -> Option<&mut Building> {
        self.buildings.iter_mut().find(|b| b.position() == pos)
    }
    fn in_territory(&self, pos: BlockPos) -> bool {
        let radius = self.radius as i128;
        self.center.distance_sq_2d(pos) <= radius * radius
    }
    /// Places a new building. `None` if the spot is taken or outside the territory.
    pub fn add_building(&mut self, controller: &FactoryController, pos: BlockPos, kind: impl Into<String>) -> Result<Option<&Building>> {
        if !self.in_territory(pos) || self.buildings.iter().any(|b| b.position() == pos) {
            return Ok(None);
        }
        let building: Building = controller.new_instance((pos, kind.into()))?;
        log::debug!("colony {} placed {} at {pos}", self.id, building.kind());
        self.buildings.push(building);
        Ok(self.buildings.last())
    }
    pub fn remove_building(&mut self, pos: BlockPos) -> Option<Building> {
        let idx = self.buildings.iter().position(|b| b.position() == pos)?;
        Some(self.buildings.swap_remove(idx))
    }
}

impl Constructable for StandardColony {
    const TYPE_ID: &'static str = "colonies:standard_colony";
    type Input = ColonyInput;
}

impl Colony for StandardColony {
    fn id(&self) -> Token {
        self.id
    }
    fn dimension(&self) -> i32 {
        self.dimension
    }
    fn is_coord_in_colony(&self, world: &dyn World, pos: BlockPos) -> bool {
        world.dimension() == self.dimension && self.in_territory(pos)
    }
    fn distance_sq(&self, pos: BlockPos) -> i128 {
        self.center.distance_sq(pos)
    }
    fn owner(&self) -> Uuid {
        self.owner
    }
    fn building(&self, pos: BlockPos) -> Option<&Building> {
        self.buildings.iter().find(|b| b.position() == pos)
    }
    fn on_deletion(&mut self) -> Result<()> {
        log::debug!("tearing down colony {} ({} buildings)", self.id, self.buildings.len());
        self.buildings.clear();
        Ok(())
    }
}

pub struct StandardColonyFactory {
    radius: u32,
}
impl StandardColonyFactory {
    /// `radius` is the territory given to newly founded colonies.
    pub fn new(radius: u32) -> Result<Self> {
        match radius {
            0..=MAX_RADIUS => Ok(Self { radius }),
            _ => Err(Error::RadiusOutOfRange(radius)),
        }
    }
}

impl Factory<StandardColony> for StandardColonyFactory {
    fn serialize(&self, controller: &FactoryController, colony: &StandardColony) -> Result<Compound> {
        let buildings = colony.buildings
            .iter()
            .map(|b| controller.serialize(b).map(Value::Compound))
            .collect::<Result<Vec<_>>>()?;
        let mut nbt = Compound::new();
        nbt.insert(TAG_ID.to_owned(), Value::Compound(controller.serialize(&colony.id)?));
        nbt.insert(TAG_NAME.to_owned(), Value::String(colony.name.clone()));
        nbt.insert(TAG_DIMENSION.to_owned(), Value::Int(colony.dimension));
        nbt.insert(TAG_CENTER.to_owned(), colony.center.to_nbt());
        let radius = i32::try_from(colony.radius).map_err(|_| Error::RadiusOutOfRange(colony.radius))?;
        nbt.insert(TAG_RADIUS.to_owned(), Value::Int(radius));
        nbt.insert(TAG_OWNER.to_owned(), crate::token::uuid_to_nbt(colony.owner));
        nbt.insert(TAG_BUILDINGS.to_owned(), Value::List(buildings));
        Ok(nbt)
    }
    fn deserialize(&self, controller: &FactoryController, nbt: &Compound) -> Result<StandardColony> {
        let radius = u32::try_from(*nbt::int(nbt, TAG_RADIUS)?)
            .map_err(|_| Error::malformed(TAG_RADIUS, "is negative"))?;
        if radius > MAX_RADIUS {
            return Err(Error::malformed(TAG_RADIUS, "reaches past the world border"));
        }
        let buildings = nbt::compounds(nbt, TAG_BUILDINGS)?
            .map(|b| controller.deserialize(b?))
            .collect::<Result<Vec<Building>>>()?;
        Ok(StandardColony {
            id: controller.deserialize(nbt::compound(nbt, TAG_ID)?)?,
            name: nbt::string(nbt, TAG_NAME)?.clone(),
            dimension: *nbt::int(nbt, TAG_DIMENSION)?,
            center: BlockPos::from_nbt(TAG_CENTER, nbt::value(nbt, TAG_CENTER)?)?,
            radius,
            owner: crate::token::uuid_from_nbt(nbt, TAG_OWNER)?,
            buildings,
        })
    }
    fn new_instance(&self, controller: &FactoryController, input: ColonyInput) -> Result<StandardColony> {
        Ok(StandardColony {
            id: controller.new_instance(Uuid::new_v4())?,
            name: DEFAULT_NAME.to_owned(),
            dimension: input.dimension,
            center: input.center,
            radius: self.radius,
            owner: input.owner,
            buildings: vec![],
        })
    }
}
