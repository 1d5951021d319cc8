use crate::prelude::*;

const TAG_ID: &str = "Id";
const TAG_POSITION: &str = "Position";
const TAG_KIND: &str = "Kind";
const TAG_LEVEL: &str = "Level";

pub const MAX_LEVEL: u8 = 5;

/// A building placed inside a colony. Level 0 means placed but not yet built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Building {
    id: Token,
    position: BlockPos,
    kind: String,
    level: u8,
}
impl Building {
    pub fn id(&self) -> Token {
        self.id
    }
    pub fn position(&self) -> BlockPos {
        self.position
    }
    pub fn kind(&self) -> &str {
        &self.kind
    }
    pub fn level(&self) -> u8 {
        self.level
    }
    /// Returns false once the building is maxed out.
    pub fn upgrade(&mut self) -> bool {
        if self.level < MAX_LEVEL {
            self.level += 1;
            true
        } else {
            false
        }
    }
}

impl Constructable for Building {
    const TYPE_ID: &'static str = "colonies:building";
    type Input = (BlockPos, String);
}

pub struct BuildingFactory;

impl Factory<Building> for BuildingFactory {
    fn serialize(&self, controller: &FactoryController, building: &Building) -> Result<Compound> {
        let mut nbt = Compound::new();
        nbt.insert(TAG_ID.to_owned(), Value::Compound(controller.serialize(&building.id)?));
        nbt.insert(TAG_POSITION.to_owned(), building.position.to_nbt());
        nbt.insert(TAG_KIND.to_owned(), Value::String(building.kind.clone()));
        nbt.insert(TAG_LEVEL.to_owned(), Value::Byte(building.level as i8));
        Ok(nbt)
    }
    fn deserialize(&self, controller: &FactoryController, nbt: &Compound) -> Result<Building> {
        let level = *nbt::byte(nbt, TAG_LEVEL)?;
        let level = u8::try_from(level)
            .ok()
            .filter(|l| *l <= MAX_LEVEL)
            .ok_or(Error::malformed(TAG_LEVEL, "is out of range"))?;
        Ok(Building {
            id: controller.deserialize(nbt::compound(nbt, TAG_ID)?)?,
            position: BlockPos::from_nbt(TAG_POSITION, nbt::value(nbt, TAG_POSITION)?)?,
            kind: nbt::string(nbt, TAG_KIND)?.clone(),
            level,
        })
    }
    fn new_instance(&self, controller: &FactoryController, (position, kind): (BlockPos, String)) -> Result<Building> {
        Ok(Building {
            id: controller.new_instance(Uuid::new_v4())?,
            position,
            kind,
            level: 0,
        })
    }
}
