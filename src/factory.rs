//! Polymorphic (de)serialization of domain objects.
//!
//! Every type that can be saved implements [`Constructable`], naming a stable
//! discriminator, and some [`Factory`] for it is registered on a
//! [`FactoryControllerBuilder`] during startup. Building the controller closes
//! registration, so the table is fixed before the first document is read.
//!
//! Serialized objects are wrapped in an envelope naming their type:
//! `{ Type: "<discriminator>", Data: { ...factory payload... } }`.
use crate::prelude::*;
use std::any::Any;
use std::collections::HashMap;

const TAG_TYPE: &str = "Type";
const TAG_DATA: &str = "Data";

/// A domain type the controller can produce.
pub trait Constructable: Sized + 'static {
    /// Written into every envelope and used to pick the factory when reading.
    /// Changing it orphans existing saves.
    const TYPE_ID: &'static str;
    /// What a factory needs to build a brand new instance.
    type Input;
}

pub trait Factory<T: Constructable> {
    /// Writes the payload only; the controller adds the envelope.
    fn serialize(&self, controller: &FactoryController, value: &T) -> Result<Compound>;
    fn deserialize(&self, controller: &FactoryController, nbt: &Compound) -> Result<T>;
    fn new_instance(&self, controller: &FactoryController, input: T::Input) -> Result<T>;
}

/// Registration phase of the controller.
#[derive(Default)]
pub struct FactoryControllerBuilder {
    // values are `Box<dyn Factory<T>>` for the `T` whose TYPE_ID is the key
    factories: HashMap<&'static str, Box<dyn Any>>,
}
impl FactoryControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    /// Fails if something already produces `T`. The earlier factory stays.
    pub fn register<T: Constructable>(&mut self, factory: impl Factory<T> + 'static) -> Result<&mut Self> {
        if self.factories.contains_key(T::TYPE_ID) {
            return Err(Error::DuplicateRegistration(T::TYPE_ID));
        }
        let factory: Box<dyn Factory<T>> = Box::new(factory);
        self.factories.insert(T::TYPE_ID, Box::new(factory));
        log::debug!("registered factory for {}", T::TYPE_ID);
        Ok(self)
    }
    pub fn build(self) -> Rc<FactoryController> {
        let controller = FactoryController { factories: self.factories };
        log::debug!("factory registration closed: {:?}", controller.registered());
        Rc::new(controller)
    }
}

pub struct FactoryController {
    factories: HashMap<&'static str, Box<dyn Any>>,
}
impl FactoryController {
    fn factory<T: Constructable>(&self) -> Result<&dyn Factory<T>> {
        self.factories
            .get(T::TYPE_ID)
            .and_then(|f| f.downcast_ref::<Box<dyn Factory<T>>>())
            .map(|f| &**f)
            .ok_or_else(|| Error::UnknownType(T::TYPE_ID.to_owned()))
    }
    pub fn is_registered(&self, type_id: &str) -> bool {
        self.factories.contains_key(type_id)
    }
    pub fn registered(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.factories.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn serialize<T: Constructable>(&self, value: &T) -> Result<Compound> {
        let data = self.factory::<T>()?.serialize(self, value)?;
        log::trace!("serialized {}", T::TYPE_ID);
        let mut nbt = Compound::new();
        nbt.insert(TAG_TYPE.to_owned(), Value::String(T::TYPE_ID.to_owned()));
        nbt.insert(TAG_DATA.to_owned(), Value::Compound(data));
        Ok(nbt)
    }
    /// The discriminator of an envelope, without decoding the payload.
    pub fn peek_type<'a>(&self, nbt: &'a Compound) -> Result<&'a str> {
        Ok(nbt::string(nbt, TAG_TYPE)?)
    }
    pub fn deserialize<T: Constructable>(&self, nbt: &Compound) -> Result<T> {
        let type_id = self.peek_type(nbt)?;
        if type_id != T::TYPE_ID {
            // registered or not, this envelope can't become a `T`
            return Err(Error::UnknownType(type_id.to_owned()));
        }
        let data = nbt::compound(nbt, TAG_DATA)?;
        let value = self.factory::<T>()?.deserialize(self, data)?;
        log::trace!("deserialized {type_id}");
        Ok(value)
    }
    pub fn new_instance<T: Constructable>(&self, input: T::Input) -> Result<T> {
        self.factory::<T>()?.new_instance(self, input)
    }
}
impl std::fmt::Debug for FactoryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryController")
            .field("registered", &self.registered())
            .finish()
    }
}
