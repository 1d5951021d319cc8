//! Colony management core: token-indexed colonies, per dimension, persisted as NBT.
//!
//! The moving parts, leaves first:
//! - [`Token`]: the identity of anything that outlives a save/load cycle.
//! - [`factory`]: turns registered types into tagged NBT compounds and back.
//! - [`colony`]: what a colony has to offer the manager, and the standard colony.
//! - [`management`]: the per-dimension colony manager, its save data, and client views.
//!
//! Everything is driven from the world tick thread. Nothing in here locks,
//! blocks or spawns; file IO only happens when the host asks for it.
mod error;
pub mod types;
pub mod nbt;
pub mod token;
pub mod factory;
pub mod colony;
pub mod management;
mod config;

pub use error::{Error, Result};
pub use config::{Config, CONFIG_FILE};
pub use token::Token;
pub use factory::{FactoryController, FactoryControllerBuilder};
pub use management::{WorldColonyController, WorldSavedData, ColonyViews};

mod prelude {
    pub(crate) use crate::error::{Error, Result};
    pub(crate) use crate::factory::{Constructable, Factory, FactoryController, FactoryControllerBuilder};
    pub(crate) use crate::nbt::{self, Compound};
    pub(crate) use crate::token::Token;
    pub(crate) use crate::types::*;
    pub(crate) use fastnbt::{IntArray, Value};
    pub(crate) use std::io;
    pub(crate) use std::rc::Rc;
    pub(crate) use uuid::Uuid;
}
