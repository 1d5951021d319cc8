use crate::prelude::*;
use crate::colony::Colony;
use std::cell::Cell;
use std::io::{Read, Write};
use std::path::Path;

/// Durability boundary for one dimension's colonies.
///
/// Tracks whether anything changed since the last save and knows how to move
/// the colony document to and from disk (gzip'd NBT, like level.dat). It never
/// decides on its own when to save; the host calls [`Self::save_if_dirty`].
#[derive(Debug, Default)]
pub struct WorldSavedData {
    dirty: Cell<bool>,
}
impl WorldSavedData {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }
    pub fn set_clean(&self) {
        self.dirty.set(false);
    }

    /// `None` if nothing was ever saved for this dimension.
    pub fn read(path: impl AsRef<Path>) -> Result<Option<Compound>> {
        let file = match std::fs::File::open(path.as_ref()) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut buf = vec![];
        flate2::read::GzDecoder::new(file).read_to_end(&mut buf)?;
        log::trace!("read {}kb of colony data from {}", buf.len() as f64 / 1024.0, path.as_ref().display());
        nbt::from_bytes(&buf).map(Some)
    }
    /// Writes next to `path` first so a crash mid-save can't eat the old file.
    pub fn write(path: impl AsRef<Path>, nbt: &Compound) -> Result<()> {
        let path = path.as_ref();
        let bytes = nbt::to_bytes(nbt)?;
        let tmp = path.with_extension("dat_tmp");
        let mut encoder = flate2::write::GzEncoder::new(std::fs::File::create(&tmp)?, flate2::Compression::default());
        encoder.write_all(&bytes)?;
        encoder.finish()?.sync_all()?;
        std::fs::rename(&tmp, path)?;
        log::trace!("wrote {}kb of colony data to {}", bytes.len() as f64 / 1024.0, path.display());
        Ok(())
    }
    /// Returns whether anything was written.
    pub fn save_if_dirty<C: Colony>(&self, path: impl AsRef<Path>, colonies: &super::WorldColonyController<C>) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        Self::write(path, &colonies.save()?)?;
        self.set_clean();
        log::info!("saved {} colonies in dimension {}", colonies.len(), colonies.world().dimension());
        Ok(true)
    }
}
