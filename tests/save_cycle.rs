use colonies::colony::{self, Colony, StandardColony};
use colonies::types::{Dimension, V3};
use colonies::{Config, Error, FactoryControllerBuilder, WorldColonyController, WorldSavedData};
use uuid::Uuid;

fn open(config: &Config, dir: &std::path::Path) -> colonies::Result<(WorldColonyController<StandardColony>, std::rc::Rc<WorldSavedData>)> {
    let mut builder = FactoryControllerBuilder::new();
    colony::register_standard(&mut builder, config)?;
    let saved_data = WorldSavedData::new();
    let mut manager = WorldColonyController::new(Box::new(Dimension::server(config.dimension)), saved_data.clone(), builder.build());
    match WorldSavedData::read(config.save_path(dir))? {
        Some(nbt) => manager.load(&nbt)?,
        None => manager.initialize()?,
    }
    Ok((manager, saved_data))
}

#[test]
fn only_dirty_dimensions_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let path = config.save_path(dir.path());

    let (mut manager, saved_data) = open(&config, dir.path()).unwrap();
    assert!(!saved_data.save_if_dirty(&path, &manager).unwrap());
    assert!(!path.exists());

    let id = manager.create_colony(V3(64, 70, -64), Uuid::from_u128(1)).unwrap().id();
    assert!(saved_data.save_if_dirty(&path, &manager).unwrap());
    assert!(!saved_data.is_dirty());
    assert!(!saved_data.save_if_dirty(&path, &manager).unwrap());
    manager.unload();

    let (reopened, saved_data) = open(&config, dir.path()).unwrap();
    assert!(!saved_data.is_dirty());
    let colony = reopened.colony(&id).unwrap();
    assert_eq!(colony.center(), V3(64, 70, -64));
    assert_eq!(colony.owner(), Uuid::from_u128(1));
    assert_eq!(colony.radius(), config.colony_radius);
}

#[test]
fn save_from_another_dimension_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let overworld = Config::default();
    let (mut manager, saved_data) = open(&overworld, dir.path()).unwrap();
    manager.create_colony(V3(0, 64, 0), Uuid::from_u128(1)).unwrap();
    saved_data.save_if_dirty(overworld.save_path(dir.path()), &manager).unwrap();

    // the end's manager pointed at the overworld's file
    let end = Config { dimension: 1, ..Config::default() };
    std::fs::rename(overworld.save_path(dir.path()), end.save_path(dir.path())).unwrap();
    assert!(matches!(
        open(&end, dir.path()),
        Err(Error::PartitionMismatch { expected: 1, found: 0 })
    ));
}

#[test]
fn widest_radius_survives_the_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config { colony_radius: colony::MAX_RADIUS, ..Config::default() };
    let (mut manager, saved_data) = open(&config, dir.path()).unwrap();
    let id = manager.create_colony(V3(0, 64, 0), Uuid::from_u128(1)).unwrap().id();
    saved_data.save_if_dirty(config.save_path(dir.path()), &manager).unwrap();
    manager.unload();

    let (reopened, _) = open(&config, dir.path()).unwrap();
    assert_eq!(reopened.colony(&id).map(|c| c.radius()), Some(colony::MAX_RADIUS));
    assert!(reopened.is_coord_in_any_colony(V3(colony::MAX_RADIUS as i32, 0, 0)));
}

#[test]
fn radius_past_the_world_border_never_reaches_a_save() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config { colony_radius: 3_000_000_000, ..Config::default() };
    assert!(matches!(open(&config, dir.path()), Err(Error::RadiusOutOfRange(3_000_000_000))));
    assert!(!config.save_path(dir.path()).exists());
}
