use colonies::colony::{self, Colony, StandardColony};
use colonies::types::{Dimension, V3};
use colonies::{Config, Token, WorldColonyController, WorldSavedData};
use std::process::ExitCode;

const USAGE: &str = "usage: colonies <save-dir> [list | create <x> <y> <z> <owner-uuid> | delete <colony-id>]";

enum Command {
    List,
    Create(V3<i32>, uuid::Uuid),
    Delete(Token),
}
fn parse_command(mut args: impl Iterator<Item = String>) -> Option<Command> {
    match args.next().as_deref() {
        None | Some("list") => Some(Command::List),
        Some("create") => {
            let mut coord = || args.next()?.parse::<i32>().ok();
            let pos = V3(coord()?, coord()?, coord()?);
            let owner = args.next()?.parse().ok()?;
            Some(Command::Create(pos, owner))
        }
        Some("delete") => Some(Command::Delete(args.next()?.parse().ok()?)),
        Some(_) => None,
    }
}

fn run(save_dir: std::path::PathBuf, command: Command) -> colonies::Result<()> {
    let config = Config::load(&save_dir)?;
    let mut builder = colonies::FactoryControllerBuilder::new();
    colony::register_standard(&mut builder, &config)?;
    let factories = builder.build();

    let saved_data = WorldSavedData::new();
    let mut manager = WorldColonyController::<StandardColony>::new(
        Box::new(Dimension::server(config.dimension)),
        saved_data.clone(),
        factories,
    );
    let path = config.save_path(&save_dir);
    match WorldSavedData::read(&path)? {
        Some(nbt) => manager.load(&nbt)?,
        None => manager.initialize()?,
    }

    match command {
        Command::List => {
            let listing: Vec<_> = manager.colonies().map(|c| serde_json::json!({
                "id": c.id().to_string(),
                "name": c.name(),
                "center": [c.center().x, c.center().y, c.center().z],
                "radius": c.radius(),
                "owner": c.owner().to_string(),
                "buildings": c.buildings().len(),
            })).collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Command::Create(pos, owner) => {
            let id = manager.create_colony(pos, owner)?.id();
            println!("{id}");
        }
        Command::Delete(id) => {
            manager.delete_colony(&id)?;
        }
    }
    saved_data.save_if_dirty(&path, &manager)?;
    manager.unload();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let (Some(save_dir), Some(command)) = (args.next(), parse_command(args)) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    match run(save_dir.into(), command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("colonies: {e}");
            ExitCode::FAILURE
        }
    }
}
