use ant_colony::{
    presets::init_preset_manager,
    settings::{Settings, DEFAULT_SETTINGS_FILE},
    AntError, AntMode, FrameCanvas, TileKind, World,
};
use log::{info, warn};
use std::path::Path;

const DEFAULT_FRAME_FILE: &str = "colony.png";

/// Usage: `ant-colony [PRESET | SETTINGS_FILE] [FRAME.png]`
fn main() -> Result<(), AntError> {
    dotenv::dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = resolve_settings(args.next())?;
    let frame_file = args
        .next()
        .unwrap_or_else(|| DEFAULT_FRAME_FILE.to_string());

    let mut world = World::generate(&settings)?;

    let mut canvas = FrameCanvas::new(
        settings.grid_width,
        settings.grid_height,
        settings.cell_size,
    )?;
    world.render_full(&mut canvas);

    world.fast_forward(settings.fast_forward_ticks);
    world.render(&mut canvas);

    let delivering = world
        .ants()
        .iter()
        .filter(|ant| ant.mode() == AntMode::Delivering)
        .count();
    info!(
        "after {} ticks: {} of {} ants delivering, {} food piles holding {} units",
        world.tick(),
        delivering,
        world.ants().len(),
        world.count_kind(TileKind::Food),
        world.food_left()
    );

    canvas.save(&frame_file)?;
    info!("wrote frame to '{}'", frame_file);

    Ok(())
}

fn resolve_settings(choice: Option<String>) -> Result<Settings, AntError> {
    let preset_manager = init_preset_manager();

    match choice {
        Some(name) => match preset_manager.get_preset(&name) {
            Some(preset) => {
                info!("using preset '{}'", preset.name);
                Ok(preset.settings.clone())
            }
            None => Settings::load_from_file(&name),
        },
        None if Path::new(&format!("{}.toml", DEFAULT_SETTINGS_FILE)).exists() => {
            Settings::load_from_file(DEFAULT_SETTINGS_FILE)
        }
        None => {
            warn!(
                "no settings given, using defaults (presets: {})",
                preset_manager.get_preset_names().join(", ")
            );
            Ok(Settings::default())
        }
    }
}
