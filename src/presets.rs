//! Presets for the simulation

use crate::settings::Settings;

pub struct Preset {
    pub name: String,
    pub settings: Settings,
}

impl Preset {
    pub fn new(name: String, settings: Settings) -> Self {
        Self { name, settings }
    }
}

pub struct PresetManager {
    presets: Vec<Preset>,
}

impl PresetManager {
    pub fn new() -> Self {
        Self { presets: vec![] }
    }

    pub fn add_preset(&mut self, preset: Preset) {
        self.presets.push(preset);
    }

    /// Look a preset up by name, ignoring ASCII case.
    pub fn get_preset(&self, name: &str) -> Option<&Preset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn get_preset_names(&self) -> Vec<String> {
        self.presets.iter().map(|p| p.name.clone()).collect()
    }
}

impl Default for PresetManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_preset_manager() -> PresetManager {
    let mut preset_manager = PresetManager::new();
    preset_manager.add_preset(Preset::new("Default".to_string(), Settings::default()));
    preset_manager.add_preset(Preset::new(
        "Maze".to_string(),
        Settings {
            obstacle_count: 35,
            obstacle_size: 8,
            food_count: 20,
            ant_count: 25,
            ..Settings::default()
        },
    ));
    preset_manager.add_preset(Preset::new(
        "Feast".to_string(),
        Settings {
            obstacle_count: 4,
            food_count: 150,
            food_stock: 3,
            ant_count: 40,
            ..Settings::default()
        },
    ));
    preset_manager.add_preset(Preset::new(
        "Markers".to_string(),
        Settings {
            trail_markers: true,
            ant_memory: 4,
            ..Settings::default()
        },
    ));

    preset_manager
}
