use crate::{errors::AntError, position::Position, terrain::TrailStyle, util::ticks_for_grid};
use log::info;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "settings";

// Grid settings
pub const GRID_WIDTH: usize = 50;
pub const GRID_HEIGHT: usize = 50;
pub const NEST_X: usize = 25;
pub const NEST_Y: usize = 25;

// Colony settings
pub const ANT_COUNT: usize = 10;
pub const ANT_MEMORY: usize = 1;
pub const FOOD_COUNT: usize = 50;
pub const FOOD_STOCK: u32 = 10;

// Obstacle settings
pub const OBSTACLE_COUNT: usize = 10;
pub const OBSTACLE_SIZE: usize = 5;
pub const MAX_WORLD_ATTEMPTS: usize = 100;

// Decay settings, each scaled by the longer side of the grid
pub const STEP_DURATION_SCALE: f64 = 10.0;
pub const FOOD_TRAIL_SCALE: f64 = 1.5;
pub const PHEROMONE_FRESHNESS_SCALE: f64 = 2.0;

// Driver settings
pub const CELL_SIZE: u32 = 9;
pub const FAST_FORWARD_TICKS: usize = 1000;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub grid_width: usize,
    pub grid_height: usize,
    pub nest_x: usize,
    pub nest_y: usize,
    pub ant_count: usize,
    /// How many recently visited positions an ant refuses to follow a trail back onto.
    pub ant_memory: usize,
    pub food_count: usize,
    pub food_stock: u32,
    pub obstacle_count: usize,
    /// Random-walk expansions per obstacle cluster.
    pub obstacle_size: usize,
    pub max_world_attempts: usize,
    /// Lay trails as pheromone marker tiles instead of scent on plain cells.
    pub trail_markers: bool,
    pub step_duration_scale: f64,
    pub food_trail_scale: f64,
    pub pheromone_freshness_scale: f64,
    pub seed: Option<u64>,
    pub cell_size: u32,
    pub fast_forward_ticks: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            nest_x: NEST_X,
            nest_y: NEST_Y,
            ant_count: ANT_COUNT,
            ant_memory: ANT_MEMORY,
            food_count: FOOD_COUNT,
            food_stock: FOOD_STOCK,
            obstacle_count: OBSTACLE_COUNT,
            obstacle_size: OBSTACLE_SIZE,
            max_world_attempts: MAX_WORLD_ATTEMPTS,
            trail_markers: false,
            step_duration_scale: STEP_DURATION_SCALE,
            food_trail_scale: FOOD_TRAIL_SCALE,
            pheromone_freshness_scale: PHEROMONE_FRESHNESS_SCALE,
            seed: None,
            cell_size: CELL_SIZE,
            fast_forward_ticks: FAST_FORWARD_TICKS,
        }
    }
}

impl Settings {
    pub fn load_from_file(settings_file_name: &str) -> Result<Self, AntError> {
        let mut settings = config::Config::default();
        settings.merge(config::File::with_name(settings_file_name))?;
        let settings: Self = settings.try_into()?;
        settings.validate()?;

        info!(
            "successfully loaded settings from '{}'",
            &settings_file_name
        );

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AntError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(AntError::InvalidSettings(format!(
                "grid must not be empty (got {}x{})",
                self.grid_width, self.grid_height
            )));
        }

        if self.nest_x >= self.grid_width || self.nest_y >= self.grid_height {
            return Err(AntError::InvalidSettings(format!(
                "nest {} lies outside the {}x{} grid",
                self.nest(),
                self.grid_width,
                self.grid_height
            )));
        }

        if self.food_count > 0 && self.grid_width * self.grid_height < 2 {
            return Err(AntError::InvalidSettings(
                "there is no room for food besides the nest".to_string(),
            ));
        }

        if self.max_world_attempts == 0 {
            return Err(AntError::InvalidSettings(
                "at least one world construction attempt is required".to_string(),
            ));
        }

        Ok(())
    }

    pub fn nest(&self) -> Position {
        Position::new(self.nest_x, self.nest_y)
    }

    pub fn trail_style(&self) -> TrailStyle {
        if self.trail_markers {
            TrailStyle::Markers
        } else {
            TrailStyle::Scent
        }
    }

    pub fn lifetimes(&self) -> Lifetimes {
        Lifetimes::from_settings(self)
    }
}

/// Decay constants, in ticks, fixed for the life of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifetimes {
    /// Ticks a visited cell keeps its traffic before it starts evaporating.
    pub steps: u32,
    /// Ticks a food distance survives without reinforcement.
    pub food_trail: u32,
    pub pheromone_freshness: u32,
}

impl Lifetimes {
    pub fn from_settings(settings: &Settings) -> Self {
        let (width, height) = (settings.grid_width, settings.grid_height);

        Self {
            steps: ticks_for_grid(width, height, settings.step_duration_scale),
            food_trail: ticks_for_grid(width, height, settings.food_trail_scale),
            pheromone_freshness: ticks_for_grid(width, height, settings.pheromone_freshness_scale),
        }
    }
}
