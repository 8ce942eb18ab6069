pub mod adjacency;
pub mod ant;
pub mod errors;
pub mod position;
pub mod presets;
pub mod random;
pub mod rect;
pub mod render;
pub mod settings;
pub mod terrain;
pub mod tile;
pub mod util;
pub mod world;

pub use ant::{Ant, AntMode};
pub use errors::AntError;
pub use position::Position;
pub use random::{RandomSource, ScriptedRandom};
pub use render::{Appearance, Canvas, FrameCanvas, Palette};
pub use settings::Settings;
pub use terrain::{Terrain, TrailStyle};
pub use tile::{Tile, TileKind};
pub use world::World;
