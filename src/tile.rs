//! The entities that occupy grid positions.
//!
//! Every position holds exactly one [`Tile`]. When a tile changes role it is
//! replaced wholesale: [`Tile::update`] hands back the replacement and the
//! terrain swaps it in.

use crate::render::Appearance;

/// Nest distance of a cell no ant has measured yet.
pub const UNSET_DISTANCE: u32 = u32::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Cell,
    Obstacle,
    Nest,
    Food,
    Pheromone,
}

/// Distance fields and traffic bookkeeping carried by every passable tile
/// other than the nest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellState {
    pub nest_distance: u32,
    pub food_distance: Option<u32>,
    /// Ticks left before `food_distance` is forgotten.
    pub food_trail_duration: u32,
    /// Visit count.
    pub steps: u32,
    /// Ticks left before `steps` starts evaporating.
    pub step_duration: u32,
}

impl Default for CellState {
    fn default() -> Self {
        Self {
            nest_distance: UNSET_DISTANCE,
            food_distance: None,
            food_trail_duration: 0,
            steps: 0,
            step_duration: 0,
        }
    }
}

impl CellState {
    pub fn with_steps(steps: u32) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    pub fn lower_nest_distance(&mut self, distance: u32) {
        self.nest_distance = self.nest_distance.min(distance);
    }

    pub fn record_food_distance(&mut self, distance: u32, trail_duration: u32) {
        self.food_distance = Some(match self.food_distance {
            Some(current) => current.min(distance),
            None => distance,
        });
        self.food_trail_duration = trail_duration;
    }

    pub fn erase_food_trail(&mut self) {
        self.food_trail_duration = 0;
    }

    pub fn add_step(&mut self, step_duration: u32) {
        self.step_duration = step_duration;
        self.steps = self.steps.saturating_add(1);
    }

    pub fn decay_steps(&mut self) {
        if self.step_duration == 0 {
            self.steps = self.steps.saturating_sub(1);
        } else {
            self.step_duration -= 1;
        }
    }

    pub fn decay_food_trail(&mut self) {
        self.food_trail_duration = self.food_trail_duration.saturating_sub(1);

        if self.food_trail_duration == 0 {
            self.food_distance = None;
        }
    }

    pub fn has_food_trail(&self) -> bool {
        self.food_trail_duration > 0
    }
}

/// A finite pile of food. Anchors the food distance field at zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub stock: u32,
    pub cell: CellState,
}

impl Food {
    pub fn new(stock: u32) -> Self {
        Self {
            stock,
            cell: CellState::default(),
        }
    }

    /// Take one unit, returning what is left.
    pub fn eat(&mut self) -> u32 {
        self.stock = self.stock.saturating_sub(1);
        self.stock
    }

    pub fn is_depleted(&self) -> bool {
        self.stock == 0
    }
}

/// A trail marker. Keeps the state of the cell it was laid on and reverts to
/// that cell once its freshness runs out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pheromone {
    pub cell: CellState,
    pub freshness: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tile {
    Cell(CellState),
    Obstacle,
    Nest,
    Food(Food),
    Pheromone(Pheromone),
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Cell(CellState::default())
    }
}

impl Tile {
    pub fn kind(&self) -> TileKind {
        match self {
            Tile::Cell(_) => TileKind::Cell,
            Tile::Obstacle => TileKind::Obstacle,
            Tile::Nest => TileKind::Nest,
            Tile::Food(_) => TileKind::Food,
            Tile::Pheromone(_) => TileKind::Pheromone,
        }
    }

    pub fn is_passable(&self) -> bool {
        !matches!(self, Tile::Obstacle)
    }

    fn cell(&self) -> Option<&CellState> {
        match self {
            Tile::Cell(cell) => Some(cell),
            Tile::Food(food) => Some(&food.cell),
            Tile::Pheromone(pheromone) => Some(&pheromone.cell),
            Tile::Obstacle | Tile::Nest => None,
        }
    }

    fn cell_mut(&mut self) -> Option<&mut CellState> {
        match self {
            Tile::Cell(cell) => Some(cell),
            Tile::Food(food) => Some(&mut food.cell),
            Tile::Pheromone(pheromone) => Some(&mut pheromone.cell),
            Tile::Obstacle | Tile::Nest => None,
        }
    }

    pub fn nest_distance(&self) -> u32 {
        match self {
            Tile::Nest => 0,
            _ => self
                .cell()
                .map(|cell| cell.nest_distance)
                .unwrap_or(UNSET_DISTANCE),
        }
    }

    /// The nest is never a food source and food is always its own source.
    pub fn food_distance(&self) -> Option<u32> {
        match self {
            Tile::Food(_) => Some(0),
            Tile::Nest | Tile::Obstacle => None,
            _ => self.cell().and_then(|cell| cell.food_distance),
        }
    }

    pub fn steps(&self) -> u32 {
        self.cell().map(|cell| cell.steps).unwrap_or(0)
    }

    pub fn lower_nest_distance(&mut self, distance: u32) {
        if let Some(cell) = self.cell_mut() {
            cell.lower_nest_distance(distance);
        }
    }

    /// Food keeps its zero anchor, the nest and obstacles ignore the write.
    pub fn record_food_distance(&mut self, distance: u32, trail_duration: u32) {
        match self {
            Tile::Cell(cell) => cell.record_food_distance(distance, trail_duration),
            Tile::Pheromone(pheromone) => {
                pheromone.cell.record_food_distance(distance, trail_duration)
            }
            Tile::Food(_) | Tile::Nest | Tile::Obstacle => {}
        }
    }

    pub fn erase_food_trail(&mut self) {
        match self {
            Tile::Cell(cell) => cell.erase_food_trail(),
            Tile::Pheromone(pheromone) => {
                pheromone.freshness = 0;
                pheromone.cell.erase_food_trail();
            }
            Tile::Food(_) | Tile::Nest | Tile::Obstacle => {}
        }
    }

    /// The nest is immune to traffic.
    pub fn step_on(&mut self, step_duration: u32) {
        if let Some(cell) = self.cell_mut() {
            cell.add_step(step_duration);
        }
    }

    /// Advance this tile by one tick. Returns the tile that should take its
    /// place when its role has ended.
    pub fn update(&mut self) -> Option<Tile> {
        match self {
            Tile::Cell(cell) => {
                cell.decay_steps();
                cell.decay_food_trail();
                None
            }
            Tile::Food(food) if food.is_depleted() => {
                let mut cell = food.cell.clone();
                cell.food_distance = None;
                cell.food_trail_duration = 0;
                Some(Tile::Cell(cell))
            }
            Tile::Pheromone(pheromone) if pheromone.freshness == 0 => {
                let mut cell = pheromone.cell.clone();
                // An erased or faded trail must not outlive the marker
                if !cell.has_food_trail() {
                    cell.food_distance = None;
                }
                Some(Tile::Cell(cell))
            }
            Tile::Pheromone(pheromone) => {
                pheromone.freshness -= 1;
                pheromone.cell.decay_steps();
                pheromone.cell.decay_food_trail();
                None
            }
            Tile::Food(_) | Tile::Nest | Tile::Obstacle => None,
        }
    }

    pub fn appearance(&self) -> Appearance {
        match self {
            Tile::Cell(cell) if cell.has_food_trail() => Appearance::Trail,
            Tile::Cell(cell) => Appearance::Ground { steps: cell.steps },
            Tile::Pheromone(_) => Appearance::Trail,
            Tile::Obstacle => Appearance::Obstacle,
            Tile::Nest => Appearance::Nest,
            Tile::Food(_) => Appearance::Food,
        }
    }
}
