use crate::{
    adjacency::{grid_ref_iter, Adjacency},
    errors::AntError,
    position::Position,
    rect::Rect,
    settings::Lifetimes,
    tile::{Food, Pheromone, Tile, TileKind},
};
use grid::Grid;
use log::debug;

/// How a delivering ant's breadcrumbs are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrailStyle {
    /// The food distance and its timer live on the plain cell.
    Scent,
    /// The cell is re-tagged as a [`Pheromone`] marker.
    Markers,
}

/// The grid of tiles plus everything derived from its layout: the adjacency
/// table, the nest, and the decay constants.
#[derive(Clone)]
pub struct Terrain {
    tiles: Grid<Tile>,
    adjacency: Adjacency,
    bounds: Rect<usize>,
    nest: Position,
    lifetimes: Lifetimes,
    trail_style: TrailStyle,
}

impl Terrain {
    pub fn new(
        width: usize,
        height: usize,
        nest: Position,
        lifetimes: Lifetimes,
        trail_style: TrailStyle,
    ) -> Result<Self, AntError> {
        let bounds = Rect::of_grid(width, height);

        if bounds.area() == 0 {
            return Err(AntError::InvalidSettings(format!(
                "grid must not be empty (got {}x{})",
                width, height
            )));
        }

        if !bounds.contains(&nest) {
            return Err(AntError::InvalidSettings(format!(
                "nest {} lies outside the {}x{} grid",
                nest, width, height
            )));
        }

        let mut tiles = Grid::from_vec(vec![Tile::default(); bounds.area()], width);
        tiles[nest.y][nest.x] = Tile::Nest;

        let mut terrain = Self {
            tiles,
            adjacency: Adjacency::build(width, height, |_| true),
            bounds,
            nest,
            lifetimes,
            trail_style,
        };
        terrain.rebuild_adjacency();

        Ok(terrain)
    }

    pub fn width(&self) -> usize {
        self.bounds.width
    }

    pub fn height(&self) -> usize {
        self.bounds.height
    }

    pub fn nest(&self) -> Position {
        self.nest
    }

    pub fn lifetimes(&self) -> &Lifetimes {
        &self.lifetimes
    }

    pub fn trail_style(&self) -> TrailStyle {
        self.trail_style
    }

    pub fn contains(&self, position: Position) -> bool {
        self.bounds.contains(&position)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(position.y, position.x)
    }

    /// Every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        grid_ref_iter(self.width(), self.height()).map(|(x, y)| Position::new(x, y))
    }

    pub fn neighbors(&self, position: Position) -> &[Position] {
        self.adjacency.neighbors(position)
    }

    pub fn kind(&self, position: Position) -> Option<TileKind> {
        self.tile(position).map(Tile::kind)
    }

    pub fn nest_distance(&self, position: Position) -> u32 {
        self.tile(position)
            .map(Tile::nest_distance)
            .unwrap_or(crate::tile::UNSET_DISTANCE)
    }

    pub fn food_distance(&self, position: Position) -> Option<u32> {
        self.tile(position).and_then(Tile::food_distance)
    }

    /// Swap in a new tile. Out-of-bounds positions are ignored.
    pub fn replace(&mut self, position: Position, tile: Tile) {
        if let Some(slot) = self.tiles.get_mut(position.y, position.x) {
            *slot = tile;
        }
    }

    /// Turn a position into an obstacle. The nest is never overwritten. The
    /// adjacency table is left stale until [`Terrain::rebuild_adjacency`].
    pub fn place_obstacle(&mut self, position: Position) -> bool {
        if position == self.nest || !self.contains(position) {
            return false;
        }

        self.replace(position, Tile::Obstacle);
        true
    }

    /// Put a pile of food anywhere except the nest.
    pub fn place_food(&mut self, position: Position, stock: u32) -> bool {
        if position == self.nest || !self.contains(position) {
            return false;
        }

        self.replace(position, Tile::Food(Food::new(stock)));
        true
    }

    pub fn rebuild_adjacency(&mut self) {
        let tiles = &self.tiles;
        self.adjacency = Adjacency::build(self.width(), self.height(), |position| {
            tiles
                .get(position.y, position.x)
                .map(Tile::is_passable)
                .unwrap_or(false)
        });
    }

    /// Lower the nest distance here to `distance` and offer every neighbor
    /// `distance + 1` (same row or column) or `distance + 2` (diagonal).
    pub fn set_cells_nest_distance(&mut self, position: Position, distance: u32) {
        let Self {
            tiles, adjacency, ..
        } = self;

        if let Some(tile) = tiles.get_mut(position.y, position.x) {
            tile.lower_nest_distance(distance);
        }

        for neighbor in adjacency.neighbors(position) {
            let cost = if position.is_diagonal_to(neighbor) { 2 } else { 1 };

            if let Some(tile) = tiles.get_mut(neighbor.y, neighbor.x) {
                tile.lower_nest_distance(distance.saturating_add(cost));
            }
        }
    }

    /// Record a food distance here and restart its trail timer. With
    /// [`TrailStyle::Markers`] a plain cell becomes a fresh pheromone and an
    /// existing pheromone is refreshed.
    pub fn set_food_distance(&mut self, position: Position, distance: u32) {
        let trail_duration = self.lifetimes.food_trail;
        let freshness = self.lifetimes.pheromone_freshness;
        let trail_style = self.trail_style;

        let tile = match self.tiles.get_mut(position.y, position.x) {
            Some(tile) => tile,
            None => return,
        };

        let marker = match (trail_style, &mut *tile) {
            (TrailStyle::Markers, Tile::Cell(cell)) => {
                let mut cell = cell.clone();
                cell.record_food_distance(distance, trail_duration);
                Some(Tile::Pheromone(Pheromone { cell, freshness }))
            }
            (TrailStyle::Markers, Tile::Pheromone(pheromone)) => {
                pheromone.cell.record_food_distance(distance, trail_duration);
                pheromone.freshness = freshness;
                None
            }
            (_, other) => {
                other.record_food_distance(distance, trail_duration);
                None
            }
        };

        if let Some(marker) = marker {
            *tile = marker;
        }
    }

    pub fn erase_food_trail(&mut self, position: Position) {
        if let Some(tile) = self.tiles.get_mut(position.y, position.x) {
            tile.erase_food_trail();
        }
    }

    pub fn step_on(&mut self, position: Position) {
        let step_duration = self.lifetimes.steps;

        if let Some(tile) = self.tiles.get_mut(position.y, position.x) {
            tile.step_on(step_duration);
        }
    }

    /// Take one unit of food. Returns the stock left, or `None` when there is
    /// no food here.
    pub fn eat_food(&mut self, position: Position) -> Option<u32> {
        match self.tiles.get_mut(position.y, position.x) {
            Some(Tile::Food(food)) => {
                let left = food.eat();
                if left == 0 {
                    debug!("food at {} has been depleted", position);
                }
                Some(left)
            }
            _ => None,
        }
    }

    /// Advance every tile by one tick, swapping in replacements as tiles
    /// change role.
    pub fn update(&mut self) {
        self.tiles.iter_mut().for_each(|tile| {
            if let Some(replacement) = tile.update() {
                *tile = replacement;
            }
        });
    }
}
