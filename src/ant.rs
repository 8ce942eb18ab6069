use crate::{
    position::Position, random::RandomSource, render::Appearance, terrain::Terrain,
    tile::TileKind,
};
use circular_queue::CircularQueue;
use log::trace;
use typed_builder::TypedBuilder;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AntMode {
    /// Searching for food, following food trails when there are any.
    Scavenging,
    /// Carrying food back down the nest distance field.
    Delivering,
}

#[derive(TypedBuilder)]
pub struct Ant {
    position: Position,
    #[builder(default = AntMode::Scavenging)]
    mode: AntMode,
    #[builder(default)]
    steps_from_nest: u32,
    // `None` while not carrying food
    #[builder(default)]
    steps_from_food: Option<u32>,
    // Armed when this ant took the last of a food pile
    #[builder(default)]
    erase_trail: bool,
    // Most recently visited positions, newest first
    #[builder(default = CircularQueue::with_capacity(1))]
    memory: CircularQueue<Position>,
}

impl Ant {
    /// A fresh scavenger at the nest remembering up to `memory` positions.
    pub fn at_nest(nest: Position, memory: usize) -> Self {
        Ant::builder()
            .position(nest)
            .memory(CircularQueue::with_capacity(memory.max(1)))
            .build()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn mode(&self) -> AntMode {
        self.mode
    }

    pub fn steps_from_nest(&self) -> u32 {
        self.steps_from_nest
    }

    pub fn steps_from_food(&self) -> Option<u32> {
        self.steps_from_food
    }

    pub fn is_erasing_trail(&self) -> bool {
        self.erase_trail
    }

    pub fn previous_position(&self) -> Option<Position> {
        self.memory.iter().next().copied()
    }

    pub fn appearance(&self) -> Appearance {
        Appearance::Ant(self.mode)
    }

    /// Sense, decide and move one cell. The destination is always taken from
    /// the terrain's adjacency table.
    pub fn update<R: RandomSource>(&mut self, terrain: &mut Terrain, rng: &mut R) {
        match terrain.kind(self.position) {
            Some(TileKind::Nest) => self.reached_nest(terrain.nest()),
            Some(TileKind::Food) => self.reached_food(terrain),
            _ => {}
        }

        terrain.step_on(self.position);

        self.add_steps(1);

        let destination = match self.mode {
            AntMode::Scavenging => self.scavenging_destination(terrain, rng),
            AntMode::Delivering => {
                let destination = self.delivery_destination(terrain);
                if self.erase_trail {
                    terrain.erase_food_trail(self.position);
                }
                destination
            }
        };

        let destination = match destination {
            Some(destination) => destination,
            None => {
                trace!("ant at {} is boxed in, staying put", self.position);
                return;
            }
        };

        if self.position.is_diagonal_to(&destination) {
            self.add_steps(1);
        }

        self.memory.push(self.position);
        self.position = destination;

        match self.mode {
            AntMode::Scavenging => self.update_nest_distance(terrain),
            AntMode::Delivering => {
                if let Some(steps_from_food) = self.steps_from_food {
                    terrain.set_food_distance(destination, steps_from_food);
                }
            }
        }
    }

    fn add_steps(&mut self, steps: u32) {
        self.steps_from_nest = self.steps_from_nest.saturating_add(steps);
        self.steps_from_food = self
            .steps_from_food
            .map(|steps_from_food| steps_from_food.saturating_add(steps));
    }

    fn reached_nest(&mut self, nest: Position) {
        trace!("ant reached the nest while {:?}", self.mode);
        self.steps_from_nest = 0;
        self.steps_from_food = None;
        self.memory.clear();
        self.memory.push(nest);
        self.mode = AntMode::Scavenging;
        self.erase_trail = false;
    }

    /// Also fires for a deliverer crossing another pile, so its breadcrumbs
    /// count from the nearest food.
    fn reached_food(&mut self, terrain: &mut Terrain) {
        trace!("ant found food at {} while {:?}", self.position, self.mode);
        self.steps_from_food = Some(0);

        if let Some(0) = terrain.eat_food(self.position) {
            self.erase_trail = true;
        }

        self.mode = AntMode::Delivering;
    }

    fn scavenging_destination<R: RandomSource>(
        &self,
        terrain: &Terrain,
        rng: &mut R,
    ) -> Option<Position> {
        let on_nest = self.position == terrain.nest();

        match self.food_trail_step(terrain) {
            Some(next) if !on_nest && !self.remembers(next) => {
                trace!("ant following food trail to {}", next);
                Some(next)
            }
            _ => self.random_step(terrain, rng),
        }
    }

    /// The neighbor with the strictly smallest food distance, if it improves
    /// on the food distance here.
    fn food_trail_step(&self, terrain: &Terrain) -> Option<Position> {
        let here = terrain.food_distance(self.position).unwrap_or(u32::MAX);

        terrain
            .neighbors(self.position)
            .iter()
            .filter_map(|neighbor| {
                terrain
                    .food_distance(*neighbor)
                    .map(|distance| (distance, *neighbor))
            })
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance < here)
            .map(|(_, neighbor)| neighbor)
    }

    /// A uniformly random neighbor other than the previous position, unless
    /// it's the only way out.
    fn random_step<R: RandomSource>(&self, terrain: &Terrain, rng: &mut R) -> Option<Position> {
        let neighbors = terrain.neighbors(self.position);

        if neighbors.len() <= 1 {
            return neighbors.first().copied();
        }

        let previous = self.previous_position();
        let candidates: Vec<_> = neighbors
            .iter()
            .copied()
            .filter(|neighbor| Some(*neighbor) != previous)
            .collect();

        Some(candidates[rng.pick_index(candidates.len())])
    }

    fn delivery_destination(&self, terrain: &Terrain) -> Option<Position> {
        terrain
            .neighbors(self.position)
            .iter()
            .copied()
            .min_by_key(|neighbor| terrain.nest_distance(*neighbor))
    }

    fn remembers(&self, position: Position) -> bool {
        self.memory.iter().any(|remembered| *remembered == position)
    }

    /// Snap to a better distance known by the cell, or teach the cell and
    /// its neighbors ours.
    fn update_nest_distance(&mut self, terrain: &mut Terrain) {
        let known = terrain.nest_distance(self.position);

        if self.steps_from_nest > known {
            self.steps_from_nest = known;
        } else {
            terrain.set_cells_nest_distance(self.position, self.steps_from_nest);
        }
    }
}
