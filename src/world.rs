use crate::{
    ant::Ant,
    errors::AntError,
    position::Position,
    random::RandomSource,
    render::Canvas,
    settings::Settings,
    terrain::Terrain,
    tile::{Tile, TileKind},
};
use log::{debug, info};
use rand::{rngs::SmallRng, SeedableRng};

pub struct World<R = SmallRng> {
    terrain: Terrain,
    ants: Vec<Ant>,
    rng: R,
    tick: u64,
}

impl World<SmallRng> {
    /// Generate a world from `settings`, seeding the random source from
    /// `settings.seed` when there is one.
    pub fn generate(settings: &Settings) -> Result<Self, AntError> {
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Self::generate_with_rng(settings, rng)
    }
}

impl<R: RandomSource> World<R> {
    /// Lay out obstacles and food at random, regenerating the whole layout
    /// whenever the nest ends up with no way out.
    pub fn generate_with_rng(settings: &Settings, mut rng: R) -> Result<Self, AntError> {
        settings.validate()?;

        for attempt in 1..=settings.max_world_attempts {
            let terrain = lay_out_terrain(settings, &mut rng)?;

            if terrain.neighbors(terrain.nest()).is_empty() {
                debug!(
                    "nest at {} is enclosed on attempt {}, regenerating the world",
                    terrain.nest(),
                    attempt
                );
                continue;
            }

            info!(
                "generated a {}x{} world with {} ants after {} attempt(s)",
                terrain.width(),
                terrain.height(),
                settings.ant_count,
                attempt
            );

            return Ok(Self::populate(
                terrain,
                settings.ant_count,
                settings.ant_memory,
                rng,
            ));
        }

        Err(AntError::NestEnclosed {
            attempts: settings.max_world_attempts,
        })
    }

    /// Wrap a hand-built terrain. The adjacency table is rebuilt first.
    pub fn from_terrain(
        mut terrain: Terrain,
        ant_count: usize,
        ant_memory: usize,
        rng: R,
    ) -> Result<Self, AntError> {
        terrain.rebuild_adjacency();

        if terrain.neighbors(terrain.nest()).is_empty() {
            return Err(AntError::NestEnclosed { attempts: 1 });
        }

        Ok(Self::populate(terrain, ant_count, ant_memory, rng))
    }

    fn populate(terrain: Terrain, ant_count: usize, ant_memory: usize, rng: R) -> Self {
        let ants = (0..ant_count)
            .map(|_| Ant::at_nest(terrain.nest(), ant_memory))
            .collect();

        Self {
            terrain,
            ants,
            rng,
            tick: 0,
        }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn nest(&self) -> Position {
        self.terrain.nest()
    }

    /// Ticks processed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance one tick: every tile first, then every ant in order.
    pub fn update(&mut self) {
        let Self {
            terrain, ants, rng, ..
        } = self;

        terrain.update();
        ants.iter_mut().for_each(|ant| ant.update(terrain, rng));

        self.tick += 1;
    }

    pub fn fast_forward(&mut self, ticks: usize) {
        debug!("fast-forwarding {} ticks from tick {}", ticks, self.tick);
        (0..ticks).for_each(|_| self.update());
    }

    /// Paint every passable tile, then the ants, then the nest on top.
    pub fn render<C: Canvas>(&self, canvas: &mut C) {
        self.paint_tiles(canvas, false);
        self.paint_colony(canvas);
    }

    /// Like [`World::render`] but obstacles are painted too.
    pub fn render_full<C: Canvas>(&self, canvas: &mut C) {
        self.paint_tiles(canvas, true);
        self.paint_colony(canvas);
    }

    fn paint_tiles<C: Canvas>(&self, canvas: &mut C, with_obstacles: bool) {
        self.terrain.positions().for_each(|position| {
            if let Some(tile) = self.terrain.tile(position) {
                if with_obstacles || tile.is_passable() {
                    canvas.paint(position, tile.appearance());
                }
            }
        });
    }

    fn paint_colony<C: Canvas>(&self, canvas: &mut C) {
        self.ants
            .iter()
            .for_each(|ant| canvas.paint(ant.position(), ant.appearance()));

        let nest = self.terrain.nest();
        if let Some(tile) = self.terrain.tile(nest) {
            canvas.paint(nest, tile.appearance());
        }
    }

    pub fn food_left(&self) -> u32 {
        self.terrain
            .positions()
            .filter_map(|position| match self.terrain.tile(position) {
                Some(Tile::Food(food)) => Some(food.stock),
                _ => None,
            })
            .sum()
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.terrain
            .positions()
            .filter(|position| self.terrain.kind(*position) == Some(kind))
            .count()
    }
}

fn lay_out_terrain<R: RandomSource>(settings: &Settings, rng: &mut R) -> Result<Terrain, AntError> {
    let mut terrain = Terrain::new(
        settings.grid_width,
        settings.grid_height,
        settings.nest(),
        settings.lifetimes(),
        settings.trail_style(),
    )?;

    add_obstacles(
        &mut terrain,
        settings.obstacle_count,
        settings.obstacle_size,
        rng,
    );
    add_food(&mut terrain, settings.food_count, settings.food_stock, rng);
    terrain.rebuild_adjacency();

    Ok(terrain)
}

fn random_position<R: RandomSource>(terrain: &Terrain, rng: &mut R) -> Position {
    Position::new(
        rng.pick_index(terrain.width()),
        rng.pick_index(terrain.height()),
    )
}

/// Each cluster is a bounded random walk from a random seed cell that turns
/// the cell and all its neighbors into obstacles at every step. The walk uses
/// the obstacle-free adjacency table, so clusters may cross each other.
fn add_obstacles<R: RandomSource>(
    terrain: &mut Terrain,
    count: usize,
    expansions: usize,
    rng: &mut R,
) {
    for _ in 0..count {
        let mut position = random_position(terrain, rng);

        for _ in 0..=expansions {
            terrain.place_obstacle(position);

            let neighbors = terrain.neighbors(position).to_vec();
            neighbors.iter().for_each(|neighbor| {
                terrain.place_obstacle(*neighbor);
            });

            if neighbors.is_empty() {
                break;
            }
            position = neighbors[rng.pick_index(neighbors.len())];
        }
    }
}

/// Food lands on uniformly random positions. Hitting the nest doesn't use up
/// the budget.
fn add_food<R: RandomSource>(terrain: &mut Terrain, count: usize, stock: u32, rng: &mut R) {
    let mut placed = 0;

    while placed < count {
        let position = random_position(terrain, rng);

        if terrain.place_food(position, stock) {
            placed += 1;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        ant::AntMode,
        random::ScriptedRandom,
        render::Appearance,
        settings::Lifetimes,
        terrain::TrailStyle,
        tile::UNSET_DISTANCE,
    };
    use std::collections::HashMap;

    fn seeded(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    fn open_terrain(width: usize, height: usize, nest: Position) -> Terrain {
        let settings = Settings {
            grid_width: width,
            grid_height: height,
            ..Settings::default()
        };

        Terrain::new(width, height, nest, settings.lifetimes(), TrailStyle::Scent).unwrap()
    }

    fn nest_distances<R: RandomSource>(world: &World<R>) -> HashMap<Position, u32> {
        world
            .terrain()
            .positions()
            .map(|position| (position, world.terrain().nest_distance(position)))
            .collect()
    }

    #[test]
    fn generated_world_matches_settings() {
        let settings = Settings {
            seed: Some(11),
            obstacle_count: 0,
            food_count: 12,
            food_stock: 4,
            ant_count: 7,
            ..Settings::default()
        };
        let world = World::generate(&settings).unwrap();

        assert_eq!(world.ants().len(), 7);
        assert!(world
            .ants()
            .iter()
            .all(|ant| ant.position() == settings.nest()));
        assert_eq!(world.terrain().kind(settings.nest()), Some(TileKind::Nest));
        assert_eq!(world.count_kind(TileKind::Nest), 1);
        assert!(world.count_kind(TileKind::Food) <= 12);
        assert!(world.count_kind(TileKind::Food) > 0);
        assert_eq!(world.food_left() % 4, 0);
    }

    #[test]
    fn same_seed_same_world() {
        let settings = Settings {
            seed: Some(5),
            ..Settings::default()
        };
        let mut a = World::generate(&settings).unwrap();
        let mut b = World::generate(&settings).unwrap();
        a.fast_forward(200);
        b.fast_forward(200);

        let positions = |world: &World| -> Vec<Position> {
            world.ants().iter().map(|ant| ant.position()).collect()
        };
        assert_eq!(positions(&a), positions(&b));
        assert_eq!(nest_distances(&a), nest_distances(&b));
        assert_eq!(a.tick(), 200);
    }

    #[test]
    fn obstacles_are_never_neighbors() {
        let settings = Settings {
            seed: Some(21),
            obstacle_count: 20,
            ..Settings::default()
        };
        let world = World::generate(&settings).unwrap();
        let terrain = world.terrain();

        assert!(world.count_kind(TileKind::Obstacle) > 0);
        terrain.positions().for_each(|position| {
            terrain.neighbors(position).iter().for_each(|neighbor| {
                assert!(terrain.contains(*neighbor));
                assert_ne!(terrain.kind(*neighbor), Some(TileKind::Obstacle));
            })
        });
    }

    #[test]
    fn ants_only_move_along_the_adjacency_table() {
        let settings = Settings {
            seed: Some(3),
            grid_width: 20,
            grid_height: 20,
            nest_x: 10,
            nest_y: 10,
            ant_count: 15,
            food_count: 10,
            obstacle_count: 4,
            obstacle_size: 3,
            ..Settings::default()
        };
        let mut world = World::generate(&settings).unwrap();

        for _ in 0..500 {
            let before: Vec<_> = world.ants().iter().map(|ant| ant.position()).collect();
            world.update();

            for (from, ant) in before.iter().zip(world.ants()) {
                assert!(
                    world.terrain().neighbors(*from).contains(&ant.position()),
                    "ant jumped from {} to {}",
                    from,
                    ant.position()
                );
            }
        }
    }

    #[test]
    fn nest_distances_only_ever_decrease() {
        let settings = Settings {
            seed: Some(8),
            grid_width: 15,
            grid_height: 15,
            nest_x: 7,
            nest_y: 7,
            ant_count: 8,
            food_count: 6,
            food_stock: 2,
            obstacle_count: 2,
            obstacle_size: 2,
            trail_markers: true,
            ..Settings::default()
        };
        let mut world = World::generate(&settings).unwrap();
        let mut previous = nest_distances(&world);

        for _ in 0..400 {
            world.update();
            let current = nest_distances(&world);

            for (position, distance) in &current {
                assert!(
                    *distance <= previous[position],
                    "nest distance at {} rose from {} to {}",
                    position,
                    previous[position],
                    distance
                );
            }
            assert_eq!(current[&world.nest()], 0);
            previous = current;
        }
    }

    #[test]
    fn straight_corridor_distances_match_path_length() {
        let terrain = open_terrain(8, 1, Position::new(0, 0));
        let mut world = World::from_terrain(terrain, 1, 1, seeded(1)).unwrap();
        world.fast_forward(7);

        for x in 0..8 {
            let position = Position::new(x, 0);
            assert_eq!(
                world.terrain().nest_distance(position) as usize,
                position.chebyshev_distance_to(&world.nest())
            );
        }
    }

    #[test]
    fn depleted_food_lingers_for_one_tick() {
        let mut terrain = open_terrain(3, 1, Position::new(0, 0));
        let food = Position::new(1, 0);
        terrain.place_food(food, 1);
        let mut world = World::from_terrain(terrain, 1, 1, seeded(2)).unwrap();

        // the only way out of the nest leads onto the food
        world.update();
        assert_eq!(world.ants()[0].position(), food);

        // eaten, then the ant walks off
        world.update();
        assert_eq!(world.ants()[0].mode(), AntMode::Delivering);
        assert_ne!(world.ants()[0].position(), food);
        assert_eq!(world.terrain().kind(food), Some(TileKind::Food));
        assert_eq!(world.food_left(), 0);

        world.update();
        assert_eq!(world.terrain().kind(food), Some(TileKind::Cell));
    }

    #[test]
    fn lone_ant_finds_food_and_brings_it_home() {
        let nest = Position::new(2, 5);
        let food = Position::new(5, 5);
        let mut terrain = open_terrain(10, 10, nest);
        terrain.place_food(food, 1);
        // east out of the nest, then east twice more with the previous cell filtered out
        let rng = ScriptedRandom::new(vec![4, 3, 3]);
        let mut world = World::from_terrain(terrain, 1, 1, rng).unwrap();

        let mut modes = vec![world.ants()[0].mode()];
        for tick in 1..=7 {
            world.update();
            let mode = world.ants()[0].mode();
            if modes.last() != Some(&mode) {
                modes.push(mode);
            }
            if tick == 3 {
                assert_eq!(world.ants()[0].position(), food);
            }
            if tick == 6 {
                assert_eq!(world.ants()[0].position(), nest);
                assert_eq!(mode, AntMode::Delivering);
            }
        }

        assert_eq!(
            modes,
            vec![
                AntMode::Scavenging,
                AntMode::Delivering,
                AntMode::Scavenging
            ]
        );
        // back to scavenging on the nest, then straight out again
        assert!(world
            .terrain()
            .neighbors(nest)
            .contains(&world.ants()[0].position()));
        assert_eq!(world.food_left(), 0);
    }

    #[test]
    fn food_never_lands_on_the_nest() {
        let settings = Settings {
            seed: Some(5),
            grid_width: 2,
            grid_height: 1,
            nest_x: 0,
            nest_y: 0,
            obstacle_count: 0,
            food_count: 1,
            food_stock: 3,
            ant_count: 1,
            ..Settings::default()
        };

        let world = World::generate(&settings).unwrap();

        assert_eq!(world.terrain().kind(Position::new(0, 0)), Some(TileKind::Nest));
        assert_eq!(
            world.terrain().kind(Position::new(1, 0)),
            Some(TileKind::Food)
        );
        assert_eq!(world.food_left(), 3);
    }

    #[test]
    fn hitting_the_nest_does_not_use_up_the_food_budget() {
        let mut terrain = open_terrain(3, 2, Position::new(0, 0));
        // (x, y) pairs: the nest first, then three free cells
        let mut rng = ScriptedRandom::new(vec![0, 0, 1, 0, 2, 0, 0, 1]);

        add_food(&mut terrain, 3, 2, &mut rng);

        assert_eq!(terrain.kind(Position::new(0, 0)), Some(TileKind::Nest));
        for position in &[
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(0, 1),
        ] {
            assert_eq!(terrain.kind(*position), Some(TileKind::Food));
        }
        assert_eq!(
            terrain
                .positions()
                .filter(|position| terrain.kind(*position) == Some(TileKind::Food))
                .count(),
            3
        );
    }

    #[test]
    fn enclosed_nest_is_regenerated_or_refused() {
        for seed in 0..40 {
            let settings = Settings {
                seed: Some(seed),
                grid_width: 6,
                grid_height: 6,
                nest_x: 3,
                nest_y: 3,
                obstacle_count: 3,
                obstacle_size: 3,
                food_count: 2,
                max_world_attempts: 500,
                ..Settings::default()
            };

            match World::generate(&settings) {
                Ok(world) => assert!(!world.terrain().neighbors(world.nest()).is_empty()),
                Err(AntError::NestEnclosed { attempts }) => assert_eq!(attempts, 500),
                Err(e) => panic!("unexpected error {}", e),
            }
        }
    }

    #[test]
    fn hopeless_layout_gives_up_after_the_attempt_budget() {
        let settings = Settings {
            seed: Some(1),
            grid_width: 3,
            grid_height: 3,
            nest_x: 1,
            nest_y: 1,
            obstacle_count: 20,
            obstacle_size: 5,
            food_count: 0,
            max_world_attempts: 5,
            ..Settings::default()
        };

        assert!(matches!(
            World::generate(&settings),
            Err(AntError::NestEnclosed { attempts: 5 })
        ));
    }

    #[test]
    fn hand_built_enclosed_nest_is_refused() {
        let mut terrain = open_terrain(3, 3, Position::new(1, 1));
        let nest = terrain.nest();
        terrain
            .positions()
            .filter(|position| *position != nest)
            .collect::<Vec<_>>()
            .into_iter()
            .for_each(|position| {
                terrain.place_obstacle(position);
            });

        assert!(matches!(
            World::from_terrain(terrain, 1, 1, seeded(0)),
            Err(AntError::NestEnclosed { attempts: 1 })
        ));
    }

    #[test]
    fn render_skips_obstacles_and_paints_the_nest_last() {
        let mut terrain = open_terrain(3, 3, Position::new(0, 0));
        terrain.place_obstacle(Position::new(2, 2));
        terrain.place_food(Position::new(2, 0), 3);
        let world = World::from_terrain(terrain, 2, 1, seeded(0)).unwrap();

        let mut painted: Vec<(Position, Appearance)> = Vec::new();
        world.render(&mut painted);

        assert_eq!(painted.len(), 8 + 2 + 1);
        assert!(painted
            .iter()
            .all(|(_, appearance)| *appearance != Appearance::Obstacle));
        assert!(painted.contains(&(Position::new(2, 0), Appearance::Food)));
        assert_eq!(
            painted[8..10],
            [
                (world.nest(), Appearance::Ant(AntMode::Scavenging)),
                (world.nest(), Appearance::Ant(AntMode::Scavenging))
            ]
        );
        assert_eq!(painted.last(), Some(&(world.nest(), Appearance::Nest)));

        let mut full: Vec<(Position, Appearance)> = Vec::new();
        world.render_full(&mut full);
        assert!(full.contains(&(Position::new(2, 2), Appearance::Obstacle)));
    }

    #[test]
    fn rendering_leaves_the_world_untouched() {
        let settings = Settings {
            seed: Some(13),
            ..Settings::default()
        };
        let mut world = World::generate(&settings).unwrap();
        world.fast_forward(50);
        let before = nest_distances(&world);

        let mut painted: Vec<(Position, Appearance)> = Vec::new();
        world.render(&mut painted);
        world.render_full(&mut painted);

        assert_eq!(before, nest_distances(&world));
        assert_eq!(world.tick(), 50);
    }

    #[test]
    fn unexplored_cells_have_no_nest_distance() {
        let terrain = open_terrain(6, 6, Position::new(0, 0));
        let world = World::from_terrain(terrain, 0, 1, seeded(0)).unwrap();

        assert_eq!(
            world.terrain().nest_distance(Position::new(5, 5)),
            UNSET_DISTANCE
        );
        assert_eq!(
            world.terrain().lifetimes(),
            &Lifetimes {
                steps: 60,
                food_trail: 9,
                pheromone_freshness: 12,
            }
        );
    }
}
