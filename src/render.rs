use crate::{ant::AntMode, errors::AntError, position::Position, util::map_range};
use colorgrad::{Color, CustomGradient, Gradient};
use image::{Rgba, RgbaImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};
use std::path::Path;

/// Visits past which a plain cell stops getting darker.
pub const GROUND_STEPS_TO_FLOOR: u32 = 39;

/// What a grid position should look like. Rendering never touches
/// simulation state; it only hands these to a [`Canvas`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Appearance {
    Ground { steps: u32 },
    Trail,
    Obstacle,
    Nest,
    Food,
    Ant(AntMode),
}

/// Per-cell drawing callback.
pub trait Canvas {
    fn paint(&mut self, position: Position, appearance: Appearance);
}

impl Canvas for Vec<(Position, Appearance)> {
    fn paint(&mut self, position: Position, appearance: Appearance) {
        self.push((position, appearance))
    }
}

/// Maps appearances to colors. Ground darkens with traffic down to a floor;
/// everything else has a fixed color.
pub struct Palette {
    ground: Gradient,
    trail: Rgba<u8>,
    obstacle: Rgba<u8>,
    nest: Rgba<u8>,
    food: Rgba<u8>,
    scavenger: Rgba<u8>,
    deliverer: Rgba<u8>,
}

impl Palette {
    pub fn new() -> Result<Self, AntError> {
        let ground = CustomGradient::new()
            .colors(&[
                Color::from_rgb_u8(250, 249, 245),
                Color::from_rgb_u8(51, 51, 50),
            ])
            .build()
            .map_err(|e| AntError::Palette(e.to_string()))?;

        Ok(Self {
            ground,
            trail: Rgba([255, 213, 0, 0xff]),
            obstacle: Rgba([0, 0, 255, 0xff]),
            nest: Rgba([85, 255, 0, 0xff]),
            food: Rgba([255, 85, 0, 0xff]),
            scavenger: Rgba([60, 179, 0, 0xff]),
            deliverer: Rgba([204, 95, 41, 0xff]),
        })
    }

    pub fn color(&self, appearance: Appearance) -> Rgba<u8> {
        match appearance {
            Appearance::Ground { steps } => {
                let shade: f64 = map_range(
                    steps.min(GROUND_STEPS_TO_FLOOR),
                    0,
                    GROUND_STEPS_TO_FLOOR,
                    0.0,
                    1.0,
                );
                let (r, g, b, a) = self.ground.at(shade).rgba_u8();
                Rgba([r, g, b, a])
            }
            Appearance::Trail => self.trail,
            Appearance::Obstacle => self.obstacle,
            Appearance::Nest => self.nest,
            Appearance::Food => self.food,
            Appearance::Ant(AntMode::Scavenging) => self.scavenger,
            Appearance::Ant(AntMode::Delivering) => self.deliverer,
        }
    }
}

/// A raster frame where every grid cell is a `cell_size` square.
pub struct FrameCanvas {
    image: RgbaImage,
    palette: Palette,
    cell_size: u32,
}

impl FrameCanvas {
    pub fn new(grid_width: usize, grid_height: usize, cell_size: u32) -> Result<Self, AntError> {
        let cell_size = cell_size.max(1);
        let image = RgbaImage::from_pixel(
            grid_width as u32 * cell_size,
            grid_height as u32 * cell_size,
            Rgba([0xff, 0xff, 0xff, 0xff]),
        );

        Ok(Self {
            image,
            palette: Palette::new()?,
            cell_size,
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AntError> {
        self.image.save(path)?;
        Ok(())
    }
}

impl Canvas for FrameCanvas {
    fn paint(&mut self, position: Position, appearance: Appearance) {
        let square = Rect::at(
            (position.x as u32 * self.cell_size) as i32,
            (position.y as u32 * self.cell_size) as i32,
        )
        .of_size(self.cell_size, self.cell_size);

        draw_filled_rect_mut(&mut self.image, square, self.palette.color(appearance));
    }
}
