use std::time::Duration;

use log::warn;

use crate::builder::Appearance;
use crate::errors::*;
use crate::geometry::MazeLayout;
use crate::grid_dimensions::RectGridDimensions;
use crate::scene::{MaterialId, TemplateId};
use crate::units::{Height, Width};

/// Designer facing maze settings.
///
/// Values outside the usual editing ranges are accepted with a warning; only values that cannot
/// produce a maze at all are rejected by `validate`.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    /// Cells along X.
    pub width: usize,
    /// Cells along Z.
    pub height: usize,
    pub cell_size: f32,
    pub wall_thickness: f32,
    pub wall_height: f32,
    /// Rebuild the walls after every carve with a pause in between.
    pub animate_generation: bool,
    /// Seconds between carves when animating.
    pub generation_delay: f32,
    pub wall_template: Option<TemplateId>,
    pub floor_template: Option<TemplateId>,
    pub wall_material: Option<MaterialId>,
    pub floor_material: Option<MaterialId>,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            width: 10,
            height: 10,
            cell_size: 2.0,
            wall_thickness: 0.2,
            wall_height: 3.0,
            animate_generation: false,
            generation_delay: 0.05,
            wall_template: None,
            floor_template: None,
            wall_material: None,
            floor_material: None,
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<()> {
        let _ = self.dimensions()?;

        positive("cell_size", self.cell_size)?;
        positive("wall_thickness", self.wall_thickness)?;
        positive("wall_height", self.wall_height)?;
        if Duration::try_from_secs_f32(self.generation_delay).is_err() {
            bail!(ErrorKind::InvalidConfiguration("generation_delay",
                                                  format!("{} is not a usable, non negative \
                                                           number of seconds",
                                                          self.generation_delay)));
        }

        in_designer_range("width", self.width as f32, 5.0, 50.0);
        in_designer_range("height", self.height as f32, 5.0, 50.0);
        in_designer_range("cell_size", self.cell_size, 1.0, 10.0);
        in_designer_range("wall_thickness", self.wall_thickness, 0.1, 1.0);
        in_designer_range("wall_height", self.wall_height, 1.0, 5.0);
        in_designer_range("generation_delay", self.generation_delay, 0.0, 0.5);

        Ok(())
    }

    pub fn dimensions(&self) -> Result<RectGridDimensions> {
        RectGridDimensions::new(Width(self.width), Height(self.height))
    }

    pub fn layout(&self) -> Result<MazeLayout> {
        Ok(MazeLayout {
            dimensions: self.dimensions()?,
            cell_size: self.cell_size,
            wall_thickness: self.wall_thickness,
            wall_height: self.wall_height,
        })
    }

    pub fn appearance(&self) -> Appearance {
        Appearance {
            wall_template: self.wall_template,
            floor_template: self.floor_template,
            wall_material: self.wall_material,
            floor_material: self.floor_material,
        }
    }

    /// The pause between carves. Unusable delays count as no pause.
    pub fn generation_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.generation_delay).unwrap_or(Duration::from_secs(0))
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ErrorKind::InvalidConfiguration(field,
                                            format!("{} is not a finite, positive size", value))
            .into())
    }
}

fn in_designer_range(field: &str, value: f32, min: f32, max: f32) {
    if value < min || value > max {
        warn!("{} = {} is outside the usual range {} to {}", field, value, min, max);
    }
}
