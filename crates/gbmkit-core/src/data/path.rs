//! Sample path record handed to the drawing surface.

use serde::Serialize;

use super::{format_canvas_points, CanvasPoint, Stroke, WorldPoint};

/// One simulated path together with its current projection.
///
/// World samples are fixed once generated. Canvas samples and the serialised
/// path string are replaced together whenever the path is re-projected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePath {
    world_points: Vec<WorldPoint>,
    canvas_points: Vec<CanvasPoint>,
    stroke: Stroke,
    path_data: String,
}

impl SamplePath {
    pub fn new(world_points: Vec<WorldPoint>, canvas_points: Vec<CanvasPoint>, stroke: Stroke) -> Self {
        let path_data = format_canvas_points(&canvas_points);
        Self {
            world_points,
            canvas_points,
            stroke,
            path_data,
        }
    }

    pub fn world_points(&self) -> &[WorldPoint] {
        &self.world_points
    }

    pub fn canvas_points(&self) -> &[CanvasPoint] {
        &self.canvas_points
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    /// Canvas points as `"x,y x,y ..."`
    pub fn path_data(&self) -> &str {
        &self.path_data
    }

    pub fn len(&self) -> usize {
        self.world_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world_points.is_empty()
    }

    /// Iterate over the process values in sample order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.world_points.iter().map(|p| p.value)
    }

    /// Replace the projection wholesale and rebuild the serialised string.
    pub fn set_canvas_points(&mut self, canvas_points: Vec<CanvasPoint>) {
        self.path_data = format_canvas_points(&canvas_points);
        self.canvas_points = canvas_points;
    }
}
