use crate::collection::FigureService;
use crate::error::{GeometryError, Result};
use crate::figure::FigureId;

/// Rotates a figure about its own centroid.
pub struct Rotate {
    figure: FigureId,
    degrees: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `degrees` - Rotation angle; positive values turn clockwise on a
    ///   screen whose y axis points down.
    #[must_use]
    pub fn new(figure: FigureId, degrees: f64) -> Self {
        Self { figure, degrees }
    }

    /// Executes the rotation, modifying the figure in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the angle is not finite or the figure is not in
    /// the collection.
    pub fn execute(&self, service: &mut FigureService) -> Result<()> {
        if !self.degrees.is_finite() {
            return Err(GeometryError::NonFinite("rotation angle").into());
        }
        service.update(self.figure, |f| f.rotate(self.degrees))
    }
}
