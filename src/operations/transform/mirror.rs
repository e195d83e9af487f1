use crate::collection::FigureService;
use crate::error::{GeometryError, Result};
use crate::figure::FigureId;
use crate::math::{distance, Point2, TOLERANCE};

/// Reflects a figure across the infinite line through two points.
pub struct Mirror {
    figure: FigureId,
    line_a: Point2,
    line_b: Point2,
}

impl Mirror {
    /// Creates a new `Mirror` operation.
    #[must_use]
    pub fn new(figure: FigureId, line_a: Point2, line_b: Point2) -> Self {
        Self {
            figure,
            line_a,
            line_b,
        }
    }

    /// Executes the reflection, modifying the figure in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the two line points coincide or the figure is not
    /// in the collection.
    pub fn execute(&self, service: &mut FigureService) -> Result<()> {
        if distance(&self.line_a, &self.line_b) < TOLERANCE {
            return Err(GeometryError::Degenerate("mirror line points coincide".into()).into());
        }
        service.update(self.figure, |f| f.reflect(&self.line_a, &self.line_b))
    }
}
