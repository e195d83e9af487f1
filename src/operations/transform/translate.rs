use crate::collection::FigureService;
use crate::error::Result;
use crate::figure::FigureId;
use crate::math::Vector2;

/// Moves a figure by a displacement vector.
pub struct Translate {
    figure: FigureId,
    displacement: Vector2,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(figure: FigureId, displacement: Vector2) -> Self {
        Self {
            figure,
            displacement,
        }
    }

    /// Executes the translation, modifying the figure in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure is not in the collection.
    pub fn execute(&self, service: &mut FigureService) -> Result<()> {
        service.update(self.figure, |f| f.translate(&self.displacement))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::figure::{Figure, Line};
    use crate::math::Point2;

    #[test]
    fn translate_line_endpoints() {
        let mut service = FigureService::default();
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)).unwrap();
        let id = service.add(Figure::new(line)).unwrap();

        Translate::new(id, Vector2::new(5.0, 5.0))
            .execute(&mut service)
            .unwrap();

        let f = service.get(id).unwrap();
        assert_eq!(f.point_parameter("Start"), Point2::new(5.0, 5.0));
        assert_eq!(f.point_parameter("End"), Point2::new(15.0, 5.0));
    }

    #[test]
    fn translate_missing_figure_fails() {
        let mut service = FigureService::default();
        let op = Translate::new(FigureId::new(), Vector2::new(1.0, 0.0));
        assert!(op.execute(&mut service).is_err());
    }
}
