use crate::collection::FigureService;
use crate::error::{CollectionError, Result};
use crate::figure::FigureId;

/// Copies a figure, displaced by the configured clone offset, and adds the
/// copy to the collection.
pub struct Duplicate {
    figure: FigureId,
}

impl Duplicate {
    /// Creates a new `Duplicate` operation.
    #[must_use]
    pub fn new(figure: FigureId) -> Self {
        Self { figure }
    }

    /// Executes the duplication and returns the ID of the copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure is not in the collection.
    pub fn execute(&self, service: &mut FigureService) -> Result<FigureId> {
        let offset = service.config().clone_offset;
        let copy = service
            .get(self.figure)
            .ok_or(CollectionError::NullFigure(self.figure))?
            .duplicate(&offset);
        service.add(copy)
    }
}
