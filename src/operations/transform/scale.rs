use crate::collection::FigureService;
use crate::error::Result;
use crate::figure::{FigureId, ScaleOutcome};

/// Scales a figure uniformly about its own centroid.
pub struct Scale {
    figure: FigureId,
    factor: f64,
}

impl Scale {
    /// Creates a new `Scale` operation.
    #[must_use]
    pub fn new(figure: FigureId, factor: f64) -> Self {
        Self { figure, factor }
    }

    /// Executes the scale. A refused scale leaves the figure untouched and
    /// notifies nobody.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure is not in the collection.
    pub fn execute(&self, service: &mut FigureService) -> Result<ScaleOutcome> {
        let outcome = service.figure_mut(self.figure)?.scale(self.factor);
        if outcome.is_applied() {
            service.notify_changed(self.figure);
        }
        Ok(outcome)
    }
}
