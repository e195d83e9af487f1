//! The figure collection and its selection.
//!
//! [`FigureService`] owns the figures in insertion order together with the
//! selected subset. Mutations go through `&mut self`, so the two sets are
//! always updated together.

mod events;

pub use events::{CollectionEvent, SubscriptionId};

use std::collections::HashSet;

use events::Observers;

use crate::config::EditorConfig;
use crate::error::{CollectionError, Result};
use crate::figure::{Figure, FigureId};
use crate::math::Point2;
use crate::registry::{FigureRegistry, ParameterSet};

/// Owns all figures and the current selection.
#[derive(Debug, Default)]
pub struct FigureService {
    registry: FigureRegistry,
    figures: Vec<Figure>,
    selected: HashSet<FigureId>,
    observers: Observers,
}

impl FigureService {
    /// Creates an empty collection backed by `registry`.
    #[must_use]
    pub fn new(registry: FigureRegistry) -> Self {
        Self {
            registry,
            figures: Vec::new(),
            selected: HashSet::new(),
            observers: Observers::default(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &FigureRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        self.registry.config()
    }

    pub fn available_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registry.available_types()
    }

    /// Builds a figure through the registry without adding it.
    ///
    /// # Errors
    ///
    /// Propagates registry construction errors.
    pub fn create(&self, name: &str, params: &ParameterSet) -> Result<Figure> {
        self.registry.create(name, params)
    }

    /// Builds a default figure through the registry without adding it.
    ///
    /// # Errors
    ///
    /// Returns an error for an unregistered type.
    pub fn create_default(&self, name: &str) -> Result<Figure> {
        self.registry.create_default(name)
    }

    /// Appends a figure after checking it is structurally valid.
    ///
    /// A figure that arrives flagged as selected joins the selection.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidFigure`] if the figure fails
    /// validation or its identity is already present.
    pub fn add(&mut self, figure: Figure) -> Result<FigureId> {
        self.check_insertable(&figure)?;
        let id = self.push(figure);
        Ok(id)
    }

    /// Adds several figures, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns the first validation error; the collection is unchanged.
    pub fn add_all(&mut self, figures: Vec<Figure>) -> Result<Vec<FigureId>> {
        let mut incoming = HashSet::new();
        for figure in &figures {
            self.check_insertable(figure)?;
            if !incoming.insert(figure.id()) {
                return Err(duplicate_id(figure.id()).into());
            }
        }
        Ok(figures.into_iter().map(|f| self.push(f)).collect())
    }

    fn check_insertable(&self, figure: &Figure) -> Result<()> {
        if let Err(err) = figure.validate() {
            return Err(CollectionError::InvalidFigure {
                id: figure.id(),
                reason: err.to_string(),
            }
            .into());
        }
        if self.position(figure.id()).is_some() {
            return Err(duplicate_id(figure.id()).into());
        }
        Ok(())
    }

    fn push(&mut self, figure: Figure) -> FigureId {
        let id = figure.id();
        if figure.is_selected() {
            self.selected.insert(id);
        }
        tracing::debug!(%id, figure = figure.name(), "figure added");
        self.figures.push(figure);
        self.observers.notify(&CollectionEvent::Added(id));
        id
    }

    /// Removes a figure and drops it from the selection. Absent IDs are a
    /// no-op.
    pub fn remove(&mut self, id: FigureId) -> Option<Figure> {
        let idx = self.position(id)?;
        let mut figure = self.figures.remove(idx);
        self.selected.remove(&id);
        figure.set_selected(false);
        tracing::debug!(%id, "figure removed");
        self.observers.notify(&CollectionEvent::Removed(id));
        Some(figure)
    }

    /// Removes every figure.
    pub fn clear(&mut self) {
        self.figures.clear();
        self.selected.clear();
        tracing::debug!("collection cleared");
        self.observers.notify(&CollectionEvent::Cleared);
    }

    fn position(&self, id: FigureId) -> Option<usize> {
        self.figures.iter().position(|f| f.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: FigureId) -> Option<&Figure> {
        self.figures.iter().find(|f| f.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: FigureId) -> bool {
        self.position(id).is_some()
    }

    /// Applies `f` to a figure and notifies observers of the change.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NullFigure`] if the ID is absent.
    pub fn update<R>(&mut self, id: FigureId, f: impl FnOnce(&mut Figure) -> R) -> Result<R> {
        let out = f(self.figure_mut(id)?);
        self.notify_changed(id);
        Ok(out)
    }

    pub(crate) fn figure_mut(&mut self, id: FigureId) -> Result<&mut Figure> {
        self.figures
            .iter_mut()
            .find(|f| f.id() == id)
            .ok_or_else(|| CollectionError::NullFigure(id).into())
    }

    pub(crate) fn notify_changed(&mut self, id: FigureId) {
        tracing::debug!(%id, "figure changed");
        self.observers.notify(&CollectionEvent::Changed(id));
    }

    /// Returns the first figure, in insertion order, whose boundary lies
    /// within `eps` of `point`.
    #[must_use]
    pub fn find(&self, point: &Point2, eps: f64) -> Option<&Figure> {
        self.figures.iter().find(|f| f.contains_near(point, eps))
    }

    /// Like [`find`](Self::find) with the configured hit tolerance.
    #[must_use]
    pub fn find_at(&self, point: &Point2) -> Option<&Figure> {
        self.find(point, self.config().hit_epsilon)
    }

    /// Adds a figure to the selection.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NullFigure`] if the ID is absent.
    pub fn select(&mut self, id: FigureId) -> Result<()> {
        self.figure_mut(id)?.set_selected(true);
        if self.selected.insert(id) {
            self.observers.notify(&CollectionEvent::SelectionChanged {
                id: Some(id),
                selected: true,
            });
        }
        Ok(())
    }

    /// Removes one figure from the selection, or clears it with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NullFigure`] if a given ID is absent.
    pub fn deselect(&mut self, id: Option<FigureId>) -> Result<()> {
        match id {
            Some(id) => {
                self.figure_mut(id)?.set_selected(false);
                if self.selected.remove(&id) {
                    self.observers.notify(&CollectionEvent::SelectionChanged {
                        id: Some(id),
                        selected: false,
                    });
                }
            }
            None => {
                for figure in &mut self.figures {
                    figure.set_selected(false);
                }
                if !self.selected.is_empty() {
                    self.selected.clear();
                    self.observers.notify(&CollectionEvent::SelectionChanged {
                        id: None,
                        selected: false,
                    });
                }
            }
        }
        Ok(())
    }

    /// All figures in insertion order.
    pub fn figures(&self) -> impl Iterator<Item = &Figure> {
        self.figures.iter()
    }

    /// Selected figures in insertion order.
    pub fn selected(&self) -> impl Iterator<Item = &Figure> {
        self.figures.iter().filter(|f| self.selected.contains(&f.id()))
    }

    /// Selected IDs in insertion order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<FigureId> {
        self.selected().map(Figure::id).collect()
    }

    #[must_use]
    pub fn is_selected(&self, id: FigureId) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Owned copy of the figures for handoff to a save.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Figure> {
        self.figures.clone()
    }

    /// Registers an observer called after each change.
    pub fn subscribe(&mut self, observer: impl FnMut(&CollectionEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

fn duplicate_id(id: FigureId) -> CollectionError {
    CollectionError::InvalidFigure {
        id,
        reason: "a figure with this id is already in the collection".to_owned(),
    }
}
