//! Scene store - the ordered shape collection and its selection cursor
//!
//! The store is plain data with no UI coupling, so every operation the
//! control panel performs can also be exercised from tests. Shapes
//! keep their insertion order; the selection always points at a valid
//! shape or at nothing.

use thiserror::Error;

use super::shape::{PrimitiveKind, ShapeModel, ShapeUpdate};

/// Errors from scene store operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SceneError {
    #[error("shape index {index} out of range (scene has {len} shapes)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An ordered collection of shapes plus the index being edited
///
/// Invariants: `selected` is `None` exactly when the collection can't
/// provide a shape to edit; whenever it is `Some(i)`, `i` is a valid
/// index. `add` always selects the appended shape, `remove_current`
/// falls back to the first remaining shape.
#[derive(Clone, Debug, Default)]
pub struct SceneStore {
    shapes: Vec<ShapeModel>,
    selected: Option<usize>,
}

impl SceneStore {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene holding the default sphere, selected
    pub fn with_default_shape() -> Self {
        let mut store = Self::new();
        store.add(ShapeModel::default());
        store
    }

    /// Append a shape and select it
    pub fn add(&mut self, shape: ShapeModel) {
        log::debug!("scene: add {} (#{})", shape.label(), self.shapes.len());
        self.shapes.push(shape);
        self.selected = Some(self.shapes.len() - 1);
    }

    /// Append a default shape of the given kind and select it
    pub fn add_default(&mut self, kind: PrimitiveKind) {
        self.add(ShapeModel::default_for(kind));
    }

    /// Remove the selected shape, if any
    ///
    /// Afterwards the first remaining shape is selected, or nothing
    /// when the scene became empty. Without a selection this is a
    /// no-op returning `None`.
    pub fn remove_current(&mut self) -> Option<ShapeModel> {
        let index = self.selected?;
        let removed = self.shapes.remove(index);
        log::debug!("scene: remove {} (#{index})", removed.label());
        self.selected = if self.shapes.is_empty() { None } else { Some(0) };
        Some(removed)
    }

    /// Select the shape at `index`
    ///
    /// Out-of-range indices are rejected and leave the selection
    /// unchanged.
    pub fn select(&mut self, index: usize) -> Result<(), SceneError> {
        if index >= self.shapes.len() {
            return Err(SceneError::IndexOutOfRange {
                index,
                len: self.shapes.len(),
            });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Apply a field update to the selected shape
    ///
    /// Returns false (and changes nothing) when there is no
    /// selection.
    pub fn update_current(&mut self, update: ShapeUpdate) -> bool {
        match self.selected_mut() {
            Some(shape) => {
                shape.apply(update);
                true
            }
            None => false,
        }
    }

    /// Number of shapes in the scene
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the scene holds no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// All shapes, in insertion order
    pub fn shapes(&self) -> &[ShapeModel] {
        &self.shapes
    }

    /// Index of the selected shape, if any
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected shape, if any
    pub fn selected(&self) -> Option<&ShapeModel> {
        self.selected.and_then(|i| self.shapes.get(i))
    }

    /// Mutable access to the selected shape, if any
    pub fn selected_mut(&mut self) -> Option<&mut ShapeModel> {
        match self.selected {
            Some(i) => self.shapes.get_mut(i),
            None => None,
        }
    }

    /// Iterate over the shapes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ShapeModel> {
        self.shapes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ShapeKind;

    #[test]
    fn test_empty_store() {
        let store = SceneStore::new();
        assert!(store.is_empty());
        assert_eq!(store.selected_index(), None);
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_add_selects_last() {
        let mut store = SceneStore::new();
        store.add_default(PrimitiveKind::Sphere);
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected_index(), Some(0));

        store.add_default(PrimitiveKind::Cylinder);
        assert_eq!(store.len(), 2);
        assert_eq!(store.selected_index(), Some(1));
    }

    #[test]
    fn test_add_cube_to_default_scene() {
        // The scenario from the tool's startup: one default sphere,
        // then the user adds a cube.
        let mut store = SceneStore::with_default_shape();
        store.add_default(PrimitiveKind::Cube);

        assert_eq!(store.len(), 2);
        assert_eq!(store.selected_index(), Some(1));
        assert_eq!(
            store.shapes()[1].kind.primitive(),
            PrimitiveKind::Cube
        );
        // The first shape is still the untouched default sphere.
        assert_eq!(store.shapes()[0].kind, ShapeKind::Sphere { radius: 1.0 });
    }

    #[test]
    fn test_remove_current_selects_first_remaining() {
        let mut store = SceneStore::new();
        store.add_default(PrimitiveKind::Sphere);
        store.add_default(PrimitiveKind::Cube);
        store.add_default(PrimitiveKind::Cylinder);
        store.select(1).unwrap();

        let removed = store.remove_current().unwrap();
        assert_eq!(removed.kind.primitive(), PrimitiveKind::Cube);
        assert_eq!(store.len(), 2);
        assert_eq!(store.selected_index(), Some(0));
    }

    #[test]
    fn test_remove_last_clears_selection() {
        let mut store = SceneStore::with_default_shape();
        assert!(store.remove_current().is_some());
        assert_eq!(store.len(), 0);
        assert_eq!(store.selected_index(), None);

        // Follow-up updates are no-ops on the empty store.
        assert!(!store.update_current(ShapeUpdate::PrimarySize(2.0)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_without_selection_is_noop() {
        let mut store = SceneStore::new();
        assert!(store.remove_current().is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut store = SceneStore::with_default_shape();
        let err = store.select(3).unwrap_err();
        assert_eq!(err, SceneError::IndexOutOfRange { index: 3, len: 1 });
        // The previous selection survives the failed call.
        assert_eq!(store.selected_index(), Some(0));
    }

    #[test]
    fn test_update_current_mutates_selected_only() {
        let mut store = SceneStore::new();
        store.add_default(PrimitiveKind::Sphere);
        store.add_default(PrimitiveKind::Sphere);

        assert!(store.update_current(ShapeUpdate::PrimarySize(2.5)));
        assert_eq!(store.shapes()[1].kind, ShapeKind::Sphere { radius: 2.5 });
        assert_eq!(store.shapes()[0].kind, ShapeKind::Sphere { radius: 1.0 });
    }

    #[test]
    fn test_update_without_selection_changes_nothing() {
        let mut store = SceneStore::new();
        assert!(!store.update_current(ShapeUpdate::PositionX(1.0)));
        assert!(store.is_empty());
    }
}
