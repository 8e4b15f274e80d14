//! Static mapping of entities to extract locations.

use std::collections::BTreeMap;
use std::path::PathBuf;

use dwh_model::Entity;

/// Resolves each entity to the extract file it is loaded from.
///
/// Paths are relative to `root` unless overridden with an absolute path.
/// File names are used as-is; no case folding or globbing is attempted.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    root: PathBuf,
    paths: BTreeMap<Entity, PathBuf>,
}

impl SourceCatalog {
    /// Catalog with every entity at its default location under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let paths = Entity::ALL
            .into_iter()
            .map(|entity| (entity, PathBuf::from(entity.default_path())))
            .collect();
        Self {
            root: root.into(),
            paths,
        }
    }

    /// Override the location for one entity.
    #[must_use]
    pub fn with_path(mut self, entity: Entity, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(entity, path.into());
        self
    }

    /// Full path of the extract for `entity`.
    pub fn resolve(&self, entity: Entity) -> PathBuf {
        let relative = self
            .paths
            .get(&entity)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(entity.default_path()));
        self.root.join(relative)
    }

    /// All entries in pipeline order.
    pub fn entries(&self) -> impl Iterator<Item = (Entity, PathBuf)> + '_ {
        Entity::ALL
            .into_iter()
            .map(move |entity| (entity, self.resolve(entity)))
    }
}
