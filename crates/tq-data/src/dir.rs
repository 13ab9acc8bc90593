//! On-disk data directory layout
//!
//! ```text
//! <root>/entities.xml
//! <root>/monsters/<hex id>.xml
//! <root>/maps/<hex id>.xml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tq_core::TemplateId;
use tq_core::data::{MapDefinition, Template, TemplateRegistry};
use tracing::{debug, info};

use crate::{DataError, parse_entities, parse_map, parse_monster};

/// Read access to a data directory
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

fn read(path: &Path) -> Result<String, DataError> {
    fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Template id encoded in a definition file name
fn id_from_file_name(path: &Path) -> Result<TemplateId, DataError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| TemplateId::from_hex(stem).ok())
        .ok_or_else(|| DataError::FileName {
            path: path.to_path_buf(),
        })
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entities_path(&self) -> PathBuf {
        self.root.join("entities.xml")
    }

    pub fn monster_path(&self, id: TemplateId) -> PathBuf {
        self.root.join("monsters").join(format!("{}.xml", id.hex()))
    }

    pub fn map_path(&self, id: TemplateId) -> PathBuf {
        self.root.join("maps").join(format!("{}.xml", id.hex()))
    }

    /// `*.xml` files of a subdirectory, sorted by name; a missing directory
    /// is empty
    fn xml_files(&self, dir: &str) -> Result<Vec<PathBuf>, DataError> {
        let dir = self.root.join(dir);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&dir).map_err(|source| DataError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DataError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "xml") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    pub fn load_monster(&self, id: TemplateId) -> Result<Template, DataError> {
        let path = self.monster_path(id);
        let raw = read(&path)?;
        Ok(Template::Monster(parse_monster(&path, &raw, id)?))
    }

    /// Every template: the entity catalog plus one file per monster
    pub fn load_registry(&self) -> Result<TemplateRegistry, DataError> {
        let path = self.entities_path();
        let raw = read(&path)?;
        let mut registry: TemplateRegistry = parse_entities(&path, &raw)?.into_iter().collect();

        for path in self.xml_files("monsters")? {
            let id = id_from_file_name(&path)?;
            let raw = read(&path)?;
            let monster = parse_monster(&path, &raw, id)?;
            debug!(id = %id, name = %monster.name, "monster template loaded");
            registry.insert(Template::Monster(monster));
        }

        info!(root = %self.root.display(), templates = registry.len(), "templates loaded");
        Ok(registry)
    }

    pub fn load_map(&self, id: TemplateId) -> Result<MapDefinition, DataError> {
        let path = self.map_path(id);
        let raw = read(&path)?;
        parse_map(&path, &raw, id)
    }

    /// Ids of every map file, ascending
    pub fn map_ids(&self) -> Result<Vec<TemplateId>, DataError> {
        let mut ids = self
            .xml_files("maps")?
            .iter()
            .map(|path| id_from_file_name(path))
            .collect::<Result<Vec<_>, _>>()?;
        ids.sort();
        Ok(ids)
    }
}
