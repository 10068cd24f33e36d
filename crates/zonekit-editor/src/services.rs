//! External collaborator boundaries.
//!
//! The editing core talks to an out-of-process layout store and a
//! shader catalog through these traits; transport (D-Bus, files, a
//! daemon) is the caller's concern. Service failures leave the
//! in-memory editing state untouched so the user can retry.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zonekit_core::{Result, ServiceError};

use crate::layout::{LayoutFile, LayoutId};

/// One tunable parameter declared by a shader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderParameter {
    pub id: String,
    pub name: String,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

/// A decorative shader as described by the catalog.
///
/// The editing core only consumes `id` and the parameter ids (for
/// stale-parameter pruning); it never interprets shader code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderInfo {
    pub id: String,
    pub name: String,
    pub parameters: Vec<ShaderParameter>,
}

/// Persistence service for layouts.
pub trait LayoutRepository {
    fn load_layout(&self, id: &LayoutId) -> Result<LayoutFile>;
    fn create_layout(&mut self, layout: &LayoutFile) -> Result<LayoutId>;
    fn update_layout(&mut self, layout: &LayoutFile) -> Result<()>;
    fn import_layout(&mut self, path: &Path) -> Result<LayoutId>;
    fn export_layout(&self, id: &LayoutId, path: &Path) -> Result<()>;
}

/// Shader metadata service.
pub trait ShaderCatalog {
    fn available_shaders(&self) -> Result<Vec<ShaderInfo>>;
    fn shader_info(&self, id: &str) -> Result<Option<ShaderInfo>>;
}

/// Layout repository backed by process memory, with file import/export.
///
/// Stands in for the out-of-process store during tests and headless
/// use; import/export exchange the same JSON document the daemon does.
#[derive(Debug, Clone, Default)]
pub struct MemoryLayoutRepository {
    layouts: HashMap<LayoutId, LayoutFile>,
}

impl MemoryLayoutRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn contains(&self, id: &LayoutId) -> bool {
        self.layouts.contains_key(id)
    }
}

impl LayoutRepository for MemoryLayoutRepository {
    fn load_layout(&self, id: &LayoutId) -> Result<LayoutFile> {
        self.layouts.get(id).cloned().ok_or_else(|| {
            ServiceError::LoadFailed {
                reason: format!("no layout with id {id}"),
            }
            .into()
        })
    }

    fn create_layout(&mut self, layout: &LayoutFile) -> Result<LayoutId> {
        let id = LayoutId::from(layout.id);
        if self.layouts.contains_key(&id) {
            return Err(ServiceError::SaveFailed {
                reason: format!("layout {id} already exists"),
            }
            .into());
        }
        self.layouts.insert(id, layout.clone());
        Ok(id)
    }

    fn update_layout(&mut self, layout: &LayoutFile) -> Result<()> {
        let id = LayoutId::from(layout.id);
        self.layouts.insert(id, layout.clone());
        Ok(())
    }

    fn import_layout(&mut self, path: &Path) -> Result<LayoutId> {
        let content = std::fs::read_to_string(path).map_err(|err| ServiceError::ImportFailed {
            reason: err.to_string(),
        })?;
        let layout: LayoutFile =
            serde_json::from_str(&content).map_err(|err| ServiceError::ImportFailed {
                reason: err.to_string(),
            })?;
        let id = LayoutId::from(layout.id);
        self.layouts.insert(id, layout);
        Ok(id)
    }

    fn export_layout(&self, id: &LayoutId, path: &Path) -> Result<()> {
        let layout = self.layouts.get(id).ok_or_else(|| ServiceError::ExportFailed {
            reason: format!("no layout with id {id}"),
        })?;
        let json =
            serde_json::to_string_pretty(layout).map_err(|err| ServiceError::ExportFailed {
                reason: err.to_string(),
            })?;
        std::fs::write(path, json).map_err(|err| ServiceError::ExportFailed {
            reason: err.to_string(),
        })?;
        Ok(())
    }
}

/// Shader catalog over a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticShaderCatalog {
    shaders: Vec<ShaderInfo>,
}

impl StaticShaderCatalog {
    pub fn new(shaders: Vec<ShaderInfo>) -> Self {
        Self { shaders }
    }
}

impl ShaderCatalog for StaticShaderCatalog {
    fn available_shaders(&self) -> Result<Vec<ShaderInfo>> {
        Ok(self.shaders.clone())
    }

    fn shader_info(&self, id: &str) -> Result<Option<ShaderInfo>> {
        Ok(self.shaders.iter().find(|shader| shader.id == id).cloned())
    }
}
