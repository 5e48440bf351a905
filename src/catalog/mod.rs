// Concrete selection providers backed by a catalog snapshot
//
// The labeling platform's workspaces, classes and users are exported to a
// JSON file; the selectors here implement the workflow traits over it.

pub mod selectors;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

use crate::workflow::types::{ClassDescriptor, TeamId, UserDescriptor, UserId, WorkspaceId};
use crate::workflow::types::{LABELER_ROLES, REVIEWER_ROLES};
use crate::workflow::StepSelectors;

pub use selectors::{CatalogClassSelector, CatalogUserSelector, CatalogWorkspaceSelector};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Catalog {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    pub id: WorkspaceId,
    pub team_id: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub workspaces: Vec<WorkspaceInfo>,
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
    #[serde(default)]
    pub users: Vec<UserDescriptor>,
}

impl CatalogSnapshot {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn workspace(&self, id: WorkspaceId) -> Option<&WorkspaceInfo> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn user(&self, id: UserId) -> Option<&UserDescriptor> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Fresh selectors for one step over a shared snapshot
    pub fn selectors(catalog: &Rc<Self>) -> StepSelectors {
        StepSelectors {
            workspace: Box::new(CatalogWorkspaceSelector::new(Rc::clone(catalog))),
            classes: Box::new(CatalogClassSelector::new(catalog.classes.clone())),
            reviewers: Box::new(CatalogUserSelector::new(Rc::clone(catalog), REVIEWER_ROLES)),
            labelers: Box::new(CatalogUserSelector::new(Rc::clone(catalog), LABELER_ROLES)),
        }
    }
}
