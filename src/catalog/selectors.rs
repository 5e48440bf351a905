use std::rc::Rc;
use tracing::{debug, warn};

use super::CatalogSnapshot;
use crate::workflow::traits::{ClassCatalog, SelectionProvider, UserCatalog};
use crate::workflow::types::{ClassDescriptor, TeamId, UserDescriptor, UserId, UserRole, WorkspaceId};

/// Workspace picker deriving the team from the catalog
#[derive(Debug)]
pub struct CatalogWorkspaceSelector {
    catalog: Rc<CatalogSnapshot>,
    workspace_id: Option<WorkspaceId>,
    team_id: Option<TeamId>,
}

impl CatalogWorkspaceSelector {
    pub fn new(catalog: Rc<CatalogSnapshot>) -> Self {
        Self {
            catalog,
            workspace_id: None,
            team_id: None,
        }
    }
}

impl SelectionProvider for CatalogWorkspaceSelector {
    fn selected_id(&self) -> Option<WorkspaceId> {
        self.workspace_id
    }

    fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    fn select(&mut self, workspace_id: Option<WorkspaceId>) {
        self.workspace_id = workspace_id;
        self.team_id = workspace_id.and_then(|id| match self.catalog.workspace(id) {
            Some(workspace) => Some(workspace.team_id),
            None => {
                warn!(workspace_id = id, "Workspace not found in catalog");
                None
            }
        });
    }

    fn set_ids(&mut self, team_id: Option<TeamId>, workspace_id: Option<WorkspaceId>) {
        self.team_id = team_id;
        self.workspace_id = workspace_id;
    }
}

/// Class picker over a replaceable list of offered classes
#[derive(Debug, Default)]
pub struct CatalogClassSelector {
    available: Vec<ClassDescriptor>,
    selected: Vec<ClassDescriptor>,
}

impl CatalogClassSelector {
    pub fn new(available: Vec<ClassDescriptor>) -> Self {
        Self {
            available,
            selected: Vec::new(),
        }
    }

    pub fn available(&self) -> &[ClassDescriptor] {
        &self.available
    }
}

impl ClassCatalog for CatalogClassSelector {
    fn selected_classes(&self) -> Vec<ClassDescriptor> {
        self.selected.clone()
    }

    fn register(&mut self, classes: Vec<ClassDescriptor>) {
        self.available = classes;
        self.selected.retain(|c| self.available.contains(c));
    }

    fn resolve_by_name(&mut self, names: &[String]) -> Vec<ClassDescriptor> {
        let mut selected: Vec<ClassDescriptor> = Vec::new();
        for name in names {
            if selected.iter().any(|c| &c.name == name) {
                continue;
            }
            match self.available.iter().find(|c| &c.name == name) {
                Some(class) => selected.push(class.clone()),
                None => warn!(class = %name, "Class not offered by the picker"),
            }
        }
        self.selected = selected;
        self.selected.clone()
    }
}

/// User picker limited to one team's members holding an allowed role
#[derive(Debug)]
pub struct CatalogUserSelector {
    catalog: Rc<CatalogSnapshot>,
    roles: Vec<UserRole>,
    team_id: Option<TeamId>,
    selected: Vec<UserId>,
}

impl CatalogUserSelector {
    pub fn new(catalog: Rc<CatalogSnapshot>, roles: &[UserRole]) -> Self {
        Self {
            catalog,
            roles: roles.to_vec(),
            team_id: None,
            selected: Vec::new(),
        }
    }

    /// Users the picker currently offers
    pub fn eligible_users(&self) -> Vec<&UserDescriptor> {
        self.catalog
            .users
            .iter()
            .filter(|u| self.is_eligible(u))
            .collect()
    }

    fn is_eligible(&self, user: &UserDescriptor) -> bool {
        is_eligible(self.team_id, &self.roles, user)
    }
}

fn is_eligible(team_id: Option<TeamId>, roles: &[UserRole], user: &UserDescriptor) -> bool {
    match team_id {
        Some(team_id) => user.is_member_of(team_id) && roles.contains(&user.role),
        None => false,
    }
}

impl UserCatalog for CatalogUserSelector {
    fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    fn scope_to_team(&mut self, team_id: Option<TeamId>) {
        self.team_id = team_id;
        let before = self.selected.len();
        let (catalog, roles) = (&self.catalog, &self.roles);
        self.selected
            .retain(|id| catalog.user(*id).is_some_and(|u| is_eligible(team_id, roles, u)));
        if self.selected.len() != before {
            debug!(
                team_id = ?team_id,
                dropped = before - self.selected.len(),
                "Dropped selected users outside the new team"
            );
        }
    }

    fn select_by_ids(&mut self, team_id: Option<TeamId>, ids: &[UserId]) {
        self.team_id = team_id;
        let mut selected = Vec::new();
        for id in ids {
            if selected.contains(id) {
                continue;
            }
            match self.catalog.user(*id) {
                Some(user) if self.is_eligible(user) => selected.push(*id),
                _ => warn!(user_id = id, team_id = ?team_id, "User cannot be selected for this team"),
            }
        }
        self.selected = selected;
    }

    fn current_selection(&self) -> Vec<UserDescriptor> {
        self.selected
            .iter()
            .filter_map(|id| self.catalog.user(*id).cloned())
            .collect()
    }
}
