// Capabilities a workflow step needs from its selection widgets.
// Steps depend only on these traits so tests can swap in mocks.

#[cfg(test)]
use mockall::automock;

use super::types::{ClassDescriptor, TeamId, UserDescriptor, UserId, WorkspaceId};

/// Workspace picker; the team is derived from the chosen workspace
#[cfg_attr(test, automock)]
pub trait SelectionProvider {
    /// Currently selected workspace
    fn selected_id(&self) -> Option<WorkspaceId>;

    /// Team owning the selected workspace
    fn team_id(&self) -> Option<TeamId>;

    /// Select a workspace and derive its team
    fn select(&mut self, workspace_id: Option<WorkspaceId>);

    /// Restore both ids verbatim without deriving anything
    fn set_ids(&mut self, team_id: Option<TeamId>, workspace_id: Option<WorkspaceId>);
}

/// Multi-select class picker
#[cfg_attr(test, automock)]
pub trait ClassCatalog {
    fn selected_classes(&self) -> Vec<ClassDescriptor>;

    /// Replace the classes the picker offers
    fn register(&mut self, classes: Vec<ClassDescriptor>);

    /// Select offered classes by name and return what was selected.
    /// When several offered classes share a name the first one wins.
    fn resolve_by_name(&mut self, names: &[String]) -> Vec<ClassDescriptor>;
}

/// Multi-select user picker scoped to one team
#[cfg_attr(test, automock)]
pub trait UserCatalog {
    fn team_id(&self) -> Option<TeamId>;

    /// Point the picker at another team's user pool
    fn scope_to_team(&mut self, team_id: Option<TeamId>);

    /// Scope to `team_id` and select the given users
    fn select_by_ids(&mut self, team_id: Option<TeamId>, ids: &[UserId]);

    fn current_selection(&self) -> Vec<UserDescriptor>;
}

/// The four selectors backing one step
pub struct StepSelectors {
    pub workspace: Box<dyn SelectionProvider>,
    pub classes: Box<dyn ClassCatalog>,
    pub reviewers: Box<dyn UserCatalog>,
    pub labelers: Box<dyn UserCatalog>,
}
