// Widget tree handed to the rendering host

use serde::Serialize;

use super::types::{DatasetId, ProjectId, TextStatus, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    Card {
        title: String,
        content: Box<Widget>,
        #[serde(skip_serializing_if = "Option::is_none")]
        content_top_right: Option<Box<Widget>>,
    },
    Container {
        direction: Direction,
        widgets: Vec<Widget>,
    },
    Stepper {
        titles: Vec<String>,
        widgets: Vec<Widget>,
        active_step: u32,
    },
    SelectProject {
        selected: Option<ProjectId>,
    },
    SelectDataset {
        selected: Option<DatasetId>,
    },
    SelectWorkspace {
        selected: Option<u64>,
    },
    SelectClass {
        multiple: bool,
        selected: Vec<String>,
    },
    SelectUser {
        roles: Vec<UserRole>,
        multiple: bool,
        team_id: Option<u64>,
        selected: Vec<u64>,
    },
    Button {
        label: String,
        enabled: bool,
    },
    Text {
        text: String,
        status: TextStatus,
    },
}

impl Widget {
    pub fn card(title: impl Into<String>, content: Widget) -> Self {
        Widget::Card {
            title: title.into(),
            content: Box::new(content),
            content_top_right: None,
        }
    }

    pub fn column(widgets: Vec<Widget>) -> Self {
        Widget::Container {
            direction: Direction::Vertical,
            widgets,
        }
    }

    pub fn button(label: impl Into<String>, enabled: bool) -> Self {
        Widget::Button {
            label: label.into(),
            enabled,
        }
    }

    /// Depth-first search for the first button with the given label
    pub fn find_button(&self, label: &str) -> Option<bool> {
        match self {
            Widget::Button { label: l, enabled } if l == label => Some(*enabled),
            Widget::Card {
                content,
                content_top_right,
                ..
            } => content
                .find_button(label)
                .or_else(|| content_top_right.as_ref().and_then(|w| w.find_button(label))),
            Widget::Container { widgets, .. } | Widget::Stepper { widgets, .. } => {
                widgets.iter().find_map(|w| w.find_button(label))
            }
            _ => None,
        }
    }
}
