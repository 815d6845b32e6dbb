//! Per-row view model for the posts table.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Classification, ReconciledDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Amber,
    Blue,
    Green,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTag {
    pub label: String,
    pub color: StatusColor,
}

impl StatusTag {
    pub fn for_classification(classification: Classification) -> Self {
        let color = match classification {
            Classification::Draft => StatusColor::Amber,
            Classification::Modified => StatusColor::Blue,
            Classification::Published => StatusColor::Green,
        };
        Self {
            label: classification.to_string(),
            color,
        }
    }
}

/// Which snapshot an edit opens. The CMS only lets an unpublished snapshot be changed
/// when it is opened in draft mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditTarget {
    pub logical_id: String,
    pub open_as_draft: bool,
}

impl EditTarget {
    /// CMS `status` access mode for this target.
    pub fn access_mode(&self) -> &'static str {
        if self.open_as_draft {
            "draft"
        } else {
            "published"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    Edit,
    Delete,
}

/// A command a row hands to the caller when an action is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCommand {
    Edit(EditTarget),
    Delete { logical_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub logical_id: String,
    pub title: String,
    pub slug: String,
    pub status: StatusTag,
    pub edit_target: EditTarget,
    pub actions: Vec<RowAction>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn to_row(doc: &ReconciledDocument) -> RowView {
    let (open_as_draft, actions) = match doc.classification {
        Classification::Draft => (true, vec![RowAction::Edit, RowAction::Delete]),
        // A published snapshot still exists; deleting would orphan it.
        Classification::Modified => (true, vec![RowAction::Edit]),
        Classification::Published => (false, vec![RowAction::Edit]),
    };

    RowView {
        logical_id: doc.logical_id.clone(),
        title: doc.representative.title.clone(),
        slug: doc.representative.slug.clone(),
        status: StatusTag::for_classification(doc.classification),
        edit_target: EditTarget {
            logical_id: doc.logical_id.clone(),
            open_as_draft,
        },
        actions,
        published_at: doc.latest_published_at,
        updated_at: doc.representative.updated_at,
    }
}

impl RowView {
    pub fn permits(&self, action: RowAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn command_for(&self, action: RowAction) -> Option<RowCommand> {
        if !self.permits(action) {
            return None;
        }
        Some(match action {
            RowAction::Edit => RowCommand::Edit(self.edit_target.clone()),
            RowAction::Delete => RowCommand::Delete {
                logical_id: self.logical_id.clone(),
            },
        })
    }

    pub fn commands(&self) -> Vec<RowCommand> {
        self.actions.iter().filter_map(|a| self.command_for(*a)).collect()
    }

    /// Hand the command for `action` to `sink`. Returns false, without calling `sink`,
    /// when the row does not permit the action.
    pub fn dispatch(&self, action: RowAction, sink: &mut impl FnMut(RowCommand)) -> bool {
        match self.command_for(action) {
            Some(cmd) => {
                sink(cmd);
                true
            }
            None => false,
        }
    }
}
