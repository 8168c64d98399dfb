use std::fmt;

use serde_json::Value;

use crate::entity::{Entity, EntityId};
use crate::error::{SaveError, SaveResult};
use crate::index::UpsertOutcome;
use crate::model::EditableModel;
use crate::view::FieldPath;

/// Where an [`EditSession`] is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    /// Nothing selected.
    Idle,
    /// One entity selected, with a working copy that edits go to.
    Editing {
        /// The selected entity.
        id: EntityId,
        /// Uncommitted copy of the selected entity.
        working: Box<Entity>,
    },
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Editing { id, .. } => write!(f, "editing {id}"),
        }
    }
}

/// Holds the current model and at most one pending edit.
///
/// `Idle --select--> Editing --commit/discard--> Idle`. Selecting while
/// editing drops the pending working copy. Failed actions leave both the
/// state and the model untouched.
#[derive(Debug, Clone)]
pub struct EditSession {
    model: EditableModel,
    state: EditState,
}

impl EditSession {
    /// Open a session on a freshly read model.
    pub fn open(model: EditableModel) -> Self {
        Self {
            model,
            state: EditState::Idle,
        }
    }

    /// The current model version.
    pub fn model(&self) -> &EditableModel {
        &self.model
    }

    /// The current state.
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Id of the selected entity, if any.
    pub fn selected_id(&self) -> Option<&EntityId> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing { id, .. } => Some(id),
        }
    }

    /// Select an entity, replacing any previous selection.
    pub fn select(&mut self, id: &EntityId) -> SaveResult<()> {
        let entity = self
            .model
            .index
            .get(id)
            .ok_or_else(|| SaveError::EntityNotFound(id.clone()))?
            .clone();

        if let EditState::Editing { id: previous, working } = &self.state {
            let dirty = self.model.index.get(previous) != Some(working.as_ref());
            tracing::debug!(%previous, dirty, "dropping previous selection");
        }

        self.state = EditState::Editing {
            id: id.clone(),
            working: Box::new(entity),
        };
        Ok(())
    }

    /// The working copy of the selected entity.
    pub fn working(&self) -> Option<&Entity> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing { working, .. } => Some(working.as_ref()),
        }
    }

    /// Mutable access to the working copy.
    pub fn working_mut(&mut self) -> Option<&mut Entity> {
        match &mut self.state {
            EditState::Idle => None,
            EditState::Editing { working, .. } => Some(working.as_mut()),
        }
    }

    /// Set one field of the working copy.
    pub fn set_field(&mut self, path: FieldPath, value: Value) -> SaveResult<()> {
        let state = self.state.to_string();
        let working = self.working_mut().ok_or(SaveError::InvalidTransition {
            action: "edit",
            state,
        })?;
        path.set(working, value)
    }

    /// Commit `edited` as the new version of the selected entity and
    /// return to idle.
    pub fn commit(&mut self, edited: Entity) -> SaveResult<UpsertOutcome> {
        let selected = match &self.state {
            EditState::Idle => {
                return Err(SaveError::InvalidTransition {
                    action: "commit",
                    state: self.state.to_string(),
                });
            }
            EditState::Editing { id, .. } => id,
        };
        if *selected != edited.id {
            return Err(SaveError::IdMismatch {
                selected: selected.clone(),
                edited: edited.id,
            });
        }

        let outcome = self.model.apply(edited);
        self.state = EditState::Idle;
        Ok(outcome)
    }

    /// Commit the working copy.
    pub fn commit_working(&mut self) -> SaveResult<UpsertOutcome> {
        let edited = self.working().cloned().ok_or(SaveError::InvalidTransition {
            action: "commit",
            state: self.state.to_string(),
        })?;
        self.commit(edited)
    }

    /// Drop the working copy and return to idle.
    pub fn discard(&mut self) -> SaveResult<()> {
        if self.state == EditState::Idle {
            return Err(SaveError::InvalidTransition {
                action: "discard",
                state: self.state.to_string(),
            });
        }
        self.state = EditState::Idle;
        Ok(())
    }

    /// End the session, keeping only committed edits.
    pub fn close(self) -> EditableModel {
        self.model
    }
}
