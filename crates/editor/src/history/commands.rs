//! Reversible edit commands.
//!
//! Commands do not hold the registry. It is passed to `execute`/`undo`, and a
//! command keeps only what it needs to reverse itself.

use shared::{ObjectId, ObjectSnapshot, Primitive};

use crate::error::{EditorError, EditorResult};
use crate::geometry::GeometryBackend;
use crate::state::SceneRegistry;

/// Identity handed out on the first successful execute
#[derive(Clone, Debug, PartialEq)]
struct Assigned {
    id: ObjectId,
    name: String,
}

/// Place a new primitive
#[derive(Clone, Debug)]
pub struct CreateCommand {
    primitive: Primitive,
    assigned: Option<Assigned>,
}

impl CreateCommand {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            assigned: None,
        }
    }

    /// Id of the created object, once executed
    pub fn id(&self) -> Option<&ObjectId> {
        self.assigned.as_ref().map(|a| &a.id)
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub fn execute<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<()> {
        match &self.assigned {
            // Replay keeps the identity from the first run
            Some(a) => registry.create_with_id(&a.id, &a.name, self.primitive.clone()),
            None => {
                let id = registry.create(self.primitive.clone())?;
                let name = registry.get(&id)?.name.clone();
                self.assigned = Some(Assigned { id, name });
                Ok(())
            }
        }
    }

    pub fn undo<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<()> {
        let assigned = self.assigned.as_ref().ok_or(EditorError::NotExecuted)?;
        registry.remove(&assigned.id)?;
        Ok(())
    }
}

/// Remove an object, keeping a snapshot to restore it
#[derive(Clone, Debug)]
pub struct DeleteCommand {
    id: ObjectId,
    snapshot: Option<ObjectSnapshot>,
}

impl DeleteCommand {
    pub fn new(id: impl Into<ObjectId>) -> Self {
        Self {
            id: id.into(),
            snapshot: None,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// State captured by the last execute
    pub fn snapshot(&self) -> Option<&ObjectSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn execute<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<()> {
        let snapshot = registry.get(&self.id)?.snapshot();
        registry.remove(&self.id)?;
        self.snapshot = Some(snapshot);
        Ok(())
    }

    pub fn undo<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<()> {
        let snapshot = self.snapshot.as_ref().ok_or(EditorError::NotExecuted)?;
        registry.restore(&self.id, snapshot)
    }
}

/// Copy an object, shifted by an offset
#[derive(Clone, Debug)]
pub struct DuplicateCommand {
    source: ObjectId,
    offset: [f64; 3],
    assigned: Option<Assigned>,
}

impl DuplicateCommand {
    pub const DEFAULT_OFFSET: [f64; 3] = [1.0, 1.0, 0.0];

    pub fn new(source: impl Into<ObjectId>) -> Self {
        Self::with_offset(source, Self::DEFAULT_OFFSET)
    }

    pub fn with_offset(source: impl Into<ObjectId>, offset: [f64; 3]) -> Self {
        Self {
            source: source.into(),
            offset,
            assigned: None,
        }
    }

    pub fn source(&self) -> &ObjectId {
        &self.source
    }

    /// Id of the copy, once executed
    pub fn id(&self) -> Option<&ObjectId> {
        self.assigned.as_ref().map(|a| &a.id)
    }

    pub fn execute<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<()> {
        let primitive = registry.get(&self.source)?.primitive.translated(self.offset);
        match &self.assigned {
            Some(a) => registry.create_with_id(&a.id, &a.name, primitive),
            None => {
                let id = registry.create(primitive)?;
                let name = registry.get(&id)?.name.clone();
                self.assigned = Some(Assigned { id, name });
                Ok(())
            }
        }
    }

    pub fn undo<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<()> {
        let assigned = self.assigned.as_ref().ok_or(EditorError::NotExecuted)?;
        registry.remove(&assigned.id)?;
        Ok(())
    }
}

/// A reversible command in the editor
#[derive(Clone, Debug)]
pub enum EditCommand {
    Create(CreateCommand),
    Delete(DeleteCommand),
    Duplicate(DuplicateCommand),
}

impl EditCommand {
    pub fn create(primitive: Primitive) -> Self {
        EditCommand::Create(CreateCommand::new(primitive))
    }

    pub fn delete(id: impl Into<ObjectId>) -> Self {
        EditCommand::Delete(DeleteCommand::new(id))
    }

    pub fn duplicate(source: impl Into<ObjectId>, offset: [f64; 3]) -> Self {
        EditCommand::Duplicate(DuplicateCommand::with_offset(source, offset))
    }

    pub fn execute<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<()> {
        match self {
            EditCommand::Create(cmd) => cmd.execute(registry),
            EditCommand::Delete(cmd) => cmd.execute(registry),
            EditCommand::Duplicate(cmd) => cmd.execute(registry),
        }
    }

    pub fn undo<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<()> {
        match self {
            EditCommand::Create(cmd) => cmd.undo(registry),
            EditCommand::Delete(cmd) => cmd.undo(registry),
            EditCommand::Duplicate(cmd) => cmd.undo(registry),
        }
    }

    /// Object produced (create/duplicate) or removed (delete)
    pub fn object_id(&self) -> Option<&ObjectId> {
        match self {
            EditCommand::Create(cmd) => cmd.id(),
            EditCommand::Delete(cmd) => Some(cmd.id()),
            EditCommand::Duplicate(cmd) => cmd.id(),
        }
    }

    /// Short label for logs and the history panel
    pub fn label(&self) -> &'static str {
        match self {
            EditCommand::Create(_) => "create",
            EditCommand::Delete(_) => "delete",
            EditCommand::Duplicate(_) => "duplicate",
        }
    }
}

impl From<CreateCommand> for EditCommand {
    fn from(cmd: CreateCommand) -> Self {
        EditCommand::Create(cmd)
    }
}

impl From<DeleteCommand> for EditCommand {
    fn from(cmd: DeleteCommand) -> Self {
        EditCommand::Delete(cmd)
    }
}

impl From<DuplicateCommand> for EditCommand {
    fn from(cmd: DuplicateCommand) -> Self {
        EditCommand::Duplicate(cmd)
    }
}
