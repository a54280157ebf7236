//! Cursor-addressed command history.

use crate::error::EditorResult;
use crate::geometry::GeometryBackend;
use crate::state::SceneRegistry;

use super::commands::EditCommand;
use super::MAX_HISTORY_SIZE;

/// Executed commands plus the count of those currently applied.
///
/// Commands `[0, applied)` are applied; `[applied, len)` form the redo tail.
#[derive(Debug)]
pub struct EditHistory {
    commands: Vec<EditCommand>,
    applied: usize,
    /// Maximum applied commands kept (0 = unbounded)
    max_depth: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(MAX_HISTORY_SIZE)
    }
}

impl EditHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            commands: Vec::new(),
            applied: 0,
            max_depth,
        }
    }

    /// Execute a command and record it.
    ///
    /// The redo tail is discarded only after the command succeeds; on failure
    /// the history is left exactly as it was.
    pub fn execute<G: GeometryBackend>(
        &mut self,
        mut command: EditCommand,
        registry: &mut SceneRegistry<G>,
    ) -> EditorResult<&EditCommand> {
        command.execute(registry)?;

        let dropped = self.commands.len() - self.applied;
        if dropped > 0 {
            tracing::debug!("Discarding {dropped} redoable command(s)");
        }
        self.commands.truncate(self.applied);
        tracing::info!("Executed {}", command.label());
        self.commands.push(command);
        self.applied += 1;
        self.trim();

        Ok(&self.commands[self.applied - 1])
    }

    /// Undo the most recent applied command. `Ok(false)` if there is none.
    pub fn undo<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<bool> {
        if self.applied == 0 {
            return Ok(false);
        }
        let command = &mut self.commands[self.applied - 1];
        command.undo(registry)?;
        tracing::info!("Undid {}", command.label());
        self.applied -= 1;
        Ok(true)
    }

    /// Replay the next command of the redo tail. `Ok(false)` if there is none.
    pub fn redo<G: GeometryBackend>(&mut self, registry: &mut SceneRegistry<G>) -> EditorResult<bool> {
        let Some(command) = self.commands.get_mut(self.applied) else {
            return Ok(false);
        };
        command.execute(registry)?;
        tracing::info!("Redid {}", command.label());
        self.applied += 1;
        Ok(true)
    }

    /// Drop all commands
    pub fn clear(&mut self) {
        self.commands.clear();
        self.applied = 0;
        tracing::info!("History cleared");
    }

    /// Index of the last applied command, `None` when nothing is applied
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    pub fn can_redo(&self) -> bool {
        self.applied < self.commands.len()
    }

    pub fn undo_count(&self) -> usize {
        self.applied
    }

    pub fn redo_count(&self) -> usize {
        self.commands.len() - self.applied
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Recorded commands, oldest first
    pub fn commands(&self) -> &[EditCommand] {
        &self.commands
    }

    /// Forget the oldest applied commands beyond `max_depth`
    fn trim(&mut self) {
        if self.max_depth == 0 || self.applied <= self.max_depth {
            return;
        }
        let excess = self.applied - self.max_depth;
        self.commands.drain(..excess);
        self.applied -= excess;
        tracing::debug!("Trimmed {excess} command(s) from history");
    }
}
