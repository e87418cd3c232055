//=========================================================================
// Command Queue
//=========================================================================
//
// FIFO of commands for the current frame.
//
// Producers (player input, game rules) push during event handling; the
// world drains the queue once per update.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

//=== Internal Dependencies ===============================================

use super::Command;
use crate::core::error::{CoreError, CoreResult};

//=== CommandQueue ========================================================

/// First-in, first-out queue of [`Command`]s.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a command at the back.
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Removes and returns the oldest command.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty; check [`is_empty`](Self::is_empty)
    /// or use [`try_pop`](Self::try_pop).
    #[track_caller]
    pub fn pop(&mut self) -> Command {
        match self.try_pop() {
            Ok(command) => command,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible twin of [`pop`](Self::pop).
    pub fn try_pop(&mut self) -> CoreResult<Command> {
        self.queue.pop_front().ok_or(CoreError::EmptyCommandQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drops every pending command.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::Category;
    use crate::core::scene::SceneNode;
    use std::time::Duration;

    fn tagged(category: Category) -> Command {
        Command::new(category, |_, _| {})
    }

    #[test]
    fn new_queue_is_empty() {
        let queue = CommandQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn pop_returns_commands_in_push_order() {
        let mut queue = CommandQueue::new();
        queue.push(tagged(Category::PLAYER_AIRCRAFT));
        queue.push(tagged(Category::ENEMY_AIRCRAFT));
        queue.push(tagged(Category::SCENE));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().category(), Category::PLAYER_AIRCRAFT);
        assert_eq!(queue.pop().category(), Category::ENEMY_AIRCRAFT);
        assert_eq!(queue.pop().category(), Category::SCENE);
        assert!(queue.is_empty());
    }

    #[test]
    fn pushing_same_command_twice_yields_two_entries() {
        let command = Command::new(Category::SCENE, |node: &mut SceneNode, _: Duration| {
            node.transform_mut().rotate(1.0);
        });
        let mut queue = CommandQueue::new();
        queue.push(command.clone());
        queue.push(command);

        let mut node = SceneNode::container();
        while let Ok(command) = queue.try_pop() {
            command.execute(&mut node, Duration::ZERO);
        }
        assert_eq!(node.transform().rotation(), 2.0);
    }

    #[test]
    fn try_pop_on_empty_reports_error() {
        let mut queue = CommandQueue::new();
        assert!(matches!(queue.try_pop(), Err(CoreError::EmptyCommandQueue)));
    }

    #[test]
    #[should_panic(expected = "pop from an empty command queue")]
    fn pop_on_empty_panics() {
        CommandQueue::new().pop();
    }

    #[test]
    fn clear_drops_pending_commands() {
        let mut queue = CommandQueue::new();
        queue.push(tagged(Category::SCENE));
        queue.clear();
        assert!(queue.is_empty());
    }
}
