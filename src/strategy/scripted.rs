//! Controller that replays a fixed list of commands.
//!
//! Used by tests and demos to drive a seat exactly. Every notice it receives
//! is kept in a shared `NoticeLog` that stays readable after the controller
//! has been handed to a `TurnController`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{Command, Controller, Notice, PlayerView};
use crate::core::participant::ControllerKind;

/// Shared record of received notices.
#[derive(Clone, Debug, Default)]
pub struct NoticeLog(Rc<RefCell<Vec<Notice>>>);

impl NoticeLog {
    /// Copy of everything received so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn contains(&self, notice: &Notice) -> bool {
        self.0.borrow().contains(notice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn push(&self, notice: Notice) {
        self.0.borrow_mut().push(notice);
    }
}

/// Pops commands front to back. Once the script is exhausted it answers
/// `EndTurn`, which is rejected outside the accusation window.
#[derive(Debug)]
pub struct ScriptedController {
    kind: ControllerKind,
    script: VecDeque<Command>,
    log: NoticeLog,
}

impl ScriptedController {
    pub fn new(kind: ControllerKind, commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            kind,
            script: commands.into_iter().collect(),
            log: NoticeLog::default(),
        }
    }

    /// Handle on the notices this controller receives.
    #[must_use]
    pub fn log(&self) -> NoticeLog {
        self.log.clone()
    }

    /// Commands not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Controller for ScriptedController {
    fn kind(&self) -> ControllerKind {
        self.kind
    }

    fn decide(&mut self, _view: &PlayerView<'_>) -> Command {
        self.script.pop_front().unwrap_or(Command::EndTurn)
    }

    fn notify(&mut self, notice: &Notice) {
        self.log.push(notice.clone());
    }
}
