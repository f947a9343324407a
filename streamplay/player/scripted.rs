//! In-memory [`Playback`] that replays a fixed list of bus messages.

use crate::error::App;
use crate::player::dispatcher::Handler;
use crate::player::message::{Message, State};
use crate::player::session::Playback;
use glib::ControlFlow;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Entries {
    calls: usize,
    watched_at: Option<usize>,
    states: Vec<State>,
    delivered: usize,
    released: usize,
}

/// What a [`Scripted`] playback went through, readable after it is gone.
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Entries>>);

impl Log {
    pub fn watched_at(&self) -> Option<usize> {
        self.0.borrow().watched_at
    }

    pub fn states(&self) -> Vec<State> {
        self.0.borrow().states.clone()
    }

    pub fn delivered(&self) -> usize {
        self.0.borrow().delivered
    }

    pub fn released(&self) -> usize {
        self.0.borrow().released
    }
}

pub struct Scripted {
    script: Vec<Message>,
    interrupt_after: Option<usize>,
    handler: RefCell<Option<Box<dyn Handler>>>,
    log: Log,
}

impl Scripted {
    pub fn new(script: Vec<Message>) -> Self {
        Self {
            script,
            interrupt_after: None,
            handler: RefCell::new(None),
            log: Log::default(),
        }
    }

    /// Ends the loop after `count` messages as if the process got SIGINT.
    pub fn interrupt_after(mut self, count: usize) -> Self {
        self.interrupt_after = Some(count);
        self
    }

    pub fn log(&self) -> Log {
        self.log.clone()
    }
}

impl Playback for Scripted {
    fn watch<H: Handler + 'static>(&mut self, handler: H) -> Result<(), App> {
        let mut entries = self.log.0.borrow_mut();
        entries.watched_at = Some(entries.calls);
        entries.calls += 1;
        *self.handler.borrow_mut() = Some(Box::new(handler));
        Ok(())
    }

    fn set_state(&self, state: State) -> Result<(), App> {
        let mut entries = self.log.0.borrow_mut();
        entries.calls += 1;
        entries.states.push(state);
        Ok(())
    }

    fn run(&self) {
        let mut slot = self.handler.borrow_mut();
        let Some(handler) = slot.as_mut() else {
            return;
        };
        let limit = self.interrupt_after.unwrap_or(self.script.len());
        for message in self.script.iter().take(limit) {
            self.log.0.borrow_mut().delivered += 1;
            if handler.handle(message) == ControlFlow::Break {
                break;
            }
        }
    }
}

impl Drop for Scripted {
    fn drop(&mut self) {
        self.log.0.borrow_mut().released += 1;
    }
}
