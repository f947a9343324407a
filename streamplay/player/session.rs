use crate::console::Console;
use crate::error::App;
use crate::player::dispatcher::Handler;
use crate::player::message::State;
use log::{error, info};

/// The framework side of a playback session.
pub trait Playback {
    /// Attaches `handler` to the bus. Messages posted afterwards reach it.
    fn watch<H: Handler + 'static>(&mut self, handler: H) -> Result<(), App>;

    /// Requests a state change. Completion is reported on the bus.
    fn set_state(&self, state: State) -> Result<(), App>;

    /// Blocks until the handler breaks or the process is interrupted.
    fn run(&self);
}

/// Owns the playback object from `start` until it is shut down.
///
/// Teardown happens exactly once: through [`Session::shutdown`], or on drop
/// when an early return or panic skips it.
pub struct Session<P: Playback> {
    playback: Option<P>,
    uri: String,
    console: Console,
}

impl<P: Playback> Session<P> {
    pub fn start<H: Handler + 'static>(
        mut playback: P,
        uri: &str,
        handler: H,
        console: Console,
    ) -> Result<Self, App> {
        playback.watch(handler)?;
        console.println(format_args!("Starting playback: {uri}"));
        info!("Starting playback of {uri}");

        Ok(Self {
            playback: Some(playback),
            uri: uri.to_string(),
            console,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn request_state(&self, state: State) -> Result<(), App> {
        match &self.playback {
            Some(playback) => playback.set_state(state),
            None => Err(App::State("Session already shut down".to_string())),
        }
    }

    pub fn run(&self) {
        if let Some(playback) = &self.playback {
            playback.run();
        }
    }

    pub fn shutdown(mut self) -> Result<(), App> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<(), App> {
        let Some(playback) = self.playback.take() else {
            return Ok(());
        };
        self.console.println("Stopping playback...");
        info!("Stopping playback of {}", self.uri);
        playback.set_state(State::Null)
    }
}

impl<P: Playback> Drop for Session<P> {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            error!("Failed to stop playback: {e}");
        }
    }
}
