pub mod dispatcher;
pub mod gst_logic;
pub mod message;
#[cfg(test)]
mod scripted;
pub mod session;

pub use dispatcher::Dispatcher;
pub use gst_logic::Playbin;
pub use message::State;
pub use session::{Playback, Session};

use crate::console::Console;
use crate::error::App;
use log::{error, warn};

/// Opens `uri`, plays it until the loop exits, then stops it.
///
/// Only a failure to construct the playback object is returned as an error;
/// bus errors end the loop and still count as a clean run.
pub fn play<P, F>(uri: &str, open: F, console: &Console, quit_on_eos: bool) -> Result<(), App>
where
    P: Playback,
    F: FnOnce(&str) -> Result<P, App>,
{
    let playback = open(uri).inspect_err(|e| {
        error!("{e}");
        console.eprintln(format_args!("{}. Check GStreamer installation.", e.message()));
    })?;

    let dispatcher = Dispatcher::new(console.clone(), quit_on_eos);
    let session = Session::start(playback, uri, dispatcher, console.clone()).inspect_err(|e| {
        error!("{e}");
        console.eprintln(e);
    })?;

    if let Err(e) = session.request_state(State::Playing) {
        warn!("{e} for {}, waiting for the bus to report why", session.uri());
    }

    session.run();

    if let Err(e) = session.shutdown() {
        error!("Failed to stop playback: {e}");
    }
    Ok(())
}
