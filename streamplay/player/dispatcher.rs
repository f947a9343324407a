use crate::console::Console;
use crate::player::message::{Kind, Message, Origin};
use glib::ControlFlow;
use log::{debug, error, info, warn};

/// Reacts to one bus message at a time.
///
/// `Break` asks the event loop to stop; the loop delivers nothing to the
/// handler afterwards.
pub trait Handler {
    fn handle(&mut self, message: &Message) -> ControlFlow;
}

pub struct Dispatcher {
    console: Console,
    quit_on_eos: bool,
}

impl Dispatcher {
    pub fn new(console: Console, quit_on_eos: bool) -> Self {
        Self {
            console,
            quit_on_eos,
        }
    }
}

impl Handler for Dispatcher {
    fn handle(&mut self, message: &Message) -> ControlFlow {
        match &message.kind {
            Kind::Error { text, detail } => {
                error!("Error from {:?}: {text} ({detail:?})", message.origin);
                self.console.eprintln(format_args!("[ERROR] {text}"));
                self.console
                    .eprintln(format_args!("Details: {}", detail.as_deref().unwrap_or("none")));
                ControlFlow::Break
            }
            Kind::Warning { text, detail } => {
                warn!("Warning from {:?}: {text}", message.origin);
                if let Some(detail) = detail {
                    debug!("Warning details: {detail}");
                }
                self.console.eprintln(format_args!("[WARN] {text}"));
                ControlFlow::Continue
            }
            Kind::StateChanged { old, new, pending } => {
                if let Origin::Element(name) = &message.origin {
                    debug!("Element {name} changed state: {old} -> {new}");
                    return ControlFlow::Continue;
                }
                info!("Playbin changed state: {old} -> {new} (pending {pending})");
                self.console.println(format_args!("[STATE] {old} -> {new}"));
                ControlFlow::Continue
            }
            Kind::Eos if self.quit_on_eos => {
                info!("End of stream reached, quitting");
                self.console.println("End of stream");
                ControlFlow::Break
            }
            Kind::Eos => {
                info!("End of stream reached");
                ControlFlow::Continue
            }
            Kind::Other(kind) => {
                debug!("Ignoring {kind} message");
                ControlFlow::Continue
            }
        }
    }
}
