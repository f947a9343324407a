use crate::error::App;
use crate::player::dispatcher::Handler;
use crate::player::message::{Message, State};
use crate::player::session::Playback;
use glib::{ControlFlow, MainContext, MainLoop, Priority};
use gstreamer::bus::BusWatchGuard;
use gstreamer::prelude::*;
use gstreamer::Element;
use log::{debug, info};

/// `playbin` plus the main loop that drives its bus.
pub struct Playbin {
    element: Element,
    main_loop: MainLoop,
    watch: Option<BusWatchGuard>,
}

impl Playbin {
    pub fn new(uri: &str) -> Result<Self, App> {
        gstreamer::init()?;
        let element = gstreamer::ElementFactory::make("playbin")
            .name("player")
            .property("uri", uri)
            .build()
            .map_err(|e| App::Element(format!("Failed to create playbin: {}", e.message)))?;
        info!("GStreamer playbin created successfully.");

        Ok(Self::with_element(element))
    }

    /// Wraps an already built element. The loop runs on the calling
    /// thread's default main context.
    pub fn with_element(element: Element) -> Self {
        Self {
            element,
            main_loop: MainLoop::new(Some(&MainContext::ref_thread_default()), false),
            watch: None,
        }
    }

    fn quit_on_signal(&self, signal: &'static str) -> impl Fn() -> ControlFlow + Send + 'static {
        let main_loop = self.main_loop.clone();
        move || {
            info!("Received {signal}, quitting");
            main_loop.quit();
            ControlFlow::Continue
        }
    }
}

impl Playback for Playbin {
    fn watch<H: Handler + 'static>(&mut self, mut handler: H) -> Result<(), App> {
        let bus = self
            .element
            .bus()
            .ok_or_else(|| App::Bus("Failed to get GStreamer bus".to_string()))?;
        let session = self.element.clone().upcast::<gstreamer::Object>();
        let main_loop = self.main_loop.clone();

        // The watch outlives a Break so the guard still owns it at drop.
        let guard = bus
            .add_watch_local(move |_, msg| {
                let message = Message::from_gst(msg, &session);
                if handler.handle(&message) == ControlFlow::Break {
                    main_loop.quit();
                }
                ControlFlow::Continue
            })
            .map_err(|e| App::Bus(e.message.to_string()))?;
        self.watch = Some(guard);
        Ok(())
    }

    fn set_state(&self, state: State) -> Result<(), App> {
        let success = self
            .element
            .set_state(state.into())
            .map_err(|_| App::State(format!("Failed to set playbin to {state}")))?;
        debug!("Requested {state}: {success:?}");
        Ok(())
    }

    fn run(&self) {
        #[cfg(unix)]
        let signals = [(libc::SIGINT, "SIGINT"), (libc::SIGTERM, "SIGTERM")].map(
            |(signum, name)| {
                let source = glib::unix_signal_source_new(
                    signum,
                    Some(name),
                    Priority::DEFAULT,
                    self.quit_on_signal(name),
                );
                source.attach(Some(&self.main_loop.context()));
                source
            },
        );

        self.main_loop.run();

        #[cfg(unix)]
        for source in signals {
            source.destroy();
        }
    }
}
