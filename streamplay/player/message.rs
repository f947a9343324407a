use gstreamer::prelude::*;
use gstreamer::MessageView;
use std::fmt;

/// Coarse lifecycle stage of the playbin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    VoidPending,
    Null,
    Ready,
    Paused,
    Playing,
}

impl State {
    pub fn name(self) -> &'static str {
        match self {
            State::VoidPending => "void-pending",
            State::Null => "null",
            State::Ready => "ready",
            State::Paused => "paused",
            State::Playing => "playing",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<gstreamer::State> for State {
    fn from(state: gstreamer::State) -> Self {
        match state {
            gstreamer::State::Null => State::Null,
            gstreamer::State::Ready => State::Ready,
            gstreamer::State::Paused => State::Paused,
            gstreamer::State::Playing => State::Playing,
            _ => State::VoidPending,
        }
    }
}

impl From<State> for gstreamer::State {
    fn from(state: State) -> Self {
        match state {
            State::VoidPending => gstreamer::State::VoidPending,
            State::Null => gstreamer::State::Null,
            State::Ready => gstreamer::State::Ready,
            State::Paused => gstreamer::State::Paused,
            State::Playing => gstreamer::State::Playing,
        }
    }
}

/// Which object posted a message.
///
/// Only the playbin itself counts as the session. Its children (demuxers,
/// decoders, sinks) post their own state changes on the same bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    Session,
    Element(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    Error {
        text: String,
        detail: Option<String>,
    },
    Warning {
        text: String,
        detail: Option<String>,
    },
    StateChanged {
        old: State,
        new: State,
        pending: State,
    },
    Eos,
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub origin: Origin,
    pub kind: Kind,
}

impl Message {
    pub fn new(origin: Origin, kind: Kind) -> Self {
        Self { origin, kind }
    }

    /// Converts a bus message, comparing its source with `session` by
    /// identity. A recreated or reparented playbin is not recognised.
    pub fn from_gst(msg: &gstreamer::Message, session: &gstreamer::Object) -> Self {
        let origin = match msg.src() {
            Some(src) if src == session => Origin::Session,
            Some(src) => Origin::Element(src.name().to_string()),
            None => Origin::Element(String::new()),
        };

        let kind = match msg.view() {
            MessageView::Error(err) => Kind::Error {
                text: err.error().message().to_string(),
                detail: err.debug().map(|d| d.to_string()),
            },
            MessageView::Warning(warning) => Kind::Warning {
                text: warning.error().message().to_string(),
                detail: warning.debug().map(|d| d.to_string()),
            },
            MessageView::StateChanged(changed) => Kind::StateChanged {
                old: changed.old().into(),
                new: changed.current().into(),
                pending: changed.pending().into(),
            },
            MessageView::Eos(_) => Kind::Eos,
            _ => Kind::Other(format!("{:?}", msg.type_())),
        };

        Self::new(origin, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> gstreamer::Bin {
        gstreamer::init().unwrap();
        gstreamer::Bin::with_name("player")
    }

    #[test]
    fn state_names_are_lowercase() {
        let names: Vec<_> = [
            State::Null,
            State::Ready,
            State::Paused,
            State::Playing,
            State::VoidPending,
        ]
        .into_iter()
        .map(State::name)
        .collect();
        assert_eq!(names, ["null", "ready", "paused", "playing", "void-pending"]);
    }

    #[test]
    fn gst_states_map_both_ways() {
        for state in [State::Null, State::Ready, State::Paused, State::Playing] {
            assert_eq!(State::from(gstreamer::State::from(state)), state);
        }
    }

    #[test]
    fn state_change_from_the_session_is_recognised() {
        let bin = session();
        let msg = gstreamer::message::StateChanged::builder(
            gstreamer::State::Ready,
            gstreamer::State::Paused,
            gstreamer::State::Playing,
        )
        .src(&bin)
        .build();

        let message = Message::from_gst(&msg, bin.upcast_ref());
        assert_eq!(message.origin, Origin::Session);
        assert_eq!(
            message.kind,
            Kind::StateChanged {
                old: State::Ready,
                new: State::Paused,
                pending: State::Playing,
            }
        );
    }

    #[test]
    fn state_change_from_a_child_keeps_its_name() {
        let bin = session();
        let child = gstreamer::Bin::with_name("decodebin0");
        let msg = gstreamer::message::StateChanged::builder(
            gstreamer::State::Null,
            gstreamer::State::Ready,
            gstreamer::State::VoidPending,
        )
        .src(&child)
        .build();

        let message = Message::from_gst(&msg, bin.upcast_ref());
        assert_eq!(message.origin, Origin::Element("decodebin0".to_string()));
    }

    #[test]
    fn error_carries_text_and_detail() {
        let bin = session();
        let msg = gstreamer::message::Error::builder(
            gstreamer::ResourceError::NotFound,
            "network unreachable",
        )
        .debug("connection refused")
        .src(&bin)
        .build();

        let message = Message::from_gst(&msg, bin.upcast_ref());
        assert_eq!(
            message.kind,
            Kind::Error {
                text: "network unreachable".to_string(),
                detail: Some("connection refused".to_string()),
            }
        );
    }

    #[test]
    fn warning_without_detail() {
        let bin = session();
        let msg = gstreamer::message::Warning::builder(gstreamer::CoreError::Clock, "clock drift")
            .src(&bin)
            .build();

        let message = Message::from_gst(&msg, bin.upcast_ref());
        assert_eq!(
            message.kind,
            Kind::Warning {
                text: "clock drift".to_string(),
                detail: None,
            }
        );
    }

    #[test]
    fn eos_and_other_kinds() {
        let bin = session();
        let eos = gstreamer::message::Eos::builder().src(&bin).build();
        assert_eq!(Message::from_gst(&eos, bin.upcast_ref()).kind, Kind::Eos);

        let buffering = gstreamer::message::Buffering::builder(40).src(&bin).build();
        assert!(matches!(
            Message::from_gst(&buffering, bin.upcast_ref()).kind,
            Kind::Other(_)
        ));
    }
}
