use crate::frame::Frame;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    UiStateChanged,
    FocusCommitted,
    TransitionFinished,
    CreditsReplaced,
    FrameComposed,
    InputRejected,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::UiStateChanged => "ui_state_changed",
            EventKind::FocusCommitted => "focus_committed",
            EventKind::TransitionFinished => "transition_finished",
            EventKind::CreditsReplaced => "credits_replaced",
            EventKind::FrameComposed => "frame_composed",
            EventKind::InputRejected => "input_rejected",
        }
    }
}

/// Record of one state transition at the event dispatch point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: EventKind,
    pub message: String,
}

/// Append-only log of state transitions, drained by the owner.
///
/// Every mutation of UI, view or credit state goes through one dispatch point
/// which records here, so the data flow can be replayed and asserted on.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: EventKind, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
