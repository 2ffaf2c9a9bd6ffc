//! State machine for the shared popup overlay.
//!
//! The overlay is hidden while `Closed`, visible in every other state. The
//! image reveal runs only once layout has settled (`Opening` -> `Open`), and
//! hiding waits for the closing fade (`Closing` -> `Closed`).

use std::convert::TryFrom;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl fmt::Display for PopupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Opening => write!(f, "Opening"),
            Self::Open => write!(f, "Open"),
            Self::Closing => write!(f, "Closing"),
        }
    }
}

impl PopupState {
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Background elements are pushed behind the overlay while it is shown or
    /// about to be.
    pub const fn suppresses_background(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }

    const fn suffix(open: bool) -> &'static str {
        if open {
            "open"
        } else {
            "closed"
        }
    }

    pub fn overlay_class(self) -> String {
        format!("popup-overlay-{}", Self::suffix(self.suppresses_background()))
    }

    pub fn content_class(self) -> String {
        format!("popup-content-{}", Self::suffix(self.suppresses_background()))
    }

    pub fn image_class(self) -> String {
        format!("popup-image-div-{}", Self::suffix(matches!(self, Self::Open)))
    }
}

/// Where a click on the visible overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed overlay itself, outside the content panel.
    Overlay,
    /// The content panel or anything inside it.
    Content,
}

impl ClickTarget {
    /// Only a click whose target is the overlay node and which did not land
    /// inside the content panel counts as an outside click.
    pub const fn classify(target_is_overlay: bool, inside_content: bool) -> Self {
        if target_is_overlay && !inside_content {
            Self::Overlay
        } else {
            Self::Content
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent {
    ItemClicked(String),
    FramesSettled,
    Click(ClickTarget),
    FadeElapsed { ticket: u64 },
}

impl fmt::Display for PopupEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemClicked(name) => write!(f, "ItemClicked({name})"),
            Self::FramesSettled => write!(f, "FramesSettled"),
            Self::Click(target) => write!(f, "Click({target:?})"),
            Self::FadeElapsed { ticket } => write!(f, "FadeElapsed({ticket})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransitionError {
    pub from: PopupState,
    pub event: PopupEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupMachine {
    state: PopupState,
    item: Option<String>,
    close_ticket: u64,
}

impl Default for PopupMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupMachine {
    pub const fn new() -> Self {
        Self {
            state: PopupState::Closed,
            item: None,
            close_ticket: 0,
        }
    }

    pub const fn state(&self) -> PopupState {
        self.state
    }

    /// Name of the item whose detail is shown.
    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    /// Ticket of the most recent close; a fade timer must present it to hide
    /// the overlay.
    pub const fn close_ticket(&self) -> u64 {
        self.close_ticket
    }

    pub fn process(&mut self, event: &PopupEvent) -> Result<PopupState, StateTransitionError> {
        let NextState(next) = NextState::try_from((&*self, event))?;

        match event {
            PopupEvent::ItemClicked(name) => self.item = Some(name.clone()),
            PopupEvent::FadeElapsed { .. } => self.item = None,
            PopupEvent::Click(ClickTarget::Overlay) => {
                self.close_ticket = self.close_ticket.wrapping_add(1);
            }
            PopupEvent::FramesSettled | PopupEvent::Click(ClickTarget::Content) => {}
        }

        self.state = next;
        Ok(next)
    }
}

struct NextState(PopupState);

impl TryFrom<(&PopupMachine, &PopupEvent)> for NextState {
    type Error = StateTransitionError;

    fn try_from(value: (&PopupMachine, &PopupEvent)) -> Result<Self, Self::Error> {
        let (machine, event) = value;
        let current = machine.state;

        match (current, event) {
            (_, PopupEvent::ItemClicked(_)) => Ok(Self(PopupState::Opening)),
            (PopupState::Opening, PopupEvent::FramesSettled) => Ok(Self(PopupState::Open)),
            (PopupState::Opening | PopupState::Open, PopupEvent::Click(ClickTarget::Overlay)) => {
                Ok(Self(PopupState::Closing))
            }
            (PopupState::Opening | PopupState::Open, PopupEvent::Click(ClickTarget::Content)) => {
                Ok(Self(current))
            }
            (PopupState::Closing, PopupEvent::FadeElapsed { ticket })
                if *ticket == machine.close_ticket =>
            {
                Ok(Self(PopupState::Closed))
            }
            _ => Err(StateTransitionError {
                from: current,
                event: event.clone(),
            }),
        }
    }
}
