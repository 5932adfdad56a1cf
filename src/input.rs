use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use std::{io, time::Duration};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    TimeBack,
    TimeForward,
    ToggleConstellations,
    TogglePlanets,
    ToggleGrid,
    FindEarth,
    ResetView,
    ZoomIn,
    ZoomOut,
    Quit,
}

/// Where the render loop gets its commands from each frame.
pub(crate) trait InputSource {
    fn drain(&mut self) -> anyhow::Result<Vec<Command>>;
}

/// Non-blocking crossterm event reader.
pub(crate) struct TerminalInput;

impl InputSource for TerminalInput {
    fn drain(&mut self) -> anyhow::Result<Vec<Command>> {
        drain_events(|| {
            if event::poll(Duration::ZERO)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })
    }
}

/// Pull events from `next` until it reports none pending.
fn drain_events(mut next: impl FnMut() -> io::Result<Option<Event>>) -> anyhow::Result<Vec<Command>> {
    let mut out = Vec::new();
    while let Some(ev) = next()? {
        if let Some(cmd) = map_event(&ev) {
            out.push(cmd);
        }
    }
    Ok(out)
}

pub(crate) fn map_event(ev: &Event) -> Option<Command> {
    match ev {
        Event::Key(k) => {
            if k.kind != KeyEventKind::Press && k.kind != KeyEventKind::Repeat {
                return None;
            }
            if k.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(k.code, KeyCode::Char('c') | KeyCode::Char('C'))
            {
                return Some(Command::Quit);
            }
            match k.code {
                KeyCode::Left => Some(Command::TimeBack),
                KeyCode::Right => Some(Command::TimeForward),
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::ToggleConstellations),
                KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePlanets),
                KeyCode::Char('g') | KeyCode::Char('G') => Some(Command::ToggleGrid),
                KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::FindEarth),
                KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::ResetView),
                KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::ZoomIn),
                KeyCode::Char('-') => Some(Command::ZoomOut),
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
                _ => None,
            }
        }
        Event::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp => Some(Command::ZoomIn),
            MouseEventKind::ScrollDown => Some(Command::ZoomOut),
            _ => None,
        },
        _ => None,
    }
}
