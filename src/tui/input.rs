use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    ToggleFocused,
    SwitchFocus,
    SkipBack,
    SkipForward,
    VolumeUp,
    VolumeDown,
    SeekFraction(f64),
    Reset,
    SelectMode(usize),
    CycleMode,
}

pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Enter => Action::ToggleFocused,
        KeyCode::Tab | KeyCode::BackTab => Action::SwitchFocus,
        KeyCode::Left | KeyCode::Char('h') => Action::SkipBack,
        KeyCode::Right | KeyCode::Char('l') => Action::SkipForward,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Action::VolumeUp,
        KeyCode::Char('-') | KeyCode::Down => Action::VolumeDown,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('m') => Action::CycleMode,
        KeyCode::Char(c @ '1'..='9') => Action::SelectMode(c as usize - '1' as usize),
        _ => return None,
    };
    Some(action)
}

/// Turns a left click inside the seek bar into the clicked fraction of its
/// width.
pub fn map_mouse(mouse: MouseEvent, seek_bar: Option<Rect>) -> Option<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    let bar = seek_bar?;
    if bar.width == 0
        || mouse.column < bar.x
        || mouse.column >= bar.x + bar.width
        || mouse.row < bar.y
        || mouse.row >= bar.y + bar.height
    {
        return None;
    }

    let offset = f64::from(mouse.column - bar.x);
    Some(Action::SeekFraction(offset / f64::from(bar.width)))
}
