//! Domain-level keyboard actions independent of key bindings.

/// What the user asked the demo to do.
///
/// These represent intent, not keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by
/// [`KeyBindings`](crate::config::KeyBindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Scroll up by one step. Default: k/↑
    ScrollUp,
    /// Scroll down by one step. Default: j/↓
    ScrollDown,
    /// Scroll up by one page. Default: Page Up/Ctrl+u
    PageUp,
    /// Scroll down by one page. Default: Page Down/Ctrl+d
    PageDown,
    /// Jump to the first row. Default: g/Home
    ScrollToTop,
    /// Jump to the last page. Default: G/End
    ScrollToBottom,
    /// Exit the demo. Default: q/Ctrl+c
    Quit,
}

/// Scroll state a [`KeyAction`] is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollContext {
    /// Current scroll offset.
    pub value: u64,
    /// Lines per step.
    pub step: u64,
    /// Lines per page.
    pub page: u64,
    /// Largest valid offset.
    pub max_value: u64,
}

impl KeyAction {
    /// Offset the action scrolls to, or `None` if it does not scroll.
    ///
    /// The result never exceeds `max_value`.
    pub fn scroll_target(self, ctx: ScrollContext) -> Option<u64> {
        let target = match self {
            KeyAction::ScrollUp => ctx.value.saturating_sub(ctx.step),
            KeyAction::ScrollDown => ctx.value.saturating_add(ctx.step),
            KeyAction::PageUp => ctx.value.saturating_sub(ctx.page),
            KeyAction::PageDown => ctx.value.saturating_add(ctx.page),
            KeyAction::ScrollToTop => 0,
            KeyAction::ScrollToBottom => ctx.max_value,
            KeyAction::Quit => return None,
        };
        Some(target.min(ctx.max_value))
    }
}
