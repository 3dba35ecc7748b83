use anyhow::Result;
use asc_core::frame::Viewport;
use asc_core::traits::ViewportProvider;

/// Taille du terminal courant, interrogée à chaque appel via crossterm.
///
/// `border_rows` lines are kept free for the shell prompt. When no terminal
/// is attached (pipe, CI), `fallback` is returned instead.
#[derive(Clone, Copy, Debug)]
pub struct TerminalViewport {
    pub border_rows: u32,
    pub fallback: Viewport,
}

impl TerminalViewport {
    #[must_use]
    pub const fn new(border_rows: u32, fallback: Viewport) -> Self {
        Self {
            border_rows,
            fallback,
        }
    }

    /// Apply the border to a raw `(cols, rows)` terminal size.
    fn apply_border(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            u32::from(cols).max(1),
            u32::from(rows).saturating_sub(self.border_rows).max(1),
        )
    }
}

impl ViewportProvider for TerminalViewport {
    fn viewport(&self) -> Result<Viewport> {
        match crossterm::terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 0 => Ok(self.apply_border(cols, rows)),
            Ok(_) => {
                log::warn!("Taille de terminal nulle, viewport de secours utilisé");
                Ok(self.fallback)
            }
            Err(e) => {
                log::warn!(
                    "Taille du terminal inconnue ({e}), viewport de secours {}×{}",
                    self.fallback.width,
                    self.fallback.height
                );
                Ok(self.fallback)
            }
        }
    }
}

/// Viewport constant (`--width/--height`, tests).
#[derive(Clone, Copy, Debug)]
pub struct FixedViewport(pub Viewport);

impl ViewportProvider for FixedViewport {
    fn viewport(&self) -> Result<Viewport> {
        Ok(self.0)
    }
}
