//! Terminal Surface: renders the animation with ANSI escape sequences.
//!
//! The surface keeps its own mirror of the units and redraws the text
//! block from its origin on every flush. The terminal's native cursor,
//! shaped as a steady bar, serves as the caret; blinking is driven by the
//! engine through [`RenderSurface::set_caret_visible`].

use super::output::OutputBuffer;
use super::RenderSurface;
use crate::buffer::{Unit, UnitId};
use crate::color::Color;
use crate::error::{Error, Result};
use crossterm::{
    cursor::{self, SetCursorStyle},
    execute,
    style::ResetColor,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};

/// Configuration for the terminal surface.
#[derive(Debug, Clone)]
pub struct TerminalSurfaceConfig {
    /// Column of the first glyph.
    pub origin_x: u16,
    /// Row of the first line.
    pub origin_y: u16,
    /// Color of glyphs that have no explicit color.
    pub base_color: Color,
    /// Whether to use the alternate screen buffer (stdout only).
    pub alternate_screen: bool,
}

impl Default for TerminalSurfaceConfig {
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            base_color: Color::rgb(220.0, 220.0, 220.0),
            alternate_screen: true,
        }
    }
}

/// Drawn in place of control graphemes (a lone `\r`, `\t`, escapes).
const CONTROL_PLACEHOLDER: &str = "\u{FFFD}";

#[derive(Debug, Clone)]
struct Glyph {
    id: UnitId,
    text: Box<str>,
    width: u8,
    line_break: bool,
    color: Option<Color>,
}

/// A render surface drawing to a terminal (or any byte sink).
pub struct TerminalSurface<W: Write> {
    writer: W,
    config: TerminalSurfaceConfig,
    glyphs: Vec<Glyph>,
    caret: usize,
    caret_visible: bool,
    output: OutputBuffer,
    dirty: bool,
    /// Whether terminal state was changed and must be restored on drop.
    owns_terminal: bool,
}

impl TerminalSurface<Stdout> {
    /// Take over stdout: alternate screen (if configured) and a bar caret.
    ///
    /// The terminal is restored when the surface is dropped.
    pub fn stdout(config: TerminalSurfaceConfig) -> Result<Self> {
        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, SetCursorStyle::SteadyBar)?;

        let mut surface = Self::with_writer(stdout, config);
        surface.owns_terminal = true;
        surface.dirty = true;
        surface.flush()?;
        Ok(surface)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Render into an arbitrary writer without touching terminal modes.
    pub fn with_writer(writer: W, config: TerminalSurfaceConfig) -> Self {
        Self {
            writer,
            config,
            glyphs: Vec::new(),
            caret: 0,
            caret_visible: true,
            output: OutputBuffer::new(),
            dirty: false,
            owns_terminal: false,
        }
    }

    /// Get a reference to the underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Get the configuration.
    pub const fn config(&self) -> &TerminalSurfaceConfig {
        &self.config
    }

    /// Screen position `(x, y)` of the caret.
    pub fn caret_position(&self) -> (u16, u16) {
        self.position_of(self.caret)
    }

    /// Screen position of the slot before the unit at `index`.
    fn position_of(&self, index: usize) -> (u16, u16) {
        let mut x = self.config.origin_x;
        let mut y = self.config.origin_y;
        for glyph in self.glyphs.iter().take(index) {
            if glyph.line_break {
                x = self.config.origin_x;
                y = y.saturating_add(1);
            } else {
                x = x.saturating_add(u16::from(glyph.width));
            }
        }
        (x, y)
    }

    /// Build the whole frame into the output buffer.
    fn render(&mut self) {
        let origin_x = self.config.origin_x;
        let mut y = self.config.origin_y;

        self.output.clear();
        self.output.cursor_hide();
        self.output.cursor_move(origin_x, y);
        self.output.clear_below();

        for glyph in &self.glyphs {
            if glyph.line_break {
                y = y.saturating_add(1);
                self.output.cursor_move(origin_x, y);
            } else {
                self.output.set_fg(glyph.color.unwrap_or(self.config.base_color));
                self.output.write_str(&glyph.text);
            }
        }
        self.output.reset_attrs();

        let (caret_x, caret_y) = self.caret_position();
        self.output.cursor_move(caret_x, caret_y);
        if self.caret_visible {
            self.output.cursor_show();
        }
    }

    fn glyph_mut(&mut self, index: usize, id: UnitId, operation: &'static str) -> Result<&mut Glyph> {
        let len = self.glyphs.len();
        self.glyphs
            .get_mut(index)
            .filter(|g| g.id == id)
            .ok_or(Error::InvariantViolation { operation, index, len })
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn insert_unit(&mut self, index: usize, unit: &Unit) -> Result<()> {
        if index > self.glyphs.len() {
            return Err(Error::InvariantViolation {
                operation: "terminal insert",
                index,
                len: self.glyphs.len(),
            });
        }
        let (text, width): (Box<str>, u8) = if unit.grapheme().chars().any(char::is_control) {
            (CONTROL_PLACEHOLDER.into(), 1)
        } else {
            (unit.grapheme().into(), unit.display_width())
        };
        self.glyphs.insert(
            index,
            Glyph {
                id: unit.id(),
                text,
                width,
                line_break: unit.is_line_break(),
                color: unit.color(),
            },
        );
        if index <= self.caret {
            self.caret += 1;
        }
        self.dirty = true;
        Ok(())
    }

    fn remove_unit(&mut self, index: usize, unit: &Unit) -> Result<()> {
        self.glyph_mut(index, unit.id(), "terminal remove")?;
        self.glyphs.remove(index);
        if index < self.caret {
            self.caret -= 1;
        }
        self.dirty = true;
        Ok(())
    }

    fn move_caret(&mut self, index: usize) -> Result<()> {
        if index > self.glyphs.len() {
            return Err(Error::InvariantViolation {
                operation: "terminal move_caret",
                index,
                len: self.glyphs.len(),
            });
        }
        self.caret = index;
        self.dirty = true;
        Ok(())
    }

    fn set_caret_visible(&mut self, visible: bool) -> Result<()> {
        if self.caret_visible != visible {
            self.caret_visible = visible;
            self.dirty = true;
        }
        Ok(())
    }

    fn set_unit_color(&mut self, index: usize, unit: &Unit, color: Color) -> Result<()> {
        self.glyph_mut(index, unit.id(), "terminal set_unit_color")?.color = Some(color);
        self.dirty = true;
        Ok(())
    }

    fn base_color(&self) -> Color {
        self.config.base_color
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.render();
        self.output.flush_to(&mut self.writer)?;
        self.dirty = false;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        if !self.owns_terminal {
            return;
        }
        // Restore terminal state
        let _ = execute!(
            self.writer,
            ResetColor,
            SetCursorStyle::DefaultUserShape,
            cursor::Show
        );
        if self.config.alternate_screen {
            let _ = execute!(self.writer, LeaveAlternateScreen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> TerminalSurface<Vec<u8>> {
        TerminalSurface::with_writer(
            Vec::new(),
            TerminalSurfaceConfig {
                alternate_screen: false,
                ..TerminalSurfaceConfig::default()
            },
        )
    }

    fn screen(surface: &TerminalSurface<Vec<u8>>) -> vt100::Parser {
        let mut parser = vt100::Parser::new(10, 40, 0);
        parser.process(surface.writer());
        parser
    }

    fn insert_text(surface: &mut TerminalSurface<Vec<u8>>, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            let id = UnitId(u64::try_from(i).unwrap());
            let unit = Unit::from_grapheme(id, ch.encode_utf8(&mut [0; 4]));
            surface.insert_unit(i, &unit).unwrap();
        }
    }

    #[test]
    fn test_renders_lines_and_caret() {
        let mut surface = surface();
        insert_text(&mut surface, "ab\ncd");
        surface.flush().unwrap();

        let parser = screen(&surface);
        let screen = parser.screen();
        assert_eq!(screen.contents().trim_end(), "ab\ncd");
        assert_eq!(screen.cursor_position(), (1, 2));
        assert!(!screen.hide_cursor());
    }

    #[test]
    fn test_base_and_explicit_colors() {
        let mut surface = surface();
        let mut unit = Unit::glyph(UnitId(0), "x").colorizable();
        unit.set_color(Color::rgb(127.5, 0.0, 10.0));
        surface.insert_unit(0, &unit).unwrap();
        surface.insert_unit(1, &Unit::glyph(UnitId(1), "y")).unwrap();
        surface.flush().unwrap();

        let parser = screen(&surface);
        let screen = parser.screen();
        assert_eq!(
            screen.cell(0, 0).unwrap().fgcolor(),
            vt100::Color::Rgb(128, 0, 10)
        );
        assert_eq!(
            screen.cell(0, 1).unwrap().fgcolor(),
            vt100::Color::Rgb(220, 220, 220)
        );
    }

    #[test]
    fn test_hidden_caret_and_removal() {
        let mut surface = surface();
        insert_text(&mut surface, "abc");
        let b = Unit::glyph(UnitId(1), "b");
        surface.remove_unit(1, &b).unwrap();
        surface.set_caret_visible(false).unwrap();
        surface.flush().unwrap();

        let parser = screen(&surface);
        assert_eq!(parser.screen().contents().trim_end(), "ac");
        assert!(parser.screen().hide_cursor());
        assert_eq!(surface.caret_position(), (2, 0));
    }

    #[test]
    fn test_wide_glyph_advances_two_columns() {
        let mut surface = surface();
        surface.insert_unit(0, &Unit::glyph(UnitId(0), "日")).unwrap();
        assert_eq!(surface.caret_position(), (2, 0));
    }

    #[test]
    fn test_control_graphemes_are_replaced() {
        let mut surface = surface();
        insert_text(&mut surface, "a\r\tb");
        let escape = Unit::glyph(UnitId(9), "\u{1b}");
        surface.insert_unit(4, &escape).unwrap();
        surface.flush().unwrap();

        let parser = screen(&surface);
        assert_eq!(
            parser.screen().contents().trim_end(),
            "a\u{FFFD}\u{FFFD}b\u{FFFD}"
        );
        assert_eq!(surface.caret_position(), (5, 0));
        assert_eq!(parser.screen().cursor_position(), (0, 5));
    }

    #[test]
    fn test_flush_without_changes_writes_nothing() {
        let mut surface = surface();
        surface.flush().unwrap();
        assert!(surface.writer().is_empty());
    }
}
