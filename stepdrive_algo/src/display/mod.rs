//! Character display session.
//!
//! Owns the one-time initialization and the cursor state that the rest of
//! the system reads and writes through, so independent sessions can exist
//! side by side in tests. The [`DisplayBus`] seam carries byte-level
//! commands and character data; the electrical write cycle underneath it
//! (bit width, strobes, busy polling, settle delays) belongs to the bus
//! implementation.

use thiserror::Error;

/// Visible columns per row.
pub const COLUMNS: u8 = 20;
/// Visible rows.
pub const ROWS: u8 = 4;

/// Display RAM address of column zero for each row. Rows interleave, the
/// third row continues the first row's address space.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_TWO_LINE: u8 = 0x28;
const CMD_SET_GLYPH_ADDRESS: u8 = 0x40;
const CMD_SET_CURSOR_ADDRESS: u8 = 0x80;

/// Byte transport to the display controller.
pub trait DisplayBus {
    type Error;

    /// Sends an instruction byte.
    fn command(&mut self, byte: u8) -> Result<(), Self::Error>;
    /// Sends a character or glyph-row data byte.
    fn data(&mut self, byte: u8) -> Result<(), Self::Error>;
}

/// Display session failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError<E> {
    #[error("cursor position outside the visible area")]
    CursorOutOfRange,
    #[error("display bus write failed")]
    Bus(E),
}

/// One display with its cursor state.
pub struct DisplaySession<B: DisplayBus> {
    bus: B,
    cursor_x: u8,
    cursor_y: u8, // ROWS marks a cursor that ran off the last row
}

impl<B: DisplayBus> DisplaySession<B> {
    /// Brings the display up and hands back the live session.
    ///
    /// Sends the byte-level bring-up sequence: two-line function set,
    /// display on with cursor hidden, clear, increment entry mode. The
    /// cursor starts at the origin.
    pub fn new(bus: B) -> Result<Self, DisplayError<B::Error>> {
        let mut session = Self {
            bus,
            cursor_x: 0,
            cursor_y: 0,
        };
        session.command(CMD_FUNCTION_TWO_LINE)?;
        session.command(CMD_DISPLAY_ON)?;
        session.command(CMD_CLEAR)?;
        session.command(CMD_ENTRY_INCREMENT)?;
        Ok(session)
    }

    /// Moves the cursor to column `x` of row `y`.
    pub fn goto(&mut self, x: u8, y: u8) -> Result<(), DisplayError<B::Error>> {
        if x >= COLUMNS || y >= ROWS {
            return Err(DisplayError::CursorOutOfRange);
        }
        self.cursor_x = x;
        self.cursor_y = y;
        self.command(CMD_SET_CURSOR_ADDRESS | (ROW_OFFSETS[y as usize] + x))
    }

    /// Clears the screen and homes the cursor.
    pub fn clear(&mut self) -> Result<(), DisplayError<B::Error>> {
        self.command(CMD_CLEAR)?;
        self.goto(0, 0)
    }

    /// Writes one raw character code at the cursor.
    ///
    /// Codes 0..8 address the custom glyphs stored via [`set_glyph`].
    ///
    /// [`set_glyph`]: DisplaySession::set_glyph
    pub fn write_char(&mut self, glyph: u8) -> Result<(), DisplayError<B::Error>> {
        self.write_bytes(&[glyph])
    }

    /// Writes a string starting at the cursor.
    ///
    /// `'\n'` moves to column zero of the next row; a row overflow wraps
    /// the spill onto the next row. Once the cursor has run off the last
    /// row the rest of the string is dropped until `goto` re-aims it.
    pub fn write_str(&mut self, text: &str) -> Result<(), DisplayError<B::Error>> {
        self.write_bytes(text.as_bytes())
    }

    /// Writes a signed integer in decimal at the cursor.
    pub fn write_int(&mut self, value: i32) -> Result<(), DisplayError<B::Error>> {
        // Ten digits, optional sign.
        let mut digits = [0u8; 10];
        let mut count = 0;

        if value < 0 {
            self.write_bytes(b"-")?;
        }
        let mut magnitude = (value as i64).unsigned_abs();
        loop {
            digits[count] = b'0' + (magnitude % 10) as u8;
            count += 1;
            magnitude /= 10;
            if magnitude == 0 {
                break;
            }
        }
        while count > 0 {
            count -= 1;
            self.write_bytes(&digits[count..count + 1])?;
        }
        Ok(())
    }

    /// Stores a custom 5x8 glyph in generator RAM slot `slot % 8`.
    ///
    /// Resets the cursor to the origin afterwards so following writes
    /// target display RAM again.
    pub fn set_glyph(&mut self, slot: u8, rows: &[u8; 8]) -> Result<(), DisplayError<B::Error>> {
        let address = (slot % 8) * 8;
        self.command(CMD_SET_GLYPH_ADDRESS | address)?;
        for row in rows {
            self.data(row & 0x1F)?;
        }
        self.goto(0, 0)
    }

    /// Tracked cursor position as `(column, row)`.
    pub fn cursor(&self) -> (u8, u8) {
        (self.cursor_x, self.cursor_y)
    }

    /// Releases the bus.
    pub fn into_bus(self) -> B {
        self.bus
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DisplayError<B::Error>> {
        for &byte in bytes {
            if self.cursor_y >= ROWS || (self.cursor_y == ROWS - 1 && self.cursor_x >= COLUMNS) {
                return Ok(());
            }
            if byte == b'\n' {
                let next_row = self.cursor_y + 1;
                if next_row >= ROWS {
                    self.cursor_x = 0;
                    self.cursor_y = ROWS;
                    return Ok(());
                }
                self.goto(0, next_row)?;
                continue;
            }
            if self.cursor_x >= COLUMNS {
                let next_row = self.cursor_y + 1;
                if next_row >= ROWS {
                    self.cursor_x = 0;
                    self.cursor_y = ROWS;
                    return Ok(());
                }
                self.goto(self.cursor_x - COLUMNS, next_row)?;
            }
            self.data(byte)?;
            self.cursor_x += 1;
        }
        Ok(())
    }

    fn command(&mut self, byte: u8) -> Result<(), DisplayError<B::Error>> {
        self.bus.command(byte).map_err(DisplayError::Bus)
    }

    fn data(&mut self, byte: u8) -> Result<(), DisplayError<B::Error>> {
        self.bus.data(byte).map_err(DisplayError::Bus)
    }
}
