//! Crafting (0xC0): sent in both directions.
//!
//! Describes a crafting action: the grid a player arranged and the result it
//! produced. Wire format, all fields big-endian `i32`:
//! ```text
//! player_id
//! rows
//! cols
//! cells[rows * cols]   row-major, -1 = empty cell
//! result_id
//! result_count
//! ```

use bytes::{Buf, BufMut};
use tracing::debug;

use crate::codec::{ensure_remaining, read_i32, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

/// Cell value for an empty grid slot.
pub const EMPTY_CELL: i32 = -1;

/// A crafting grid snapshot plus the result it was resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftingPacket {
    pub player_id: i32,
    rows: usize,
    cols: usize,
    /// Row-major cell ids, always `rows * cols` long.
    cells: Vec<i32>,
    pub result_id: i32,
    pub result_count: i32,
}

impl CraftingPacket {
    /// Build a packet from row-major cells.
    ///
    /// `cells` is truncated or padded with [`EMPTY_CELL`] to `rows * cols`.
    pub fn new(
        player_id: i32,
        rows: usize,
        cols: usize,
        mut cells: Vec<i32>,
        result_id: i32,
        result_count: i32,
    ) -> Self {
        cells.resize(rows * cols, EMPTY_CELL);
        Self {
            player_id,
            rows,
            cols,
            cells,
            result_id,
            result_count,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at `(row, col)`, or `None` if out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<i32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// The grid as rows of cell ids.
    pub fn grid(&self) -> Vec<Vec<i32>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(|r| r.to_vec()).collect()
    }
}

impl ProtoEncode for CraftingPacket {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_i32(self.player_id);
        buf.put_i32(self.rows as i32);
        buf.put_i32(self.cols as i32);
        for &cell in &self.cells {
            buf.put_i32(cell);
        }
        buf.put_i32(self.result_id);
        buf.put_i32(self.result_count);
    }
}

impl ProtoDecode for CraftingPacket {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let player_id = read_i32(buf)?;
        let rows = read_i32(buf)?;
        let cols = read_i32(buf)?;
        if rows < 0 || cols < 0 {
            return Err(ProtoError::InvalidData(format!(
                "negative crafting grid dimensions {rows}x{cols}"
            )));
        }
        let (rows, cols) = (rows as usize, cols as usize);
        let cell_count = rows.checked_mul(cols).ok_or_else(|| {
            ProtoError::InvalidData(format!("crafting grid {rows}x{cols} overflows"))
        })?;

        // The declared grid plus the two trailing result fields must be present
        // before anything is allocated.
        let needed = cell_count
            .checked_add(2)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| {
                ProtoError::InvalidData(format!("crafting grid {rows}x{cols} overflows"))
            })?;
        if let Err(e) = ensure_remaining(buf, needed) {
            debug!("Crafting packet declares {rows}x{cols} grid but body is short");
            return Err(e);
        }

        let cells = (0..cell_count).map(|_| buf.get_i32()).collect();
        let result_id = buf.get_i32();
        let result_count = buf.get_i32();

        Ok(Self {
            player_id,
            rows,
            cols,
            cells,
            result_id,
            result_count,
        })
    }
}
