//! Symbol decoding of rectified module grids
//!
//! Detection stops at a 21x21 grid of modules. Turning that grid into a
//! payload (format bits, unmasking, error correction, data modes) is
//! delegated to a [`SymbolDecoder`]; the default one is backed by `rqrr`.

use crate::error::DecodeError;
use crate::models::BitMatrix;
use log::debug;

/// Decodes a rectified module grid (true = dark module) into payload bytes
pub trait SymbolDecoder {
    /// Decode `grid`; an `Err` means the grid is not a readable symbol
    fn decode(&self, grid: &BitMatrix) -> Result<Vec<u8>, DecodeError>;
}

/// Borrowed view of a module grid in the shape `rqrr` reads
struct ModuleGrid<'a>(&'a BitMatrix);

impl rqrr::BitGrid for ModuleGrid<'_> {
    fn size(&self) -> usize {
        self.0.width()
    }

    fn bit(&self, y: usize, x: usize) -> bool {
        self.0.get(x, y)
    }
}

/// [`SymbolDecoder`] using the `rqrr` reader
#[derive(Debug, Clone, Copy, Default)]
pub struct RqrrDecoder;

impl SymbolDecoder for RqrrDecoder {
    fn decode(&self, grid: &BitMatrix) -> Result<Vec<u8>, DecodeError> {
        let (width, height) = (grid.width(), grid.height());
        if width != height || width == 0 {
            return Err(DecodeError::GridShape { width, height });
        }

        let size = width as i32;
        let grid = rqrr::Grid {
            grid: ModuleGrid(grid),
            bounds: [
                rqrr::Point { x: 0, y: 0 },
                rqrr::Point { x: size, y: 0 },
                rqrr::Point { x: size, y: size },
                rqrr::Point { x: 0, y: size },
            ],
        };

        let mut payload = Vec::new();
        let meta = grid
            .decode_to(&mut payload)
            .map_err(|e| DecodeError::Rejected(format!("{e:?}")))?;
        debug!("decoded {} bytes, {:?}", payload.len(), meta);
        Ok(payload)
    }
}
