use crate::config::ScanConfig;
use crate::decoder::SymbolDecoder;
use crate::detector::cluster::cluster_centers;
use crate::detector::corners::{OrderedCorners, order_corners};
use crate::detector::rectify::rectify;
use crate::detector::scanner::FinderScanner;
use crate::error::DetectError;
use crate::models::{BitMatrix, PointI, Rect};
use crate::overlay::{CornerRole, NoOverlay, Overlay};
use crate::utils::binarization::binarize;
use crate::utils::grayscale::rgb_to_grayscale;
use image::RgbImage;
use log::debug;

/// A symbol whose three finder patterns were found and rectified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSymbol {
    /// Finder centers labeled by role
    pub corners: OrderedCorners,
    /// Implied fourth corner
    pub bottom_right: PointI,
    /// 21x21 module grid, true = dark module
    pub grid: BitMatrix,
}

/// Everything one pass over a binary frame produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Candidate rectangles in discovery order
    pub candidates: Vec<Rect>,
    /// One center per clustered finder pattern
    pub centers: Vec<PointI>,
    /// Present only when exactly three centers were found
    pub symbol: Option<LocatedSymbol>,
}

/// Result of processing a color frame end to end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Detection stages output
    pub outcome: ScanOutcome,
    /// Decoded payload; empty when nothing was located or decoding failed
    pub message: String,
}

/// Locate and rectify a symbol in a binary image
pub fn scan(binary: &BitMatrix, config: &ScanConfig) -> Result<ScanOutcome, DetectError> {
    scan_with_overlay(binary, config, &mut NoOverlay)
}

/// Same as [`scan`], reporting accepted candidates and ordered corners to `overlay`
pub fn scan_with_overlay<O>(
    binary: &BitMatrix,
    config: &ScanConfig,
    overlay: &mut O,
) -> Result<ScanOutcome, DetectError>
where
    O: Overlay + ?Sized,
{
    let scanner = FinderScanner::new(config);
    let candidates = scanner.scan(binary, overlay);
    let centers = cluster_centers(&candidates);
    debug!(
        "{} candidates clustered into {} centers",
        candidates.len(),
        centers.len()
    );

    if centers.len() != 3 {
        return Ok(ScanOutcome {
            candidates,
            centers,
            symbol: None,
        });
    }

    let corners = order_corners(&centers)?;
    overlay.marker(corners.top_right, CornerRole::TopRight);
    overlay.marker(corners.top_left, CornerRole::TopLeft);
    overlay.marker(corners.bottom_left, CornerRole::BottomLeft);

    let grid = rectify(binary, &corners)?;
    Ok(ScanOutcome {
        candidates,
        centers,
        symbol: Some(LocatedSymbol {
            corners,
            bottom_right: corners.bottom_right(),
            grid,
        }),
    })
}

/// Decode a located symbol; failures yield an empty string
pub fn decode_symbol<D>(symbol: &LocatedSymbol, decoder: &D) -> String
where
    D: SymbolDecoder + ?Sized,
{
    match decoder.decode(&symbol.grid) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            debug!("decode failed: {e}");
            String::new()
        }
    }
}

/// Binarize an RGB frame with the configured strategy
pub fn binarize_rgb(image: &RgbImage, config: &ScanConfig) -> Result<BitMatrix, DetectError> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let gray = rgb_to_grayscale(image.as_raw(), width, height)?;
    binarize(&gray, width, height, config.binarization)
}

/// Grayscale, binarize, scan and decode one RGB frame
pub fn process_frame<D, O>(
    image: &RgbImage,
    config: &ScanConfig,
    decoder: &D,
    overlay: &mut O,
) -> Result<Frame, DetectError>
where
    D: SymbolDecoder + ?Sized,
    O: Overlay + ?Sized,
{
    let binary = binarize_rgb(image, config)?;
    let outcome = scan_with_overlay(&binary, config, overlay)?;
    let message = outcome
        .symbol
        .as_ref()
        .map(|symbol| decode_symbol(symbol, decoder))
        .unwrap_or_default();
    Ok(Frame { outcome, message })
}

/// Decoded payload of one RGB frame, empty when no symbol was read
pub fn decode_frame<D>(
    image: &RgbImage,
    config: &ScanConfig,
    decoder: &D,
) -> Result<String, DetectError>
where
    D: SymbolDecoder + ?Sized,
{
    process_frame(image, config, decoder, &mut NoOverlay).map(|frame| frame.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::RqrrDecoder;
    use crate::error::DecodeError;

    struct FixedDecoder(Result<Vec<u8>, ()>);

    impl SymbolDecoder for FixedDecoder {
        fn decode(&self, _grid: &BitMatrix) -> Result<Vec<u8>, DecodeError> {
            self.0
                .clone()
                .map_err(|_| DecodeError::Rejected("fixed".to_string()))
        }
    }

    #[derive(Default)]
    struct Recorder {
        lines: usize,
        markers: Vec<(PointI, CornerRole)>,
    }

    impl Overlay for Recorder {
        fn line(&mut self, _from: PointI, _to: PointI) {
            self.lines += 1;
        }

        fn marker(&mut self, at: PointI, role: CornerRole) {
            self.markers.push((at, role));
        }
    }

    fn paint_finder(matrix: &mut BitMatrix, x0: usize, y0: usize, unit: usize) {
        for my in 0..7 {
            for mx in 0..7 {
                let ring = mx == 0 || mx == 6 || my == 0 || my == 6;
                let core = (2..=4).contains(&mx) && (2..=4).contains(&my);
                if ring || core {
                    for dy in 0..unit {
                        for dx in 0..unit {
                            matrix.set(x0 + mx * unit + dx, y0 + my * unit + dy, true);
                        }
                    }
                }
            }
        }
    }

    /// Three 4px-module finders laid out like a version 1 symbol at (20, 20)
    fn three_finders() -> BitMatrix {
        let mut matrix = BitMatrix::new(124, 124);
        paint_finder(&mut matrix, 20, 20, 4);
        paint_finder(&mut matrix, 76, 20, 4);
        paint_finder(&mut matrix, 20, 76, 4);
        matrix
    }

    #[test]
    fn test_scan_locates_three_finders() {
        let outcome = scan(&three_finders(), &ScanConfig::default()).unwrap();
        assert_eq!(outcome.centers.len(), 3);
        let symbol = outcome.symbol.expect("symbol should be located");
        assert_eq!(symbol.corners.top_left, PointI::new(34, 34));
        assert_eq!(symbol.corners.top_right, PointI::new(90, 34));
        assert_eq!(symbol.corners.bottom_left, PointI::new(34, 90));
        assert_eq!(symbol.bottom_right, PointI::new(90, 90));
        assert_eq!(symbol.grid.width(), 21);
        // Finder rings land on the grid corners
        assert!(symbol.grid.get(0, 0));
        assert!(symbol.grid.get(20, 0));
        assert!(symbol.grid.get(0, 20));
        assert!(symbol.grid.get(3, 3));
        assert!(!symbol.grid.get(1, 1));
    }

    #[test]
    fn test_overlay_receives_lines_and_markers() {
        let mut recorder = Recorder::default();
        let outcome =
            scan_with_overlay(&three_finders(), &ScanConfig::default(), &mut recorder).unwrap();
        assert_eq!(recorder.lines, 2 * outcome.candidates.len());
        let roles: Vec<CornerRole> = recorder.markers.iter().map(|&(_, role)| role).collect();
        assert_eq!(
            roles,
            vec![CornerRole::TopRight, CornerRole::TopLeft, CornerRole::BottomLeft]
        );
    }

    #[test]
    fn test_two_finders_is_not_an_error() {
        let mut matrix = BitMatrix::new(124, 124);
        paint_finder(&mut matrix, 20, 20, 4);
        paint_finder(&mut matrix, 76, 20, 4);
        let outcome = scan(&matrix, &ScanConfig::default()).unwrap();
        assert_eq!(outcome.centers.len(), 2);
        assert!(outcome.symbol.is_none());
    }

    #[test]
    fn test_blank_frame() {
        let outcome = scan(&BitMatrix::new(50, 40), &ScanConfig::default()).unwrap();
        assert_eq!(outcome, ScanOutcome::default());
    }

    #[test]
    fn test_decode_symbol_maps_failure_to_empty() {
        let outcome = scan(&three_finders(), &ScanConfig::default()).unwrap();
        let symbol = outcome.symbol.unwrap();
        assert_eq!(decode_symbol(&symbol, &FixedDecoder(Ok(b"hello".to_vec()))), "hello");
        assert_eq!(decode_symbol(&symbol, &FixedDecoder(Err(()))), "");
        // Finders alone carry no format information
        assert_eq!(decode_symbol(&symbol, &RqrrDecoder), "");
    }

    #[test]
    fn test_decode_frame_on_rgb() {
        let binary = three_finders();
        let image = RgbImage::from_fn(124, 124, |x, y| {
            if binary.get(x as usize, y as usize) {
                image::Rgb([20, 10, 30])
            } else {
                image::Rgb([240, 235, 250])
            }
        });
        let config = ScanConfig::default();
        let decoder = FixedDecoder(Ok(b"ok".to_vec()));
        let frame = process_frame(&image, &config, &decoder, &mut NoOverlay).unwrap();
        assert!(frame.outcome.symbol.is_some());
        assert_eq!(frame.message, "ok");
        assert_eq!(decode_frame(&image, &config, &FixedDecoder(Err(()))).unwrap(), "");
    }
}
