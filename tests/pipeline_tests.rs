use image::{GrayImage, Luma, Rgb, RgbImage};
use qr_rectify::{
    BitMatrix, DetectError, Detector, MODULE_GRID_SIZE, NoOverlay, PointI, RgbOverlay,
    RqrrDecoder, SymbolDecoder, decode_frame, scan, scan_luma,
};
use qrcode::{Color, EcLevel, QrCode, Version};

const MODULE_PX: u32 = 8;
const QUIET_ZONE: u32 = 4;
const PAYLOAD: &[u8] = b"qr_rectify";

/// Module grid of a version 1 symbol, true = dark
fn modules(payload: &[u8]) -> BitMatrix {
    let code = QrCode::with_version(payload, Version::Normal(1), EcLevel::L).unwrap();
    let width = code.width();
    assert_eq!(width, MODULE_GRID_SIZE);
    let mut grid = BitMatrix::new(width, width);
    for (i, color) in code.to_colors().into_iter().enumerate() {
        grid.set(i % width, i / width, color == Color::Dark);
    }
    grid
}

/// Render modules at MODULE_PX pixels each with a white quiet zone
fn render(grid: &BitMatrix) -> GrayImage {
    let side = (grid.width() as u32 + 2 * QUIET_ZONE) * MODULE_PX;
    GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / MODULE_PX) as i64 - QUIET_ZONE as i64;
        let my = (y / MODULE_PX) as i64 - QUIET_ZONE as i64;
        let dark = mx >= 0 && my >= 0 && grid.get(mx as usize, my as usize);
        if dark { Luma([0]) } else { Luma([255]) }
    })
}

fn to_rgb(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] == 0 {
            Rgb([25, 30, 40])
        } else {
            Rgb([245, 240, 230])
        }
    })
}

fn sorted(mut points: Vec<PointI>) -> Vec<PointI> {
    points.sort_by_key(|p| (p.x, p.y));
    points
}

#[test]
fn locates_and_rectifies_generated_symbol() {
    let expected = modules(PAYLOAD);
    let outcome = scan_luma(&render(&expected)).unwrap();

    // Finder centers sit 3.5 modules into the symbol: 32 + 28 px
    assert_eq!(
        sorted(outcome.centers.clone()),
        vec![PointI::new(60, 60), PointI::new(60, 172), PointI::new(172, 60)]
    );
    let symbol = outcome.symbol.expect("symbol should be located");
    assert_eq!(symbol.corners.top_left, PointI::new(60, 60));
    assert_eq!(symbol.corners.top_right, PointI::new(172, 60));
    assert_eq!(symbol.corners.bottom_left, PointI::new(60, 172));
    assert_eq!(symbol.bottom_right, PointI::new(172, 172));
    assert_eq!(symbol.grid, expected);
}

#[test]
fn decodes_rectified_grid_with_rqrr() {
    let outcome = scan_luma(&render(&modules(PAYLOAD))).unwrap();
    let symbol = outcome.symbol.unwrap();
    assert_eq!(RqrrDecoder.decode(&symbol.grid).unwrap(), PAYLOAD);
    assert_eq!(Detector::new().decode_symbol(&symbol), "qr_rectify");
}

#[test]
fn rotated_symbol_keeps_its_roles() {
    let expected = modules(PAYLOAD);
    let rotated = image::imageops::rotate90(&render(&expected));
    let symbol = scan_luma(&rotated).unwrap().symbol.expect("symbol should be located");

    // Clockwise quarter turn moves top-left to the upper right of the image
    assert_eq!(symbol.corners.top_left, PointI::new(172, 60));
    assert_eq!(symbol.corners.top_right, PointI::new(172, 172));
    assert_eq!(symbol.corners.bottom_left, PointI::new(60, 60));
    assert_eq!(symbol.grid, expected);
}

#[test]
fn decodes_color_frame_end_to_end() {
    let frame = to_rgb(&render(&modules(b"hello rectify")));
    assert_eq!(decode_frame(&frame).unwrap(), "hello rectify");
}

#[test]
fn overlay_marks_ordered_corners() {
    let frame = to_rgb(&render(&modules(PAYLOAD)));
    let mut overlay = RgbOverlay::new(frame.clone());
    let result = Detector::new().process_frame(&frame, &mut overlay).unwrap();
    assert_eq!(result.message, "qr_rectify");

    let annotated = overlay.into_inner();
    // Marker discs are drawn last and cover the line pixels at the centers
    assert_eq!(*annotated.get_pixel(60, 60), Rgb([255, 0, 255]));
    assert_eq!(*annotated.get_pixel(172, 60), Rgb([0, 0, 255]));
    assert_eq!(*annotated.get_pixel(60, 172), Rgb([255, 0, 0]));
    // Quiet zone stays untouched
    assert_eq!(*annotated.get_pixel(5, 5), *frame.get_pixel(5, 5));

    let plain = Detector::new().process_frame(&frame, &mut NoOverlay).unwrap();
    assert_eq!(plain, result);
}

#[test]
fn frame_without_symbol_is_not_an_error() {
    let blank = BitMatrix::new(120, 80);
    let outcome = scan(&blank).unwrap();
    assert!(outcome.candidates.is_empty());
    assert!(outcome.symbol.is_none());

    // Stripes and text-like noise produce no located symbol
    let mut noise = BitMatrix::new(120, 80);
    for y in 0..80 {
        for x in 0..120 {
            noise.set(x, y, (x / 3 + y / 5) % 2 == 0);
        }
    }
    assert!(scan(&noise).unwrap().symbol.is_none());
}

#[test]
fn non_binary_input_is_rejected() {
    let mut image = render(&modules(PAYLOAD));
    image.put_pixel(10, 12, Luma([200]));
    assert_eq!(
        scan_luma(&image).unwrap_err(),
        DetectError::NonBinaryPixel { x: 10, y: 12, value: 200 }
    );
}
