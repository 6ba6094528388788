use std::path::{Path, PathBuf};

use cloud_cover_index::cloud_cover::{
    CloudCoverError, CloudCoverPipeline, PipelineConfig, Point, Traversal,
};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const CLEAR_SKY: Rgba<u8> = Rgba([70, 130, 220, 255]);
const OVERCAST: Rgba<u8> = Rgba([200, 200, 205, 255]);

fn save_png(dir: &TempDir, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.path().join(name);
    image.save(&path).unwrap();
    path
}

fn run(source: &Path, mask: &Path, output: Option<&Path>) -> cloud_cover_index::cloud_cover::Result<cloud_cover_index::cloud_cover::CloudCoverReport> {
    let mut builder = PipelineConfig::builder().source_path(source).mask_path(mask);
    if let Some(output) = output {
        builder = builder.segmentation(true).output_path(output);
    }
    CloudCoverPipeline::new(builder.build()).run()
}

#[test]
fn test_center_aligned_index_and_segmentation() {
    let dir = TempDir::new().unwrap();
    // 10x10 sky whose central 6x6 block is half overcast (left) and half clear (right).
    let source = RgbaImage::from_fn(10, 10, |x, y| {
        if (2..8).contains(&y) && (2..5).contains(&x) { OVERCAST } else { CLEAR_SKY }
    });
    let source_path = save_png(&dir, "sky.png", &source);
    let mask_path = save_png(&dir, "mask.png", &RgbaImage::from_pixel(6, 6, WHITE));
    let output_path = dir.path().join("segmentation.png");

    let report = run(&source_path, &mask_path, Some(&output_path)).unwrap();

    assert_eq!(report.index, 0.5);
    assert_eq!(report.included_pixels, 36);
    assert_eq!(report.alignment.source_offset, Point::new(2, 2));
    assert_eq!(report.alignment.mask_offset, Point::new(0, 0));
    assert_eq!(report.segmentation_path.as_deref(), Some(output_path.as_path()));

    let segmentation = image::open(&output_path).unwrap().into_rgba8();
    assert_eq!(segmentation.dimensions(), (6, 6));
    assert_eq!(*segmentation.get_pixel(0, 0), WHITE);
    assert_eq!(*segmentation.get_pixel(5, 5), BLACK);
}

#[test]
fn test_circular_mask_excludes_corners() {
    let dir = TempDir::new().unwrap();
    let size = 21u32;
    let c = (size / 2) as i64;
    let mask = RgbaImage::from_fn(size, size, |x, y| {
        let (dx, dy) = (x as i64 - c, y as i64 - c);
        if dx * dx + dy * dy <= c * c { WHITE } else { BLACK }
    });
    let source_path = save_png(&dir, "sky.png", &RgbaImage::from_pixel(size, size, OVERCAST));
    let mask_path = save_png(&dir, "mask.png", &mask);
    let output_path = dir.path().join("out.png");

    let report = run(&source_path, &mask_path, Some(&output_path)).unwrap();
    let inside = mask.pixels().filter(|p| **p == WHITE).count() as u64;

    assert_eq!(report.index, 1.0);
    assert_eq!(report.included_pixels, inside);

    let segmentation = image::open(&output_path).unwrap().into_rgba8();
    assert_eq!(*segmentation.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    assert_eq!(*segmentation.get_pixel(c as u32, c as u32), WHITE);
}

#[test]
fn test_jpeg_source() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("sky.jpg");
    RgbImage::from_pixel(16, 16, Rgb([60, 120, 230])).save(&source_path).unwrap();
    let mask_path = save_png(&dir, "mask.png", &RgbaImage::from_pixel(16, 16, WHITE));

    let report = run(&source_path, &mask_path, None).unwrap();

    assert_eq!(report.index, 0.0);
    assert_eq!(report.included_pixels, 256);
    assert!(report.segmentation_path.is_none());
}

#[test]
fn test_black_mask_is_degenerate() {
    let dir = TempDir::new().unwrap();
    let source_path = save_png(&dir, "sky.png", &RgbaImage::from_pixel(4, 4, OVERCAST));
    let mask_path = save_png(&dir, "mask.png", &RgbaImage::from_pixel(2, 2, BLACK));
    let output_path = dir.path().join("out.png");

    let result = run(&source_path, &mask_path, Some(&output_path));

    assert!(matches!(result, Err(CloudCoverError::NoIncludedPixels)));
    assert!(!output_path.exists());
}

#[test]
fn test_output_in_missing_directory() {
    let dir = TempDir::new().unwrap();
    let source_path = save_png(&dir, "sky.png", &RgbaImage::from_pixel(4, 4, OVERCAST));
    let mask_path = save_png(&dir, "mask.png", &RgbaImage::from_pixel(4, 4, WHITE));
    let output_path = dir.path().join("no_such_dir").join("out.png");

    match run(&source_path, &mask_path, Some(&output_path)) {
        Err(CloudCoverError::OutputWriteError(msg)) => {
            assert!(msg.contains(&*output_path.to_string_lossy()))
        }
        other => panic!("unexpected result: {:?}", other.map(|r| r.index)),
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_output_device_full() {
    let dir = TempDir::new().unwrap();
    let source_path = save_png(&dir, "sky.png", &RgbaImage::from_pixel(4, 4, OVERCAST));
    let mask_path = save_png(&dir, "mask.png", &RgbaImage::from_pixel(4, 4, WHITE));
    let output_path = Path::new("/dev/full");

    match run(&source_path, &mask_path, Some(output_path)) {
        Err(CloudCoverError::OutputWriteError(msg)) => assert!(msg.starts_with("/dev/full: ")),
        other => panic!("unexpected result: {:?}", other.map(|r| r.index)),
    }
}

#[test]
fn test_unsupported_input() {
    let dir = TempDir::new().unwrap();
    let source_path = dir.path().join("sky.txt");
    std::fs::write(&source_path, "not an image").unwrap();
    let mask_path = save_png(&dir, "mask.png", &RgbaImage::from_pixel(2, 2, WHITE));

    match run(&source_path, &mask_path, None) {
        Err(CloudCoverError::UnsupportedFormat(msg)) => assert!(msg.starts_with("source")),
        other => panic!("unexpected result: {:?}", other.map(|r| r.index)),
    }
}

#[test]
fn test_missing_mask_file() {
    let dir = TempDir::new().unwrap();
    let source_path = save_png(&dir, "sky.png", &RgbaImage::from_pixel(2, 2, OVERCAST));
    let mask_path = dir.path().join("missing.png");

    match run(&source_path, &mask_path, None) {
        Err(CloudCoverError::InputReadError(msg)) => assert!(msg.contains("missing.png")),
        other => panic!("unexpected result: {:?}", other.map(|r| r.index)),
    }
}

#[test]
fn test_parallel_run_matches_sequential() {
    let dir = TempDir::new().unwrap();
    let source = RgbaImage::from_fn(33, 17, |x, y| if (x * y) % 3 == 0 { OVERCAST } else { CLEAR_SKY });
    let source_path = save_png(&dir, "sky.png", &source);
    let mask_path = save_png(&dir, "mask.png", &RgbaImage::from_pixel(29, 29, WHITE));

    let sequential = run(&source_path, &mask_path, None).unwrap();
    let config = PipelineConfig::builder()
        .source_path(&source_path)
        .mask_path(&mask_path)
        .traversal(Traversal::Parallel)
        .build();
    let parallel = CloudCoverPipeline::new(config).run().unwrap();

    assert_eq!(sequential.index, parallel.index);
    assert_eq!(sequential.included_pixels, parallel.included_pixels);
}
