//! End-to-end pipeline tests: scan → process → generate on real files.

use image::{DynamicImage, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thumb_gal::extensions::ExtensionSet;
use thumb_gal::process::{self, ProcessConfig, SkipReason};
use thumb_gal::types::Category;
use thumb_gal::{generate, scan, storage};

fn write_image(path: &Path, width: u32, height: u32, format: image::ImageFormat) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 90])
    });
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    DynamicImage::ImageRgb8(img)
        .save_with_format(path, format)
        .unwrap();
}

/// a.jpg (800x600), b.txt, and c.JPG (100x100) in a subfolder.
fn setup_source() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("photos");
    write_image(&src.join("a.jpg"), 800, 600, image::ImageFormat::Jpeg);
    fs::write(src.join("b.txt"), "not a picture").unwrap();
    write_image(&src.join("trips/c.JPG"), 100, 100, image::ImageFormat::Jpeg);
    tmp
}

struct Run {
    destination: PathBuf,
    manifest: thumb_gal::types::Manifest,
    summary: process::ProcessSummary,
    html: String,
}

fn run_pipeline(root: &Path, extensions: &[&str]) -> Run {
    run_pipeline_into(&root.join("photos"), &root.join("dist"), extensions)
}

/// Same steps as `thumb-gal build`: scan, skip the gallery folder, process, generate.
fn run_pipeline_into(source: &Path, output: &Path, extensions: &[&str]) -> Run {
    let exts = ExtensionSet::normalize(extensions);
    let mut scanned = scan::scan(source, &exts).unwrap();
    let destination = storage::storage_location(output, "testing").unwrap();
    scanned.exclude_dir(&destination);
    let files = scanned.files;
    let config = ProcessConfig {
        resize_percent: 50,
        thumbnail_edge: 50,
        quality: 90,
    };

    let result = process::process(&files, &destination, &config, None).unwrap();
    let doc = generate::build(&result.manifest, "testing", &destination);
    let html_path = generate::write(&doc, &destination, "index.html").unwrap();

    Run {
        destination,
        manifest: result.manifest,
        summary: result.summary,
        html: fs::read_to_string(html_path).unwrap(),
    }
}

#[test]
fn builds_gallery_from_mixed_folder() {
    let tmp = setup_source();
    let run = run_pipeline(tmp.path(), &["jpg", "txt"]);
    let dest = &run.destination;

    assert_eq!(run.manifest.len(), 2);
    assert_eq!(
        run.manifest.get(Category::Resized),
        [dest.join("a_resized.jpg"), dest.join("c_resized.JPG")]
    );
    assert_eq!(
        run.manifest.get(Category::Thumbnail),
        [dest.join("a_thumbnail.jpg"), dest.join("c_thumbnail.JPG")]
    );

    assert_eq!(image::image_dimensions(dest.join("a_resized.jpg")).unwrap(), (400, 300));
    assert_eq!(image::image_dimensions(dest.join("c_resized.JPG")).unwrap(), (50, 50));
    for thumb in run.manifest.get(Category::Thumbnail) {
        let (w, h) = image::image_dimensions(thumb).unwrap();
        assert!(w <= 50 && h <= 50, "{} is {w}x{h}", thumb.display());
    }

    assert_eq!(run.html.matches("<img").count(), 2);
    assert!(run.html.contains(r#"href="a_resized.jpg""#));
    assert!(run.html.contains(r#"src="c_thumbnail.JPG""#));

    assert_eq!(run.summary.skipped.len(), 1);
    let skipped = &run.summary.skipped[&SkipReason::NotAnImage];
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].ends_with("b.txt"));
}

#[test]
fn rerun_keeps_files_and_regenerates_same_page() {
    let tmp = setup_source();
    let first = run_pipeline(tmp.path(), &["jpg", "txt"]);
    let modified = fs::metadata(first.destination.join("a_resized.jpg"))
        .unwrap()
        .modified()
        .unwrap();

    let second = run_pipeline(tmp.path(), &["jpg", "txt"]);

    assert_eq!(second.manifest, first.manifest);
    assert_eq!(second.html, first.html);
    assert_eq!(second.summary.written, 0);
    assert_eq!(second.summary.reused, 4);
    let after = fs::metadata(second.destination.join("a_resized.jpg"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(after, modified);
}

#[test]
fn transparent_png_named_jpg_becomes_png_output() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("photos");
    fs::create_dir_all(&src).unwrap();
    let rgba = image::RgbaImage::from_pixel(40, 20, image::Rgba([10, 20, 30, 100]));
    DynamicImage::ImageRgba8(rgba)
        .save_with_format(src.join("logo.jpg"), image::ImageFormat::Png)
        .unwrap();

    let run = run_pipeline(tmp.path(), &["jpg"]);

    let resized = &run.manifest.get(Category::Resized)[0];
    assert_eq!(resized, &run.destination.join("logo_resized.png"));
    assert_eq!(image::image_dimensions(resized).unwrap(), (20, 10));
    assert!(!run.destination.join("logo_resized.jpg").exists());
    assert!(run.html.contains(r#"href="logo_resized.png""#));
}

#[test]
fn empty_source_yields_empty_gallery() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("photos")).unwrap();

    let run = run_pipeline(tmp.path(), &["jpg"]);

    assert!(run.manifest.is_empty());
    assert_eq!(run.html.matches("<img").count(), 0);
    assert!(run.destination.join("index.html").exists());
}

#[test]
fn missing_source_root_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let exts = ExtensionSet::normalize(["jpg"]);
    let err = scan::find_recursive(&tmp.path().join("absent"), &exts).unwrap_err();
    assert!(matches!(err, scan::ScanError::NotFound(_)));
}

#[test]
fn jpg_only_scan_of_flat_folder() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("photos");
    write_image(&src.join("a.jpg"), 800, 600, image::ImageFormat::Jpeg);
    fs::write(src.join("b.txt"), "not a picture").unwrap();
    write_image(&src.join("c.JPG"), 100, 100, image::ImageFormat::Jpeg);

    let exts = ExtensionSet::normalize(["jpg"]);
    assert_eq!(
        scan::find_recursive(&src, &exts).unwrap(),
        vec![src.join("a.jpg"), src.join("c.JPG")]
    );

    let run = run_pipeline(tmp.path(), &["jpg"]);
    let dest = &run.destination;

    assert_eq!(run.manifest.len(), 2);
    assert_eq!(
        run.manifest.get(Category::Resized),
        [dest.join("a_resized.jpg"), dest.join("c_resized.JPG")]
    );
    assert_eq!(image::image_dimensions(dest.join("a_resized.jpg")).unwrap(), (400, 300));
    assert_eq!(image::image_dimensions(dest.join("c_resized.JPG")).unwrap(), (50, 50));
    for thumb in run.manifest.get(Category::Thumbnail) {
        let (w, h) = image::image_dimensions(thumb).unwrap();
        assert!(w <= 50 && h <= 50, "{} is {w}x{h}", thumb.display());
    }
    assert_eq!(run.html.matches("<img").count(), 2);
    assert!(run.summary.skipped.is_empty());
}

#[test]
fn output_inside_source_is_not_rescanned() {
    let tmp = setup_source();
    let src = tmp.path().join("photos");
    let output = src.join("dist");

    let first = run_pipeline_into(&src, &output, &["jpg"]);
    let second = run_pipeline_into(&src, &output, &["jpg"]);

    assert_eq!(first.manifest.len(), 2);
    assert_eq!(second.manifest, first.manifest);
    assert_eq!(second.html, first.html);
    assert_eq!(second.summary.written, 0);
    assert!(!second.destination.join("a_resized_resized.jpg").exists());
    assert!(!second.destination.join("a_thumbnail_thumbnail.jpg").exists());
}

#[test]
fn links_to_names_with_url_characters_resolve() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("photos");
    write_image(&src.join("party #1.jpg"), 60, 40, image::ImageFormat::Jpeg);

    let run = run_pipeline(tmp.path(), &["jpg"]);

    assert!(run.html.contains(r#"href="party%20%231_resized.jpg""#));
    let href = run
        .html
        .split(r#"href=""#)
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap();
    let decoded = urlencoding::decode(href).unwrap();
    assert!(run.destination.join(decoded.as_ref()).exists(), "{href}");
}
