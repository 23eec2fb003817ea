use std::time::{Duration, Instant};

use waste_sort::capture_runners::{camera_for, FakeCamera, StillCommandCamera};
use waste_sort::common::WasteImage;
use waste_sort::data::{CameraProgram, CaptureConfig};

fn config_in(dir: &tempfile::TempDir) -> CaptureConfig {
    CaptureConfig::default()
        .with_settle_delay(Duration::from_millis(10))
        .with_output_path(dir.path().join("WasteSorting.jpg"))
}

#[test]
fn capture_writes_full_resolution_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let mut camera = FakeCamera::new(1);

    let path = waste_sort::capture_frame(&mut camera, &config).unwrap();

    assert_eq!(path, config.output_path);
    let image = WasteImage::open(&path).unwrap();
    assert_eq!((image.img_width, image.img_height), (800, 600));
    assert_eq!(camera.calls, ["configure", "start_preview", "capture", "stop_preview"]);
    assert!(!camera.is_previewing());
}

#[test]
fn capture_waits_for_settle_delay() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir).with_settle_delay(Duration::from_millis(60));

    let start = Instant::now();
    waste_sort::capture_frame(&mut FakeCamera::new(1), &config).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(60));
}

#[test]
fn capture_replaces_previous_frame() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    waste_sort::capture_frame(&mut FakeCamera::new(1), &config).unwrap();
    let first = std::fs::read(&config.output_path).unwrap();
    waste_sort::capture_frame(&mut FakeCamera::new(2), &config).unwrap();
    let second = std::fs::read(&config.output_path).unwrap();

    assert_ne!(first, second);
    assert!(WasteImage::open(&config.output_path).is_ok());
}

#[test]
fn failed_capture_releases_preview() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let mut camera = FakeCamera::new(1).failing();

    assert!(waste_sort::capture_frame(&mut camera, &config).is_err());
    assert!(!camera.is_previewing());
    assert_eq!(camera.calls.last(), Some(&"stop_preview"));
    assert!(!config.output_path.exists());
}

#[test]
fn unwritable_destination_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir).with_output_path(dir.path().join("missing").join("WasteSorting.jpg"));
    let mut camera = FakeCamera::new(1);

    assert!(waste_sort::capture_frame(&mut camera, &config).is_err());
    assert!(!camera.is_previewing());
}

#[test]
fn invalid_resolution_never_previews() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir).with_resolution(0, 600);
    let mut camera = FakeCamera::new(1);

    assert!(waste_sort::capture_frame(&mut camera, &config).is_err());
    assert_eq!(camera.calls, ["configure"]);
}

#[test]
fn camera_selection_follows_program() {
    let config = CaptureConfig::default().with_program(CameraProgram::Fake);
    assert!(camera_for(&config).is_ok());
    assert!(StillCommandCamera::new(CameraProgram::Fake).is_err());
    assert!(StillCommandCamera::new(CameraProgram::Raspistill).is_ok());
}
