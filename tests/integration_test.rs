//! End-to-end tests over folders of synthesised JPEG files.

use photo_gps::processor::{run, Summary};

use std::{fs, io::Cursor, path::Path, process::Command};
use exif::{experimental::Writer, Field, In, Tag, Value};
use tempfile::tempdir;

fn ascii(s: &str) -> Value {
    Value::Ascii(vec![s.as_bytes().to_vec()])
}

fn dms(d: u32, m: u32, s: u32) -> Value {
    Value::Rational(vec![(d, 1).into(), (m, 1).into(), (s, 1).into()])
}

/// A minimal JPEG: SOI, an APP1 segment with the given fields when any, EOI.
fn jpeg(fields: &[(Tag, Value)]) -> Vec<u8> {
    let mut data = vec![0xff, 0xd8];

    if !fields.is_empty() {
        let fields: Vec<Field> = fields
            .iter()
            .map(|(tag, value)| Field { tag: *tag, ifd_num: In::PRIMARY, value: value.clone() })
            .collect();

        let mut writer = Writer::new();

        for field in &fields {
            writer.push_field(field);
        }

        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, false).expect("failed to write EXIF");
        let tiff = tiff.into_inner();

        let len = (2 + 6 + tiff.len()) as u16;
        data.extend_from_slice(&[0xff, 0xe1]);
        data.extend_from_slice(&len.to_be_bytes());
        data.extend_from_slice(b"Exif\0\0");
        data.extend_from_slice(&tiff);
    }

    data.extend_from_slice(&[0xff, 0xd9]);
    data
}

fn located() -> Vec<(Tag, Value)> {
    vec![
        (Tag::Make, ascii("Acme")),
        (Tag::GPSLatitudeRef, ascii("N")),
        (Tag::GPSLatitude, dms(40, 30, 0)),
        (Tag::GPSLongitudeRef, ascii("W")),
        (Tag::GPSLongitude, dms(73, 15, 0)),
    ]
}

fn write(dir: &Path, name: &str, data: &[u8]) {
    fs::write(dir.join(name), data).expect("failed to write test file");
}

fn run_to_string(dir: &Path) -> (String, Summary) {
    let mut out = Vec::new();
    let summary = run(dir, &mut out).expect("batch failed");

    (String::from_utf8(out).expect("output is not UTF-8"), summary)
}

// ============================================================================
// Batch Tests
// ============================================================================

#[test]
fn test_folder_without_jpegs() {
    let dir = tempdir().expect("failed to create temp dir");
    write(dir.path(), "a.png", b"png");
    write(dir.path(), "notes.txt", b"text");

    let (output, summary) = run_to_string(dir.path());

    assert_eq!(output, "");
    assert_eq!(summary.total(), 0);
}

#[test]
fn test_jpeg_without_exif() {
    let dir = tempdir().expect("failed to create temp dir");
    write(dir.path(), "plain.jpg", &jpeg(&[]));

    let (output, summary) = run_to_string(dir.path());

    assert_eq!(output, "Photo: plain.jpg\nNo GPS data found.\n");
    assert_eq!(summary.without_gps, 1);
}

#[test]
fn test_jpeg_with_exif_but_no_gps() {
    let dir = tempdir().expect("failed to create temp dir");
    write(dir.path(), "camera.jpg", &jpeg(&[(Tag::Make, ascii("Acme"))]));

    let (output, _) = run_to_string(dir.path());

    assert_eq!(output, "Photo: camera.jpg\nNo GPS data found.\n");
}

#[test]
fn test_jpeg_with_gps() {
    let dir = tempdir().expect("failed to create temp dir");
    write(dir.path(), "trip.JPEG", &jpeg(&located()));

    let (output, summary) = run_to_string(dir.path());

    assert_eq!(output, "Photo: trip.JPEG\nGPS Coordinates: 40.5, -73.25\n");
    assert_eq!(summary.located, 1);
}

#[test]
fn test_missing_latitude_ref_is_incomplete() {
    let dir = tempdir().expect("failed to create temp dir");
    let fields: Vec<_> = located().into_iter().filter(|(tag, _)| *tag != Tag::GPSLatitudeRef).collect();
    write(dir.path(), "partial.jpg", &jpeg(&fields));

    let (output, summary) = run_to_string(dir.path());

    assert_eq!(output, "Photo: partial.jpg\nIncomplete GPS data.\n");
    assert_eq!(summary.incomplete, 1);
}

#[test]
fn test_zero_denominator_is_reported() {
    let dir = tempdir().expect("failed to create temp dir");
    let mut fields = located();
    fields.retain(|(tag, _)| *tag != Tag::GPSLatitude);
    fields.push((Tag::GPSLatitude, Value::Rational(vec![(40, 0).into(), (30, 1).into(), (0, 1).into()])));
    write(dir.path(), "broken_gps.jpg", &jpeg(&fields));

    let (output, summary) = run_to_string(dir.path());

    assert_eq!(
        output,
        "Photo: broken_gps.jpg\nError processing broken_gps.jpg: zero denominator in the degrees of a GPS coordinate\n"
    );
    assert_eq!(summary.failed, 1);
}

#[test]
fn test_corrupted_file_does_not_stop_the_batch() {
    let dir = tempdir().expect("failed to create temp dir");
    write(dir.path(), "a_broken.jpg", b"this is not a picture");
    write(dir.path(), "b_trip.jpg", &jpeg(&located()));

    let (output, summary) = run_to_string(dir.path());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Error processing a_broken.jpg: "));
    assert_eq!(lines[1], "Photo: b_trip.jpg");
    assert_eq!(lines[2], "GPS Coordinates: 40.5, -73.25");
    assert_eq!(summary, Summary { located: 1, incomplete: 0, without_gps: 0, failed: 1 });
}

// ============================================================================
// Command Line Tests
// ============================================================================

#[test]
fn test_cli_without_arguments() {
    let output = Command::new(env!("CARGO_BIN_EXE_photo_gps")).output().expect("failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
}

#[test]
fn test_cli_with_a_file() {
    let dir = tempdir().expect("failed to create temp dir");
    write(dir.path(), "a.jpg", &jpeg(&[]));

    let output = Command::new(env!("CARGO_BIN_EXE_photo_gps"))
        .arg(dir.path().join("a.jpg"))
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "The provided path is not a directory.\n");
}

#[test]
fn test_cli_with_a_folder() {
    let dir = tempdir().expect("failed to create temp dir");
    write(dir.path(), "a.jpg", &jpeg(&located()));
    write(dir.path(), "b.jpg", b"garbage");

    let output = Command::new(env!("CARGO_BIN_EXE_photo_gps"))
        .arg(dir.path())
        .output()
        .expect("failed to run binary");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.starts_with("Photo: a.jpg\nGPS Coordinates: 40.5, -73.25\n"));
    assert!(stdout.contains("Error processing b.jpg: "));
}
