use rota_core::{pattern, Rgb8, RgbImage};
use rota_io::{read, write, write_with, Format, IoError, WriteOptions};
use std::fs::File;
use std::io::BufWriter;

#[test]
fn png_roundtrip_is_lossless() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gradient.png");
    let image = pattern::gradient(37, 21).expect("gradient");

    write(&path, &image).expect("write png");
    assert_eq!(Format::detect(&path).expect("detect"), Format::Png);

    let loaded = read(&path).expect("read png");
    assert_eq!(loaded, image);
}

#[test]
fn jpeg_roundtrip_keeps_dimensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("flat.jpg");
    let image = RgbImage::filled(24, 16, Rgb8::new(120, 60, 200)).expect("filled");

    write_with(&path, &image, &WriteOptions { jpeg_quality: 95 }).expect("write jpeg");
    assert_eq!(Format::detect(&path).expect("detect"), Format::Jpeg);

    let loaded = read(&path).expect("read jpeg");
    assert_eq!(loaded.dimensions(), (24, 16));
    // lossy, but a flat field survives closely
    let px = loaded.pixel(12, 8);
    assert!(px.max_channel_diff(Rgb8::new(120, 60, 200)) <= 6, "got {px:?}");
}

#[test]
fn magic_bytes_win_over_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png_path = dir.path().join("real.png");
    let image = RgbImage::filled(4, 4, Rgb8::WHITE).expect("filled");
    write(&png_path, &image).expect("write png");

    let misnamed = dir.path().join("misnamed.jpg");
    std::fs::copy(&png_path, &misnamed).expect("copy");
    assert_eq!(read(&misnamed).expect("read"), image);
}

#[test]
fn grayscale_alpha_png_expands_to_rgb() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gray_alpha.png");
    {
        let file = File::create(&path).expect("create");
        let mut encoder = png::Encoder::new(BufWriter::new(file), 2, 1);
        encoder.set_color(png::ColorType::GrayscaleAlpha);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("header");
        writer.write_image_data(&[10, 255, 200, 0]).expect("data");
    }

    let loaded = read(&path).expect("read");
    assert_eq!(loaded.pixel(0, 0), Rgb8::gray(10));
    assert_eq!(loaded.pixel(1, 0), Rgb8::gray(200));
}

#[test]
fn unknown_extension_is_rejected_on_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let image = RgbImage::new(2, 2).expect("new");
    let err = write(dir.path().join("out.bmp"), &image).unwrap_err();
    assert!(matches!(err, IoError::UnsupportedFormat(ref ext) if ext == "bmp"));
}

#[test]
fn corrupt_png_fails_to_decode() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.png");
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(b"not really a png");
    std::fs::write(&path, bytes).expect("write");

    assert!(matches!(read(&path), Err(IoError::DecodeError(_))));
}

#[test]
fn missing_file_is_io_error() {
    let err = read("/definitely/not/here.png").unwrap_err();
    assert!(matches!(err, IoError::Io(_)));
}
