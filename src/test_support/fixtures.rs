//! Test fixtures for common test scenarios.
//!
//! Header archives (tar or zip), unpacked bundle layouts and manifests written to a real
//! (temporary) filesystem.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::Builder;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::core::Artifact;
use crate::sources::UnpackedBundleClassifier;

fn append_entries<W: Write>(builder: &mut Builder<W>, entries: &[(&str, &str)]) {
    for (path, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_path(path).unwrap();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append(&header, std::io::Cursor::new(content.as_bytes()))
            .unwrap();
    }
}

/// Write a gzip compressed header archive with the given `(path, content)`
/// entries.
pub fn write_header_archive(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    let mut builder = Builder::new(encoder);
    append_entries(&mut builder, entries);
    builder.into_inner().unwrap().finish().unwrap();
}

/// Write an uncompressed tar archive.
pub fn write_plain_tar(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut builder = Builder::new(File::create(path).unwrap());
    append_entries(&mut builder, entries);
    builder.finish().unwrap();
}

/// Write a zip (JAR style) header archive.
pub fn write_zip_archive(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

/// Create the unpacked layout of a bundle: one empty file per library name
/// under `libs/<architecture>/`. Returns the created files.
pub fn unpack_bundle(
    artifact: &Artifact,
    unpack_root: &Path,
    architecture: &str,
    libraries: &[&str],
) -> Vec<PathBuf> {
    let libs = UnpackedBundleClassifier::libs_dir(artifact, unpack_root, architecture);
    std::fs::create_dir_all(&libs).unwrap();
    libraries
        .iter()
        .map(|name| {
            let file = libs.join(name);
            std::fs::write(&file, b"\x7fELF").unwrap();
            file
        })
        .collect()
}
