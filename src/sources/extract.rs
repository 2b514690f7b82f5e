//! Archive extraction for header archives.
//!
//! Header archives are normally JAR (zip) files; tar archives, gzip
//! compressed or not, are accepted as well.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use zip::ZipArchive;

use crate::makefile::MakefileError;

/// Extracts archives into a directory.
pub trait ArchiveExtractor {
    /// Extract the entries of `archive` accepted by `include` into `dest`.
    ///
    /// `include` receives the entry name with `/` separators.
    fn extract(
        &self,
        archive: &Path,
        dest: &Path,
        include: &dyn Fn(&str) -> bool,
    ) -> Result<(), MakefileError>;
}

/// Extractor for tar archives, gzip compressed or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarExtractor;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];
const ZIP_EMPTY_MAGIC: [u8; 4] = [0x50, 0x4b, 0x05, 0x06];

/// First bytes of a file, fewer if the file is shorter.
fn read_magic(path: &Path) -> io::Result<Vec<u8>> {
    let mut magic = Vec::with_capacity(4);
    File::open(path)?.take(4).read_to_end(&mut magic)?;
    Ok(magic)
}

fn escapes(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("archive entry escapes destination directory: {}", name),
    )
}

impl TarExtractor {
    fn is_gzip(path: &Path) -> io::Result<bool> {
        Ok(read_magic(path)?.starts_with(&GZIP_MAGIC))
    }

    fn unpack<R: Read>(
        reader: R,
        dest: &Path,
        include: &dyn Fn(&str) -> bool,
    ) -> io::Result<()> {
        let mut archive = Archive::new(reader);

        std::fs::create_dir_all(dest)?;

        for entry in archive.entries()? {
            let mut entry = entry?;
            let name = entry.path()?.to_string_lossy().replace('\\', "/");

            if !include(&name) {
                tracing::debug!("Skipping archive entry {}", name);
                continue;
            }

            // unpack_in refuses entries that would land outside `dest`
            if !entry.unpack_in(dest)? {
                return Err(escapes(&name));
            }
        }

        Ok(())
    }
}

impl ArchiveExtractor for TarExtractor {
    fn extract(
        &self,
        archive: &Path,
        dest: &Path,
        include: &dyn Fn(&str) -> bool,
    ) -> Result<(), MakefileError> {
        let wrap = |source: io::Error| MakefileError::Extraction {
            archive: archive.to_path_buf(),
            source,
        };

        let gzip = Self::is_gzip(archive).map_err(wrap)?;
        let file = BufReader::new(File::open(archive).map_err(wrap)?);

        if gzip {
            Self::unpack(GzDecoder::new(file), dest, include).map_err(wrap)
        } else {
            Self::unpack(file, dest, include).map_err(wrap)
        }
    }
}

/// Extractor for zip archives (JAR packaged header archives).
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ZipExtractor {
    fn unpack(archive: &Path, dest: &Path, include: &dyn Fn(&str) -> bool) -> io::Result<()> {
        let mut zip = ZipArchive::new(BufReader::new(File::open(archive)?))
            .map_err(io::Error::other)?;

        std::fs::create_dir_all(dest)?;

        for idx in 0..zip.len() {
            let mut entry = zip.by_index(idx).map_err(io::Error::other)?;
            let name = entry.name().replace('\\', "/");

            if !include(&name) {
                tracing::debug!("Skipping archive entry {}", name);
                continue;
            }

            let relative: PathBuf = match entry.enclosed_name() {
                Some(path) => path.to_path_buf(),
                None => return Err(escapes(&name)),
            };
            let target = dest.join(relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&target)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)?;
            io::copy(&mut entry, &mut out)?;
        }

        Ok(())
    }
}

impl ArchiveExtractor for ZipExtractor {
    fn extract(
        &self,
        archive: &Path,
        dest: &Path,
        include: &dyn Fn(&str) -> bool,
    ) -> Result<(), MakefileError> {
        Self::unpack(archive, dest, include).map_err(|source| MakefileError::Extraction {
            archive: archive.to_path_buf(),
            source,
        })
    }
}

/// Extractor picking zip or tar handling from the archive's magic bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderArchiveExtractor;

impl ArchiveExtractor for HeaderArchiveExtractor {
    fn extract(
        &self,
        archive: &Path,
        dest: &Path,
        include: &dyn Fn(&str) -> bool,
    ) -> Result<(), MakefileError> {
        let magic = read_magic(archive).map_err(|source| MakefileError::Extraction {
            archive: archive.to_path_buf(),
            source,
        })?;

        if magic.starts_with(&ZIP_MAGIC) || magic.starts_with(&ZIP_EMPTY_MAGIC) {
            ZipExtractor.extract(archive, dest, include)
        } else {
            TarExtractor.extract(archive, dest, include)
        }
    }
}
