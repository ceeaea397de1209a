use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::XlsxError;

/// A workbook archive read fully into memory, keyed by normalized OPC part
/// name. Comparing and parsing parts this way avoids ever holding ZIP reader
/// state across calls.
pub struct WorkbookPackage {
    parts: BTreeMap<String, Vec<u8>>,
}

impl WorkbookPackage {
    pub fn open(path: &Path) -> Result<Self, XlsxError> {
        let file = File::open(path).map_err(|source| XlsxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut zip = ZipArchive::new(file)?;
        Self::read_zip(&mut zip)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, XlsxError> {
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;
        Self::read_zip(&mut zip)
    }

    fn read_zip<R: Read + Seek>(zip: &mut ZipArchive<R>) -> Result<Self, XlsxError> {
        let mut parts = BTreeMap::new();
        for i in 0..zip.len() {
            let mut entry = zip.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let name = normalize_part_name(entry.name());
            // ZIP metadata is untrusted; size-hinted preallocation would let a
            // crafted archive request an enormous buffer.
            let mut buf = Vec::new();
            entry
                .read_to_end(&mut buf)
                .map_err(|source| XlsxError::Io {
                    path: name.clone().into(),
                    source,
                })?;
            if parts.insert(name.clone(), buf).is_some() {
                return Err(XlsxError::DuplicatePart(name));
            }
        }
        Ok(Self { parts })
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(|v| v.as_slice())
    }

    /// Part bytes decoded as UTF-8, for XML parsing.
    pub fn text(&self, name: &str) -> Result<Option<&str>, XlsxError> {
        match self.parts.get(name) {
            Some(bytes) => std::str::from_utf8(bytes)
                .map(Some)
                .map_err(|source| XlsxError::NonUtf8 {
                    part: name.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(|k| k.as_str())
    }
}

/// Normalize a ZIP entry name to OPC form: forward slashes, no leading slash,
/// `.` and `..` segments resolved.
fn normalize_part_name(name: &str) -> String {
    let name = name.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
