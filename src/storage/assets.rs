//! Image assets and their inline reference tokens
//!
//! Pasted images are stored under `<vault>/assets/` as `HHMMSS.<ext>` and
//! referenced from journal text with a markdown image token
//! `![<name>](<path>)`, so the journal stays readable by other markdown tools.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{Cursor, ErrorKind, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use image::ImageFormat;
use once_cell::sync::Lazy;
use regex::Regex;

use super::permissions::{self, EntryKind};
use super::resolve;
use crate::error::{CaptureError, CaptureResult};

/// Name of the asset subdirectory inside the vault
pub const ASSET_DIR_NAME: &str = "assets";

/// Extension used for re-encoded images
pub const IMAGE_EXTENSION: &str = "png";

/// Highest numeric suffix tried before giving up on a name
const MAX_NAME_SUFFIX: u32 = 99;

/// Opening of a reference token, `![<name>](`
static TOKEN_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]\n]*)\]\(").expect("valid token regex"));

/// A stored asset and the token that embeds it in journal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Display name, the asset's filename
    pub name: String,
    /// Path of the asset file as written in the token
    pub path: PathBuf,
}

impl AssetReference {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The inline token, `![<name>](<path>)`, with no escaping
    pub fn token(&self) -> String {
        format!("![{}]({})", self.name, self.path.display())
    }

    /// Whether the referenced file is present
    ///
    /// A missing file is a degraded state, not an error.
    pub fn resolves(&self) -> bool {
        self.path.is_file()
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// A reference token found in journal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    /// Byte range of the whole token in the scanned text
    pub span: Range<usize>,
    pub reference: AssetReference,
}

/// Find every asset reference token in `text`, in order of appearance
pub fn parse_references(text: &str) -> Vec<TokenMatch> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TOKEN_OPEN_RE.captures_at(text, pos) {
        let (Some(open), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let path_start = open.end();

        match path_len(&text[path_start..], name.as_str()) {
            Some(len) if len > 0 => {
                let path_end = path_start + len;
                found.push(TokenMatch {
                    span: open.start()..path_end + 1,
                    reference: AssetReference::new(name.as_str(), &text[path_start..path_end]),
                });
                pos = path_end + 1;
            }
            _ => pos = path_start,
        }
    }

    found
}

/// Length of the token path at the start of `rest`
///
/// Paths are written unescaped and may themselves contain `)`, as in
/// `Program Files (x86)`. The path ends at the first `<name>)` on the line,
/// since generated paths end in the asset's filename, and otherwise at the
/// first `)`.
fn path_len(rest: &str, name: &str) -> Option<usize> {
    let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
    if !name.is_empty() {
        if let Some(at) = line.find(&format!("{})", name)) {
            return Some(at + name.len());
        }
    }
    line.find(')')
}

/// Decode any supported image and re-encode it losslessly as PNG
pub fn encode_png(bytes: &[u8]) -> CaptureResult<Vec<u8>> {
    let image = image::load_from_memory(bytes)?;
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Allocates names for and persists pasted assets
#[derive(Debug, Clone)]
pub struct AssetStore {
    dir: PathBuf,
}

impl AssetStore {
    /// Asset store for the vault at `vault_root`
    pub fn for_vault(vault_root: &Path) -> Self {
        Self {
            dir: vault_root.join(ASSET_DIR_NAME),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist raw `bytes` under a fresh `HHMMSS.<extension>` name
    ///
    /// A second asset within the same second gets `HHMMSS-1.<ext>`,
    /// `HHMMSS-2.<ext>` and so on. Existing assets are never overwritten.
    pub fn save_asset(
        &self,
        bytes: &[u8],
        extension: &str,
        now: NaiveDateTime,
    ) -> CaptureResult<AssetReference> {
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(CaptureError::Validation(format!(
                "Invalid asset extension: '{}'",
                extension
            )));
        }

        let dir = resolve::ensure_dir(&self.dir)?;
        let stem = now.format("%H%M%S").to_string();

        for suffix in 0..=MAX_NAME_SUFFIX {
            let name = if suffix == 0 {
                format!("{}.{}", stem, extension)
            } else {
                format!("{}-{}.{}", stem, suffix, extension)
            };
            let path = dir.join(&name);

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(CaptureError::write(&path, e)),
            };

            if let Err(e) = file.write_all(bytes) {
                drop(file);
                let _ = std::fs::remove_file(&path);
                return Err(CaptureError::write(&path, e));
            }
            permissions::normalize(&path, EntryKind::File);

            tracing::debug!(path = %path.display(), bytes = bytes.len(), "stored asset");
            return Ok(AssetReference::new(name, path));
        }

        Err(CaptureError::NameCollision {
            name: format!("{}.{}", stem, extension),
        })
    }

    /// Re-encode pasted image bytes as PNG and store them
    pub fn save_image(&self, bytes: &[u8], now: NaiveDateTime) -> CaptureResult<AssetReference> {
        let png = encode_png(bytes)?;
        self.save_asset(&png, IMAGE_EXTENSION, now)
    }
}
