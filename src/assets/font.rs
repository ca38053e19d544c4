use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use sha2::Digest as _;

use crate::foundation::error::{LyricueError, LyricueResult};

/// Generic family used when no font file is configured.
pub const FALLBACK_FAMILY: &str = "serif";

/// Explicitly loaded font file.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    /// Where the bytes came from, if from disk.
    pub path: Option<PathBuf>,
    /// Primary family name of the first face.
    pub family: String,
    /// Number of faces in the file.
    pub faces: usize,
    /// SHA-256 of the file bytes, lower-case hex.
    pub sha256: String,
}

/// Font database owned by one render session.
///
/// Built once up front (system fonts, a `fonts/` directory next to the project and an
/// optional font file) and shared read-only by every frame. Dropping the handle releases it.
#[derive(Clone, Debug)]
pub struct FontHandle {
    db: Arc<usvg::fontdb::Database>,
    family: String,
    loaded: Option<LoadedFont>,
}

impl FontHandle {
    /// System fonts only.
    pub fn system() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self::finish(db, None)
    }

    /// System fonts, `root/fonts/*`, and `font` if given.
    ///
    /// A configured font that cannot be read or parsed is an error; the fonts directory is
    /// best-effort.
    pub fn prepare(root: &Path, font: Option<&Path>) -> LyricueResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        load_fonts_from_dir(&mut db, &root.join("fonts"));

        let loaded = match font {
            Some(rel) => {
                let path = root.join(rel);
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read font file '{}'", path.display()))?;
                Some(load_bytes(&mut db, bytes, Some(path))?)
            }
            None => None,
        };
        Ok(Self::finish(db, loaded))
    }

    /// Database seeded only with `bytes` (no system fonts), for deterministic output.
    pub fn from_bytes(bytes: Vec<u8>) -> LyricueResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        let loaded = load_bytes(&mut db, bytes, None)?;
        Ok(Self::finish(db, Some(loaded)))
    }

    fn finish(mut db: usvg::fontdb::Database, loaded: Option<LoadedFont>) -> Self {
        let family = match &loaded {
            Some(f) => {
                // Generic "serif" requests resolve to the configured face.
                db.set_serif_family(f.family.clone());
                f.family.clone()
            }
            None => FALLBACK_FAMILY.to_string(),
        };
        tracing::debug!(faces = db.len(), family = %family, "prepared font database");
        Self {
            db: Arc::new(db),
            family,
            loaded,
        }
    }

    /// Family name to request in generated SVG.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Shared database for `usvg::Options`.
    pub fn database(&self) -> Arc<usvg::fontdb::Database> {
        Arc::clone(&self.db)
    }

    /// Number of faces available.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// The configured font, if any.
    pub fn loaded(&self) -> Option<&LoadedFont> {
        self.loaded.as_ref()
    }
}

fn load_bytes(
    db: &mut usvg::fontdb::Database,
    bytes: Vec<u8>,
    path: Option<PathBuf>,
) -> LyricueResult<LoadedFont> {
    let sha256 = sha256_hex(&bytes);
    let label = path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string());

    let ids = db.load_font_source(usvg::fontdb::Source::Binary(Arc::new(bytes)));
    let family = ids
        .first()
        .and_then(|id| db.face(*id))
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())
        .ok_or_else(|| LyricueError::validation(format!("font '{label}' has no usable faces")))?;

    Ok(LoadedFont {
        path,
        family,
        faces: ids.len(),
        sha256,
    })
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        let is_font = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"));
        if !path.is_file() || !is_font {
            continue;
        }
        if let Err(err) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %err, "skipping unreadable font");
        }
    }
}

/// Lower-case hex SHA-256.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
