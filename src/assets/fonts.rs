//! Process-wide font library shared by text layers and SVG text.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use usvg::fontdb;

use crate::foundation::error::{AudiogramError, AudiogramResult};

static LIBRARY: OnceLock<Result<Arc<fontdb::Database>, String>> = OnceLock::new();
static SYSTEM_ONLY: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

/// Load system fonts plus every font file in `dirs` into the process-wide library.
///
/// Runs once per process: later calls do nothing and return the first call's outcome.
#[tracing::instrument(skip_all, fields(dirs = dirs.len()))]
pub fn init_fonts(dirs: &[PathBuf]) -> AudiogramResult<()> {
    LIBRARY
        .get_or_init(|| build_library(dirs).map(Arc::new))
        .as_ref()
        .map(|db| tracing::debug!(faces = db.len(), "font library ready"))
        .map_err(|e| AudiogramError::resource(e.clone()))
}

/// The initialized library, or system fonts only when [`init_fonts`] has not succeeded.
pub fn library() -> Arc<fontdb::Database> {
    match LIBRARY.get() {
        Some(Ok(db)) => db.clone(),
        _ => SYSTEM_ONLY
            .get_or_init(|| {
                let mut db = fontdb::Database::new();
                db.load_system_fonts();
                Arc::new(db)
            })
            .clone(),
    }
}

fn build_library(dirs: &[PathBuf]) -> Result<fontdb::Database, String> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    for dir in dirs {
        load_fonts_from_dir(&mut db, dir)?;
    }
    Ok(db)
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) -> Result<(), String> {
    let rd = std::fs::read_dir(dir)
        .map_err(|e| format!("read font directory '{}': {e}", dir.display()))?;

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        db.load_font_file(&path)
            .map_err(|e| format!("load font '{}': {e}", path.display()))?;
    }
    Ok(())
}

/// Bytes and collection index of the face best matching `family`/`weight`/`italic`, falling
/// back to a sans-serif face and then to any face at all.
pub fn query_face(
    db: &fontdb::Database,
    family: &str,
    weight: u16,
    italic: bool,
) -> Option<(Vec<u8>, u32)> {
    let families = [fontdb::Family::Name(family), fontdb::Family::SansSerif];
    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight(weight),
        stretch: fontdb::Stretch::Normal,
        style: if italic {
            fontdb::Style::Italic
        } else {
            fontdb::Style::Normal
        },
    };
    let id = db.query(&query).or_else(|| db.faces().next().map(|f| f.id))?;
    db.with_face_data(id, |data, index| (data.to_vec(), index))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
