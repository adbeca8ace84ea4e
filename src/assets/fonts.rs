use std::path::{Path, PathBuf};

use crate::foundation::error::{SubplateError, SubplateResult};

/// Where the session obtains its caption font.
#[derive(Clone, Debug)]
pub enum FontSource {
    /// Scan well-known font directories for a bold sans-serif face.
    Discover,
    /// Use these font bytes directly.
    Bytes(Vec<u8>),
}

impl FontSource {
    /// Resolve the source into raw font bytes.
    pub fn resolve(&self) -> SubplateResult<Vec<u8>> {
        match self {
            Self::Bytes(bytes) => Ok(bytes.clone()),
            Self::Discover => find_caption_font(),
        }
    }
}

/// File stems tried first, in order. The caption face is a fixed bold stack
/// and is not user-configurable beyond the `SUBPLATE_FONT` override.
const PREFERRED_STEMS: &[&str] = &[
    "DejaVuSans-Bold",
    "LiberationSans-Bold",
    "NotoSans-Bold",
    "Arial Bold",
    "arialbd",
    "Helvetica",
];

/// Locate a usable bold caption font and return its bytes.
///
/// Honors the `SUBPLATE_FONT` environment variable when set; otherwise scans
/// the platform font directories for a preferred face, then any bold face,
/// then any face at all.
pub fn find_caption_font() -> SubplateResult<Vec<u8>> {
    if let Ok(path) = std::env::var("SUBPLATE_FONT") {
        let path = PathBuf::from(path);
        return std::fs::read(&path).map_err(|e| {
            SubplateError::file_read(format!(
                "failed to read SUBPLATE_FONT '{}': {e}",
                path.display()
            ))
        });
    }

    let mut candidates = Vec::<PathBuf>::new();
    for dir in font_dirs() {
        collect_font_files(&dir, 0, &mut candidates);
    }

    let chosen = pick_candidate(&candidates).ok_or_else(|| {
        SubplateError::validation(
            "no usable caption font found; set SUBPLATE_FONT to a .ttf/.otf path",
        )
    })?;

    std::fs::read(&chosen).map_err(|e| {
        SubplateError::file_read(format!("failed to read font '{}': {e}", chosen.display()))
    })
}

fn pick_candidate(candidates: &[PathBuf]) -> Option<PathBuf> {
    let stem_of = |p: &PathBuf| {
        p.file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default()
    };

    for preferred in PREFERRED_STEMS {
        let want = preferred.to_ascii_lowercase();
        if let Some(p) = candidates.iter().find(|p| stem_of(p) == want) {
            return Some(p.clone());
        }
    }
    if let Some(p) = candidates.iter().find(|p| stem_of(p).contains("bold")) {
        return Some(p.clone());
    }
    candidates.first().cloned()
}

fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("C:\\Windows\\Fonts"),
    ];
    if let Ok(home) = std::env::var("HOME") {
        dirs.push(Path::new(&home).join(".fonts"));
        dirs.push(Path::new(&home).join(".local/share/fonts"));
    }
    dirs
}

fn collect_font_files(dir: &Path, depth: u32, out: &mut Vec<PathBuf>) {
    // Font directories nest one or two levels (e.g. truetype/dejavu).
    if depth > 3 {
        return;
    }
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_font_files(&path, depth + 1, out);
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext == "ttf" || ext == "otf" || ext == "ttc" {
            out.push(path);
        }
    }
}
