//! JAR inspection: provided packages and `META-INF/MANIFEST.MF` entries.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Read};
use std::path::Path;

const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

fn open(path: &Path) -> io::Result<zip::ZipArchive<std::fs::File>> {
    let file = std::fs::File::open(path)?;
    zip::ZipArchive::new(file).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not a readable archive: {e}", path.display()),
        )
    })
}

/// List the Java packages that contain at least one class in the JAR.
///
/// Classes in the default package and anything under `META-INF/` are ignored.
pub fn read_packages(path: &Path) -> io::Result<BTreeSet<String>> {
    let archive = open(path)?;
    let packages = archive
        .file_names()
        .filter(|name| name.ends_with(".class") && !name.starts_with("META-INF/"))
        .filter_map(|name| name.rsplit_once('/').map(|(dir, _)| dir.replace('/', ".")))
        .filter(|pkg| !pkg.is_empty())
        .collect();
    Ok(packages)
}

/// Read the main section of the JAR manifest. A JAR without a manifest yields
/// an empty map.
pub fn read_manifest(path: &Path) -> io::Result<BTreeMap<String, String>> {
    let mut archive = open(path)?;
    let mut entry = match archive.by_name(MANIFEST_PATH) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(BTreeMap::new()),
        Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e.to_string())),
    };
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(parse_manifest(&content))
}

/// Parse the main section of a JAR manifest.
///
/// Continuation lines start with a single space and are appended to the
/// previous value. Parsing stops at the first blank line (end of the main
/// section); lines without a `: ` separator are skipped.
pub fn parse_manifest(content: &str) -> BTreeMap<String, String> {
    let mut entries: Vec<(String, String)> = Vec::new();
    for line in content.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            break;
        }
        if let Some(rest) = line.strip_prefix(' ') {
            if let Some((_, value)) = entries.last_mut() {
                value.push_str(rest);
            }
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            entries.push((name.trim().to_string(), value.trim_start().to_string()));
        }
    }
    entries.into_iter().collect()
}
