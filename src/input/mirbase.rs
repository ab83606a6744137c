use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::input::{InputError, open_maybe_gz, trim_line_end};

pub const DEFAULT_DEAD_EXT: &str = ".mirbase_v22_IDs.tsv.dead.uniq";
pub const DEFAULT_CHANGED_EXT: &str = ".mirbase_v22_IDs.tsv.changed.uniq";

/// Marker used by the miRBase converter for "no current identifier".
const NO_REPLACEMENT: &str = "--";

#[derive(Debug, Clone, Default)]
pub struct MirbaseUpdates {
    pub dead: HashSet<String>,
    pub changed: HashMap<String, String>,
}

impl MirbaseUpdates {
    pub fn load(dead_path: &Path, changed_path: &Path, sep: char) -> Result<Self, InputError> {
        let dead = read_dead_ids(dead_path, sep)?;
        let changed = read_changed_ids(changed_path, sep)?;
        tracing::info!(
            "miRBase updates: {} dead ids, {} renamed ids",
            dead.len(),
            changed.len()
        );
        Ok(Self { dead, changed })
    }
}

/// Converter outputs sit next to the resource file, named by extension.
pub fn sibling_path(resource: &Path, ext: &str) -> PathBuf {
    let mut name = resource.as_os_str().to_os_string();
    name.push(ext);
    PathBuf::from(name)
}

pub fn read_dead_ids(path: &Path, sep: char) -> Result<HashSet<String>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut out = HashSet::new();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        let line = trim_line_end(&buf);
        let id = line.split(sep).next().unwrap_or("").trim();
        if !id.is_empty() {
            out.insert(id.to_string());
        }
    }
    Ok(out)
}

/// The first line is a header; rows are `from, to, accession`.
pub fn read_changed_ids(path: &Path, sep: char) -> Result<HashMap<String, String>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut out = HashMap::new();
    let mut line_no = 0usize;
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        if line_no == 1 {
            continue;
        }
        let line = trim_line_end(&buf);
        let mut cols = line.split(sep);
        let from = cols.next().unwrap_or("").trim();
        let to = cols.next().unwrap_or("").trim();
        if from.is_empty() || to.is_empty() || to == NO_REPLACEMENT {
            continue;
        }
        if out.insert(from.to_string(), to.to_string()).is_some() {
            tracing::warn!("miRBase id {} renamed more than once; keeping the last", from);
        }
    }
    Ok(out)
}
