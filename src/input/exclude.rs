use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use crate::input::{InputError, open_maybe_gz};

pub fn load_exclude_set(path: &Path) -> Result<HashSet<String>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut out = HashSet::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        let entry = buf.trim();
        if entry.is_empty() {
            continue;
        }
        out.insert(entry.to_string());
    }

    tracing::info!(
        "loaded {} excluded identifiers from {}",
        out.len(),
        path.display()
    );
    Ok(out)
}
