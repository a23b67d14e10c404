use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use decomp::{Decomposition, DecompositionData};
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

pub fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    Ok(())
}

/// Write-then-rename wrapper so a failed run never leaves a truncated
/// document behind.
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
    need_fsync_dir: bool,
}

pub fn open_for_write(target: &Path, force: bool) -> Result<PendingWrite> {
    assert_not_stdout(target)?;
    let parent = target.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    if !force && target.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    let tmp = NamedTempFile::new_in(parent.unwrap_or(Path::new(".")))
        .context("create temp file")?;

    Ok(PendingWrite { target: target.to_path_buf(), tmp, need_fsync_dir: parent.is_some() })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }
    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

pub fn finalize_write(pending: PendingWrite) -> Result<()> {
    let PendingWrite { target, tmp, need_fsync_dir } = pending;
    tmp.as_file().sync_all().ok(); // best-effort fsync file
    tmp.persist(&target)
        .with_context(|| format!("rename to {}", target.display()))?;
    if need_fsync_dir {
        if let Some(dir) = target.parent() {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
    }
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse {}", path.display()))
}

/// Load a decomposition document (the JSON form of [`DecompositionData`]).
pub fn read_document(path: &Path) -> Result<Decomposition> {
    let data: DecompositionData = read_json(path)?;
    let decomp = Decomposition::import(&data)
        .with_context(|| format!("rebuild decomposition from {}", path.display()))?;
    log::info!(
        "read {}: {} points, {} segments, {} polygons",
        path.display(), decomp.num_points(), decomp.num_segments(), decomp.num_polygons(),
    );
    Ok(decomp)
}

/// Save `decomp` as pretty-printed JSON, atomically.
pub fn write_document(path: &Path, decomp: &Decomposition, force: bool) -> Result<()> {
    let mut pending = open_for_write(path, force)?;
    {
        let mut writer = BufWriter::new(&mut pending);
        serde_json::to_writer_pretty(&mut writer, &decomp.export())
            .with_context(|| format!("serialize to {}", path.display()))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    finalize_write(pending)?;
    log::info!("wrote {}", path.display());
    Ok(())
}
