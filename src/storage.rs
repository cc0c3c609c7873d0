use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::viz::OutputFormat;

/// `dir/stem.<ext>` for a rendered figure.
pub fn output_path<P: AsRef<Path>>(dir: P, stem: &str, format: OutputFormat) -> PathBuf {
    dir.as_ref().join(format!("{stem}.{}", format.extension()))
}

/// Write a rendered document in one go. An empty document is a render failure.
pub fn write_output<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if bytes.is_empty() {
        return Err(Error::Render(format!(
            "nothing was rendered for {}",
            path.display()
        )));
    }
    let io_err = |source: std::io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut f = File::create(path).map_err(io_err)?;
    f.write_all(bytes).map_err(io_err)?;
    f.flush().map_err(io_err)?;
    Ok(())
}

/// Save any serializable value (a style config, a run report) as pretty JSON.
pub fn save_json<T: serde::Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|e| Error::Render(format!("cannot serialize to JSON: {e}")))?;
    write_output(path, s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_and_name_outputs() {
        let dir = tempdir().unwrap();
        let p = output_path(dir.path(), "example1D", OutputFormat::Pdf);
        assert_eq!(p.file_name().unwrap(), "example1D.pdf");
        write_output(&p, b"%PDF-1.7").unwrap();
        assert_eq!(std::fs::read(&p).unwrap(), b"%PDF-1.7");

        let jsonp = dir.path().join("x.json");
        save_json(&vec![1, 2, 3], &jsonp).unwrap();
        assert!(jsonp.exists());
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("no/such/dir/out.pdf");
        let err = write_output(&p, b"x").unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path == &p));
        assert!(matches!(write_output(dir.path().join("e.pdf"), b""), Err(Error::Render(_))));
    }
}
