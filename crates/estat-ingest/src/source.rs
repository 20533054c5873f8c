//! Source resolution: local paths and HTTP(S) URLs, plus gzip decoding.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use flate2::read::MultiGzDecoder;
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Maximum size for a local source file (512 MB).
pub const MAX_SOURCE_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a compressed export comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local file.
    Path(PathBuf),
    /// HTTP or HTTPS resource.
    Url(String),
}

impl DataSource {
    /// Interprets a command-line style location.
    ///
    /// Anything starting with `http://` or `https://` is a URL, everything
    /// else a filesystem path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// Human-readable origin used in errors and logs.
    pub fn origin(&self) -> String {
        self.to_string()
    }

    /// Returns the raw (still compressed) bytes of the source.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::Path(path) => read_file(path),
            Self::Url(url) => fetch_url(url),
        }
    }

    /// Fetches the source and returns its decompressed text.
    pub fn read_text(&self) -> Result<String> {
        let bytes = self.read_bytes()?;
        decompress_gzip(&bytes, &self.origin())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

impl From<&str> for DataSource {
    fn from(location: &str) -> Self {
        Self::parse(location)
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

fn file_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check a local file against a size limit before loading it.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| file_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    check_file_size_with_limit(path, MAX_SOURCE_FILE_SIZE)?;
    let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read source file");
    Ok(bytes)
}

fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let fetch_error = |source: reqwest::Error| IngestError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("estat/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(fetch_error)?;

    debug!(%url, "fetching source");
    let response = client.get(url).send().map_err(fetch_error)?;

    if !response.status().is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let bytes = response.bytes().map_err(fetch_error)?;
    debug!(%url, bytes = bytes.len(), "fetched source");
    Ok(bytes.to_vec())
}

/// Decompresses a gzip payload into UTF-8 text.
///
/// Concatenated gzip members are decoded in sequence. A leading UTF-8 byte
/// order mark is removed.
pub fn decompress_gzip(bytes: &[u8], origin: &str) -> Result<String> {
    let mut decoder = MultiGzDecoder::new(bytes);
    let mut buffer = Vec::new();
    decoder
        .read_to_end(&mut buffer)
        .map_err(|source| IngestError::Decompress {
            origin: origin.to_string(),
            source,
        })?;

    let text = String::from_utf8(buffer).map_err(|_| IngestError::Encoding {
        origin: origin.to_string(),
    })?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}
