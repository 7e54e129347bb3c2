use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("element {id}: unsupported element type {element_type:?}")]
    UnsupportedElementType { id: i64, element_type: String },

    #[error("element {id}: malformed geometry: {detail}")]
    MalformedGeometry { id: i64, detail: String },

    #[error("element {id}: degenerate ring with {num_points} point(s)")]
    DegenerateRing { id: i64, num_points: usize },

    #[error("remote query timed out after {seconds}s: {url}")]
    RemoteQueryTimeout { url: String, seconds: u64 },

    #[error("output directory already exists: {}", .0.display())]
    OutputDirectoryExists(PathBuf),

    #[error("no matching area found for {0:?}")]
    AreaNotFound(String),

    #[error("source layer is not in a geographic WGS84 crs: {}", .0.display())]
    UnsupportedCrs(PathBuf),

    #[error("unexpected response: {0}")]
    BadResponse(String),

    #[error("invalid attribute field name {0:?}")]
    InvalidFieldName(String),

    #[error(transparent)]
    Http(Box<ureq::Error>),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Shapefile(#[from] shapefile::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Error {
        Error::Http(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
