use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON input")]
    Json(#[from] serde_json::Error),

    #[error("invalid PBF input")]
    Pbf(#[from] osmpbfreader::Error),

    #[error("cannot infer the input format of {}", .0.display())]
    UnknownFormat(PathBuf),
}
