use std::{io, path::PathBuf};

use thiserror::Error;

use crate::nam::NamError;

/// The only way a resolver query can fail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("cannot resolve an empty codepoint sequence")]
    InvalidInput,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read path '{path}': '{inner}'")]
    Load { path: PathBuf, inner: io::Error },
    #[error("could not create file '{path}': '{inner}'")]
    FileWrite { path: PathBuf, inner: io::Error },
    #[error("write error: '{0}'")]
    Write(#[from] io::Error),
    #[error("invalid table '{path}': {inner}")]
    Nam { path: PathBuf, inner: NamError },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
