use super::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("`{}` is not valid UTF-8 text", path.display())]
  Decode {
    path: PathBuf,
    source: std::string::FromUtf8Error,
  },
  #[error("aborting parsing document; {found} elements found (limit: {limit})")]
  ElementLimitExceeded { found: usize, limit: usize },
  #[error("invalid selector: {0}")]
  InvalidSelector(String),
  #[error("failed to read `{}`", path.display())]
  Read { path: PathBuf, source: io::Error },
  #[error("failed to serialize article")]
  Serialize {
    #[from]
    source: serde_json::Error,
  },
  #[error("failed to write `{}`", path.display())]
  Write { path: PathBuf, source: io::Error },
}
