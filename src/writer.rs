use super::*;

/// Serializes `article` as a single JSON value and writes it to `path`.
///
/// An absent article is written as the literal `null`. Existing files are
/// overwritten.
pub fn write_json(article: Option<&Article>, path: impl AsRef<Path>) -> Result {
  let path = path.as_ref();

  let json = serde_json::to_string(&article)?;

  fs::write(path, json).map_err(|source| Error::Write {
    path: path.to_path_buf(),
    source,
  })?;

  debug!(
    path = %path.display(),
    found = article.is_some(),
    "wrote extraction result"
  );

  Ok(())
}
