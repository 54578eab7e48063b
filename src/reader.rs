use super::*;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads the file at `path` as UTF-8 text with surrounding whitespace removed.
///
/// The whole file is loaded at once. A file that cannot be opened yields
/// [`Error::Read`], one whose bytes are not UTF-8 yields [`Error::Decode`].
pub fn read_html(path: impl AsRef<Path>) -> Result<String> {
  let path = path.as_ref();

  let bytes = fs::read(path).map_err(|source| Error::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let text = String::from_utf8(bytes).map_err(|source| Error::Decode {
    path: path.to_path_buf(),
    source,
  })?;

  trace!(path = %path.display(), bytes = text.len(), "read input");

  Ok(
    text
      .trim_start_matches(BYTE_ORDER_MARK)
      .trim()
      .to_string(),
  )
}
