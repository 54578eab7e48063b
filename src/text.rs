use super::*;

const REPLACEMENT_CHAR: char = '\u{FFFD}';
const REPLACEMENT_CODEPOINT: u32 = 0xFFFD;

/// Collapses every whitespace run to a single space and trims the result.
pub(crate) fn normalize_whitespace(input: &str) -> String {
  re::WHITESPACE.replace_all(input, " ").trim().to_string()
}

pub(crate) fn word_count(input: &str) -> usize {
  input.split_whitespace().count()
}

/// Raw concatenation of every text node below `node`.
pub(crate) fn node_text(node: NodeRef<'_, Node>) -> String {
  node
    .descendants()
    .filter_map(|descendant| match descendant.value() {
      Node::Text(value) => Some(&**value),
      _ => None,
    })
    .collect()
}

/// Share of a node's text that sits inside links, with same-page anchors
/// weighted down.
pub(crate) fn link_density(node: NodeRef<'_, Node>) -> f64 {
  let text_length = normalize_whitespace(&node_text(node)).len();

  if text_length == 0 {
    return 0.0;
  }

  let link_length = node
    .descendants()
    .filter_map(ElementRef::wrap)
    .filter(|element| element.value().name() == "a")
    .map(|element| {
      let href = element.value().attr("href").unwrap_or_default();

      let weight = if re::FRAGMENT_URL.is_match(href) {
        0.3
      } else {
        1.0
      };

      normalize_whitespace(&node_text(*element)).len() as f64 * weight
    })
    .sum::<f64>();

  link_length / text_length as f64
}

/// Decodes the handful of entities that survive in attribute values taken
/// verbatim from metadata.
pub(crate) fn decode_html_entities(input: &str) -> String {
  if !input.contains('&') {
    return input.to_string();
  }

  let named_decoded = re::NAMED_HTML_ENTITIES.replace_all(
    input,
    |captures: &regex::Captures<'_>| -> String {
      match &captures["name"] {
        "quot" => "\"".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        _ => captures
          .get(0)
          .map_or(String::new(), |m| m.as_str().to_string()),
      }
    },
  );

  re::NUMERIC_HTML_ENTITY
    .replace_all(&named_decoded, |captures: &regex::Captures<'_>| {
      let (value, radix) = if let Some(hex) = captures.get(1) {
        (hex.as_str(), 16)
      } else if let Some(num) = captures.get(2) {
        (num.as_str(), 10)
      } else {
        return captures.get(0).map_or(String::new(), |m| m.as_str().into());
      };

      let parsed =
        u32::from_str_radix(value, radix).unwrap_or(REPLACEMENT_CODEPOINT);

      decode_numeric_codepoint(parsed).to_string()
    })
    .into_owned()
}

fn decode_numeric_codepoint(value: u32) -> char {
  const SURROGATE_START: u32 = 0xD800;
  const SURROGATE_END: u32 = 0xDFFF;
  const MAX_CODEPOINT: u32 = 0x0010_FFFF;

  if value == 0
    || value > MAX_CODEPOINT
    || (SURROGATE_START..=SURROGATE_END).contains(&value)
  {
    REPLACEMENT_CHAR
  } else {
    char::from_u32(value).unwrap_or(REPLACEMENT_CHAR)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalizes_mixed_whitespace() {
    assert_eq!(
      normalize_whitespace("\n  Hello,\t\tworld \u{a0} again  "),
      "Hello, world again"
    );
  }

  #[test]
  fn decodes_named_and_numeric_entities() {
    assert_eq!(
      decode_html_entities("Tom &amp; Jerry &#8211; &#x27;Pilot&#x27;"),
      "Tom & Jerry – 'Pilot'"
    );
  }

  #[test]
  fn invalid_codepoints_become_replacement_characters() {
    assert_eq!(decode_html_entities("&#0;&#xD800;"), "\u{FFFD}\u{FFFD}");
  }

  #[test]
  fn counts_words() {
    assert_eq!(word_count("  one two\nthree "), 3);
    assert_eq!(word_count(""), 0);
  }
}
