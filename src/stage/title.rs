use super::*;

/// Titles outside this length range are swapped for a lone `<h1>`.
const MIN_DOCUMENT_TITLE_LENGTH: usize = 15;
const MAX_DOCUMENT_TITLE_LENGTH: usize = 150;

/// Picks the article title: a heading inside the selected content, then the
/// cleaned document title, then metadata, then any `<h1>` on the page.
pub(crate) struct TitleStage;

impl Stage for TitleStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let title = context
      .article_fragment()
      .and_then(Self::content_heading)
      .or_else(|| {
        context
          .document()
          .title()
          .map(|title| clean_document_title(&title, context.document()))
          .filter(|title| !title.is_empty())
      })
      .or_else(|| context.metadata().title.clone())
      .or_else(|| Self::first_document_heading(context.document()));

    trace!(title = title.as_deref().unwrap_or_default(), "resolved title");

    context.set_title(title);

    Ok(())
  }
}

impl TitleStage {
  /// First `<h1>` in the article, or an `<h2>` marked up as the headline.
  fn content_heading(fragment: &ArticleFragment) -> Option<String> {
    fragment
      .elements_named(&["h1", "h2"])
      .into_iter()
      .filter(|id| {
        fragment.node(*id).is_some_and(|node| match node.value() {
          Node::Element(element) => {
            element.name() == "h1"
              || [element.attr("class"), element.attr("itemprop")]
                .into_iter()
                .flatten()
                .any(|value| re::TITLE_HINTS.is_match(value))
          }
          _ => false,
        })
      })
      .map(|id| fragment.node_text(id))
      .find(|text| !text.is_empty())
  }

  fn first_document_heading(document: &Document) -> Option<String> {
    document
      .select("h1")
      .ok()?
      .into_iter()
      .map(|id| document.collect_text(id, true))
      .find(|text| !text.is_empty())
  }
}

fn heading_texts(document: &Document, selector: &str) -> Vec<String> {
  document
    .select(selector)
    .unwrap_or_default()
    .into_iter()
    .map(|id| document.collect_text(id, true))
    .collect()
}

/// Strips site names and section breadcrumbs from a `<title>` value.
///
/// `"Article name | Site"` becomes `"Article name"`; when that leaves too few
/// words the part after the first separator is kept instead. Titles with a
/// colon keep the part after it unless a heading repeats the whole title.
/// Results of four words or fewer fall back to the original title, unless
/// only a hierarchical suffix was removed.
fn clean_document_title(
  original: &str,
  document: &Document,
) -> String {
  let original = text::normalize_whitespace(original);

  let mut title = original.clone();

  let mut had_hierarchical_separators = false;

  if let Some(last) = re::TITLE_SEPARATOR_RUN.find_iter(&original).last() {
    had_hierarchical_separators =
      re::TITLE_HIERARCHICAL_SEPARATOR.is_match(&original);

    title = original[..last.start()].to_string();

    if text::word_count(&title) < 3 {
      title = re::TITLE_LEADING_SEPARATOR
        .replace(&original, "")
        .into_owned();
    }
  } else if original.contains(": ") {
    let repeated_by_heading = heading_texts(document, "h1, h2")
      .iter()
      .any(|heading| *heading == original);

    if !repeated_by_heading {
      let after_last = original
        .rfind(':')
        .map_or("", |index| &original[index + 1..]);

      title = after_last.to_string();

      if text::word_count(&title) < 3 {
        title = original
          .find(':')
          .map_or_else(String::new, |index| original[index + 1..].to_string());
      } else if original
        .find(':')
        .is_some_and(|index| text::word_count(&original[..index]) > 5)
      {
        title.clone_from(&original);
      }
    }
  } else {
    let length = original.chars().count();

    if !(MIN_DOCUMENT_TITLE_LENGTH..=MAX_DOCUMENT_TITLE_LENGTH).contains(&length)
    {
      let h1s = heading_texts(document, "h1");

      if let [only] = h1s.as_slice() {
        title.clone_from(only);
      }
    }
  }

  let title = text::normalize_whitespace(&title);

  let word_count = text::word_count(&title);

  let separators_removed = text::word_count(
    &re::TITLE_SEPARATOR_CHARS.replace_all(&original, ""),
  )
  .saturating_sub(1);

  if word_count <= 4
    && (!had_hierarchical_separators || word_count != separators_removed)
  {
    return original;
  }

  title
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  fn clean(title: &str, body: &str) -> String {
    clean_document_title(title, &Document::parse(body))
  }

  fn resolve(
    html: &str,
    fragment: Option<&str>,
    metadata: Metadata,
  ) -> Option<String> {
    let options = ExtractorOptions::default();

    let mut context =
      Context::new(Document::parse(html), &options, Flags::attempts()[0]);

    if let Some(markup) = fragment {
      context.set_article_fragment(ArticleFragment::from_markup(markup));
    }

    context.set_metadata(metadata);

    TitleStage.run(&mut context).unwrap();

    context.into_outcome().title
  }

  #[test]
  fn strips_site_name_suffix() {
    assert_eq!(
      clean("How to plant a winter garden | The Daily Example", ""),
      "How to plant a winter garden"
    );
  }

  #[test]
  fn keeps_text_after_separator_when_prefix_is_short() {
    assert_eq!(
      clean("Example News - Rivers are rising across the valley", ""),
      "Rivers are rising across the valley"
    );
  }

  #[test]
  fn short_results_fall_back_to_original() {
    assert_eq!(clean("Short one | Site", ""), "Short one | Site");
  }

  #[test]
  fn hierarchical_separators_allow_short_results() {
    assert_eq!(
      clean("Garden tips and tricks » Site", ""),
      "Garden tips and tricks"
    );

    assert_eq!(
      clean("Garden tips and tricks | Site", ""),
      "Garden tips and tricks | Site"
    );
  }

  #[test]
  fn keeps_part_after_colon() {
    assert_eq!(
      clean("Site: Everything you need to know about tides", ""),
      "Everything you need to know about tides"
    );
  }

  #[test]
  fn keeps_colon_title_repeated_by_heading() {
    assert_eq!(
      clean(
        "Tides: everything you need to know",
        "<h1>Tides: everything you need to know</h1>"
      ),
      "Tides: everything you need to know"
    );
  }

  #[test]
  fn replaces_short_title_with_lone_heading() {
    assert_eq!(
      clean("Home", "<body><h1>A much more descriptive heading</h1></body>"),
      "A much more descriptive heading"
    );
  }

  #[test]
  fn prefers_heading_in_content() {
    assert_eq!(
      resolve(
        "<head><title>Document title that is long enough</title></head>",
        Some("<h1>Content heading</h1><p>text</p>"),
        Metadata::default(),
      )
      .as_deref(),
      Some("Content heading")
    );
  }

  #[test]
  fn accepts_h2_marked_as_headline() {
    assert_eq!(
      resolve(
        "",
        Some("<h2>Section</h2><h2 class=\"entry-title\">Headline</h2>"),
        Metadata::default(),
      )
      .as_deref(),
      Some("Headline")
    );
  }

  #[test]
  fn falls_back_to_document_title() {
    assert_eq!(
      resolve(
        "<head><title>The document title is used here</title></head>",
        Some("<h2>Subheading</h2>"),
        Metadata::default(),
      )
      .as_deref(),
      Some("The document title is used here")
    );
  }

  #[test]
  fn falls_back_to_metadata_then_page_heading() {
    assert_eq!(
      resolve(
        "<body><h1>Page heading</h1></body>",
        None,
        Metadata {
          title: Some("Meta title".into()),
          ..Metadata::default()
        },
      )
      .as_deref(),
      Some("Meta title")
    );

    assert_eq!(
      resolve("<body><h1>Page heading</h1></body>", None, Metadata::default())
        .as_deref(),
      Some("Page heading")
    );

    assert_eq!(resolve("<body><p>x</p></body>", None, Metadata::default()), None);
  }
}
