use super::*;

/// Removes inline presentational attributes from the extracted article.
pub(crate) struct StripPresentationalAttributesStage;

impl Stage for StripPresentationalAttributesStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let Some(fragment) = context.article_fragment_mut() else {
      return Ok(());
    };

    Self::strip_attributes(fragment);

    Ok(())
  }
}

impl StripPresentationalAttributesStage {
  const PRESENTATIONAL_ATTRIBUTES: &'static [&'static str] = &[
    "align",
    "background",
    "bgcolor",
    "border",
    "cellpadding",
    "cellspacing",
    "frame",
    "hspace",
    "rules",
    "style",
    "valign",
    "vspace",
  ];

  const SIZE_ATTRIBUTE_ELEMENTS: &'static [&'static str] =
    &["table", "th", "td", "hr", "pre"];

  fn strip_attributes(fragment: &mut ArticleFragment) {
    fragment.edit_elements(|element| {
      let strip_size = Self::SIZE_ATTRIBUTE_ELEMENTS.contains(&element.name());

      element.attrs.retain(|(name, _)| {
        let name = name.local.as_ref();

        !Self::PRESENTATIONAL_ATTRIBUTES.contains(&name)
          && !(strip_size && matches!(name, "width" | "height"))
      });
    });
  }
}
