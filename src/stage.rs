use super::*;

mod article;
mod clean_class_attributes;
mod clean_conditionally;
mod element_limit;
mod language;
mod metadata;
mod normalize_article_headings;
mod remove_disallowed_nodes;
mod remove_hidden_elements;
mod remove_non_content_elements;
mod remove_unlikely_candidates;
mod strip_presentational_attributes;
mod title;

pub(crate) use {
  article::ArticleStage, clean_class_attributes::CleanClassAttributesStage,
  clean_conditionally::CleanConditionallyStage,
  element_limit::ElementLimitStage, language::LanguageStage,
  metadata::MetadataStage,
  normalize_article_headings::NormalizeArticleHeadingsStage,
  remove_disallowed_nodes::RemoveDisallowedNodesStage,
  remove_hidden_elements::RemoveHiddenElementsStage,
  remove_non_content_elements::RemoveNonContentElementsStage,
  remove_unlikely_candidates::RemoveUnlikelyCandidatesStage,
  strip_presentational_attributes::StripPresentationalAttributesStage,
  title::TitleStage,
};

pub(crate) trait Stage {
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
      .rsplit("::")
      .next()
      .unwrap_or("stage")
  }

  fn run(&mut self, context: &mut Context<'_>) -> Result;
}

/// Class and id of an element joined into one string for hint matching.
pub(crate) fn class_and_id(element: &scraper::node::Element) -> String {
  [element.attr("class"), element.attr("id")]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
    .trim()
    .to_string()
}

/// Positive or negative weight from an element's class and id hints.
pub(crate) fn class_weight(element: &scraper::node::Element) -> f64 {
  let mut weight = 0.0;

  for value in [element.attr("class"), element.attr("id")]
    .into_iter()
    .flatten()
  {
    if re::NEGATIVE_CONTENT_HINTS.is_match(value) {
      weight -= 25.0;
    }

    if re::POSITIVE_CONTENT_HINTS.is_match(value) {
      weight += 25.0;
    }
  }

  weight
}

#[cfg(test)]
pub(crate) fn run_stage(
  stage: &mut impl Stage,
  html: &str,
  flags: Flags,
) -> (Document, Option<ArticleFragment>, Metadata) {
  let options = ExtractorOptions::default();

  let mut context = Context::new(Document::parse(html), &options, flags);

  stage.run(&mut context).unwrap();

  let document = context.document().clone();

  let outcome = context.into_outcome();

  (document, outcome.fragment, outcome.metadata)
}

#[cfg(test)]
pub(crate) fn run_fragment_stage(
  stage: &mut impl Stage,
  markup: &str,
  options: &ExtractorOptions,
  flags: Flags,
) -> ArticleFragment {
  let mut context = Context::new(Document::parse(""), options, flags);

  context.set_article_fragment(ArticleFragment::from_markup(markup));

  stage.run(&mut context).unwrap();

  context
    .into_outcome()
    .fragment
    .expect("fragment survives the stage")
}
