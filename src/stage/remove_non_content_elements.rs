use super::*;

/// Removes interactive controls and embedded boilerplate from the article.
pub(crate) struct RemoveNonContentElementsStage;

impl Stage for RemoveNonContentElementsStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let Some(fragment) = context.article_fragment_mut() else {
      return Ok(());
    };

    let nodes = fragment.elements_named(Self::TAGS_TO_REMOVE);

    trace!(count = nodes.len(), "removing non-content elements");

    fragment.remove_nodes(nodes);

    Ok(())
  }
}

impl RemoveNonContentElementsStage {
  const TAGS_TO_REMOVE: &'static [&'static str] = &[
    "aside", "button", "embed", "fieldset", "footer", "form", "iframe",
    "input", "link", "object", "select", "textarea",
  ];
}
