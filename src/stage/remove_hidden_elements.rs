use super::*;

/// Removes elements the page never shows to a reader.
pub(crate) struct RemoveHiddenElementsStage;

impl Stage for RemoveHiddenElementsStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let document = context.document_mut();

    let to_remove = document
      .root()
      .descendants()
      .filter(|node| match node.value() {
        Node::Element(element) => {
          !matches!(element.name(), "html" | "body") && Self::is_hidden(element)
        }
        _ => false,
      })
      .map(|node| node.id())
      .collect::<Vec<_>>();

    trace!(count = to_remove.len(), "removing hidden elements");

    document.remove_nodes(to_remove);

    Ok(())
  }
}

impl RemoveHiddenElementsStage {
  fn is_hidden(element: &scraper::node::Element) -> bool {
    element.attr("hidden").is_some()
      || element
        .attr("aria-hidden")
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
      || element
        .attr("style")
        .is_some_and(|style| re::HIDDEN_STYLE.is_match(style))
  }
}
