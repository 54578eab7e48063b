use super::*;

const DISALLOWED_SELECTOR: &str = "script, style, noscript, template, nav";

/// Drops markup that never carries readable content, along with comments.
pub(crate) struct RemoveDisallowedNodesStage;

impl Stage for RemoveDisallowedNodesStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let document = context.document_mut();

    let mut to_remove = document.select(DISALLOWED_SELECTOR)?;

    to_remove.extend(
      document
        .root()
        .descendants()
        .filter(|node| node.value().is_comment())
        .map(|node| node.id()),
    );

    trace!(count = to_remove.len(), "removing disallowed nodes");

    document.remove_nodes(to_remove);

    Ok(())
  }
}
