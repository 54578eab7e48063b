use super::*;

const UNLIKELY_ROLES: &[&str] = &[
  "menu",
  "menubar",
  "complementary",
  "navigation",
  "alert",
  "alertdialog",
  "dialog",
];

/// Removes page chrome before scoring. Chrome detection only runs while the
/// strip-unlikely flag is set; empty containers are always dropped.
pub(crate) struct RemoveUnlikelyCandidatesStage;

impl Stage for RemoveUnlikelyCandidatesStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let strip_unlikely = context.flags().strip_unlikely;

    let document = context.document_mut();

    let to_remove = Self::collect(document, strip_unlikely);

    trace!(
      count = to_remove.len(),
      strip_unlikely,
      "removing unlikely candidates"
    );

    document.remove_nodes(to_remove);

    Ok(())
  }
}

impl RemoveUnlikelyCandidatesStage {
  fn collect(document: &Document, strip_unlikely: bool) -> Vec<NodeId> {
    let Some(body) = document.body_element() else {
      return Vec::new();
    };

    let mut to_remove = Vec::new();

    for node in body.descendants().skip(1) {
      let Node::Element(element) = node.value() else {
        continue;
      };

      if element.name() == "a" {
        continue;
      }

      if strip_unlikely && Self::is_unlikely(node, element) {
        to_remove.push(node.id());
        continue;
      }

      if Self::is_empty_container(node) {
        to_remove.push(node.id());
      }
    }

    to_remove
  }

  fn has_ancestor_tag(node: NodeRef<'_, Node>, tags: &[&str]) -> bool {
    node.ancestors().any(|ancestor| {
      matches!(ancestor.value(), Node::Element(el) if tags.contains(&el.name()))
    })
  }

  fn is_empty_container(node: NodeRef<'_, Node>) -> bool {
    let Node::Element(element) = node.value() else {
      return false;
    };

    if !matches!(
      element.name(),
      "div" | "section" | "header" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    ) {
      return false;
    }

    node.children().all(|child| match child.value() {
      Node::Text(text) => text.trim().is_empty(),
      Node::Element(child) => matches!(child.name(), "br" | "hr"),
      _ => true,
    })
  }

  fn is_unlikely(
    node: NodeRef<'_, Node>,
    element: &scraper::node::Element,
  ) -> bool {
    if element
      .attr("role")
      .is_some_and(|role| UNLIKELY_ROLES.contains(&role))
    {
      return true;
    }

    let match_string = class_and_id(element);

    !match_string.is_empty()
      && re::UNLIKELY_CONTENT_CANDIDATES.is_match(&match_string)
      && !re::POSSIBLE_CONTENT_CANDIDATE.is_match(&match_string)
      && !Self::has_ancestor_tag(node, &["table", "code"])
  }
}
