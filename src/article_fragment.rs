use super::*;

const WRAPPER_CLASS: &str = "page";
const WRAPPER_ID: &str = "readability-page-1";

/// The selected article markup, parsed into its own tree for cleanup.
#[derive(Debug)]
pub(crate) struct ArticleFragment {
  pub(crate) html: Html,
  pub(crate) root_id: NodeId,
}

impl ArticleFragment {
  /// Applies `edit` to each element below the wrapper root.
  pub(crate) fn edit_elements(
    &mut self,
    mut edit: impl FnMut(&mut scraper::node::Element),
  ) {
    for node_id in self.element_ids() {
      if let Some(mut node) = self.html.tree.get_mut(node_id)
        && let Node::Element(element) = node.value()
      {
        edit(element);
      }
    }
  }

  /// Ids of the elements below the wrapper root, in document order.
  pub(crate) fn element_ids(&self) -> Vec<NodeId> {
    self
      .root()
      .map(|root| {
        root
          .descendants()
          .skip(1)
          .filter(|node| node.value().is_element())
          .map(|node| node.id())
          .collect()
      })
      .unwrap_or_default()
  }

  /// Ids of the elements below the wrapper root named one of `names`.
  pub(crate) fn elements_named(&self, names: &[&str]) -> Vec<NodeId> {
    self
      .element_ids()
      .into_iter()
      .filter(|id| {
        self.node(*id).is_some_and(|node| {
          matches!(
            node.value(),
            Node::Element(el) if names.contains(&el.name())
          )
        })
      })
      .collect()
  }

  pub(crate) fn from_markup(markup: &str) -> Self {
    let wrapped = format!(
      "<div id=\"{WRAPPER_ID}\" class=\"{WRAPPER_CLASS}\">{markup}</div>"
    );

    let html = Html::parse_fragment(&wrapped);

    let root_id = html
      .tree
      .root()
      .descendants()
      .find(|node| {
        matches!(
          node.value(),
          Node::Element(element) if element.id() == Some(WRAPPER_ID)
        )
      })
      .map_or_else(|| html.tree.root().id(), |node| node.id());

    Self { html, root_id }
  }

  /// Whether `node_id` is still reachable from the wrapper root.
  pub(crate) fn is_attached(&self, node_id: NodeId) -> bool {
    self.node(node_id).is_some_and(|node| {
      node.ancestors().any(|ancestor| ancestor.id() == self.root_id)
    })
  }

  pub(crate) fn markup(&self) -> String {
    let inner = self
      .root()
      .and_then(ElementRef::wrap)
      .map(|root| root.inner_html())
      .unwrap_or_default();

    format!("<div id=\"{WRAPPER_ID}\" class=\"{WRAPPER_CLASS}\">{inner}</div>")
  }

  /// Share of a node's text that sits inside links.
  pub(crate) fn link_density(&self, node_id: NodeId) -> f64 {
    self.node(node_id).map_or(0.0, text::link_density)
  }

  pub(crate) fn node(&self, node_id: NodeId) -> Option<NodeRef<'_, Node>> {
    self.html.tree.get(node_id)
  }

  /// Whitespace-normalized text below `node_id`.
  pub(crate) fn node_text(&self, node_id: NodeId) -> String {
    self
      .node(node_id)
      .map(|node| text::normalize_whitespace(&text::node_text(node)))
      .unwrap_or_default()
  }

  pub(crate) fn remove_nodes(
    &mut self,
    node_ids: impl IntoIterator<Item = NodeId>,
  ) {
    for node_id in node_ids {
      if let Some(mut node) = self.html.tree.get_mut(node_id) {
        node.detach();
      }
    }
  }

  pub(crate) fn root(&self) -> Option<NodeRef<'_, Node>> {
    self.node(self.root_id)
  }

  /// Concatenated text of every retained text node, whitespace-normalized.
  pub(crate) fn text_content(&self) -> String {
    self.node_text(self.root_id)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  #[test]
  fn wraps_markup_in_page_container() {
    let fragment = ArticleFragment::from_markup("<p>Hello <b>world</b></p>");

    assert_eq!(
      fragment.markup(),
      "<div id=\"readability-page-1\" class=\"page\"><p>Hello <b>world</b></p></div>"
    );
  }

  #[test]
  fn text_content_concatenates_and_normalizes() {
    let fragment =
      ArticleFragment::from_markup("<p>  One\n two </p>\n<p>three</p>");

    assert_eq!(fragment.text_content(), "One two three");
  }

  #[test]
  fn detached_nodes_are_not_attached() {
    let mut fragment =
      ArticleFragment::from_markup("<div><p id=inner>x</p></div><p>y</p>");

    let divs = fragment.elements_named(&["div"]);

    let inner = fragment.elements_named(&["p"])[0];

    fragment.remove_nodes(divs);

    assert!(!fragment.is_attached(inner));
    assert_eq!(fragment.text_content(), "y");
  }

  #[test]
  fn edit_elements_skips_the_wrapper() {
    let mut fragment =
      ArticleFragment::from_markup("<p>One</p><p><em>Two</em></p>");

    let mut names = Vec::new();

    fragment.edit_elements(|element| {
      names.push(element.name().to_string());
      element.attrs.clear();
    });

    assert_eq!(names, ["p", "p", "em"]);
    assert!(fragment.markup().starts_with("<div id=\"readability-page-1\""));
  }
}
