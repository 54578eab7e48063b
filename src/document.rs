use super::*;

/// A parsed HTML document.
///
/// Parsing follows the HTML5 tree construction rules, so malformed markup is
/// repaired rather than rejected: unclosed tags are closed, stray text is
/// moved into `<body>` and unknown attributes are kept as-is. The document
/// owns every node; parent links are lookups into the same tree.
#[derive(Debug, Clone)]
pub struct Document {
  html: Html,
}

impl Document {
  pub(crate) fn body_element(&self) -> Option<NodeRef<'_, Node>> {
    self.child_element(self.html_element()?, "body")
  }

  fn child_element<'a>(
    &self,
    parent: NodeRef<'a, Node>,
    name: &str,
  ) -> Option<NodeRef<'a, Node>> {
    parent.children().find(
      |child| matches!(child.value(), Node::Element(el) if el.name() == name),
    )
  }

  /// Text of every descendant text node, optionally whitespace-normalized.
  pub(crate) fn collect_text(
    &self,
    node_id: NodeId,
    normalize: bool,
  ) -> String {
    let Some(node) = self.node(node_id) else {
      return String::new();
    };

    let text = text::node_text(node);

    if normalize {
      text::normalize_whitespace(&text)
    } else {
      text.trim().to_string()
    }
  }

  /// Number of element nodes in the document.
  #[must_use]
  pub fn element_count(&self) -> usize {
    self
      .root()
      .descendants()
      .filter(|node| node.value().is_element())
      .count()
  }

  pub(crate) fn head_element(&self) -> Option<NodeRef<'_, Node>> {
    self.child_element(self.html_element()?, "head")
  }

  pub(crate) fn html_element(&self) -> Option<NodeRef<'_, Node>> {
    self.child_element(self.root(), "html")
  }

  /// Share of an element's text that sits inside links.
  pub(crate) fn link_density(&self, node_id: NodeId) -> f64 {
    self.node(node_id).map_or(0.0, text::link_density)
  }

  pub(crate) fn node(&self, node_id: NodeId) -> Option<NodeRef<'_, Node>> {
    self.html.tree.get(node_id)
  }

  /// Parses `html` into a document. Never fails: any text is a document.
  #[must_use]
  pub fn parse(html: &str) -> Self {
    Self {
      html: Html::parse_document(html),
    }
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

  pub(crate) fn root(&self) -> NodeRef<'_, Node> {
    self.html.tree.root()
  }

  pub(crate) fn select(&self, selector: &str) -> Result<Vec<NodeId>> {
    let selector = Selector::parse(selector)
      .map_err(|error| Error::InvalidSelector(error.to_string()))?;

    Ok(
      self
        .html
        .select(&selector)
        .map(|element| element.id())
        .collect(),
    )
  }

  /// Whitespace-normalized text of the `<title>` element, if non-empty.
  #[must_use]
  pub fn title(&self) -> Option<String> {
    let head = self.head_element()?;

    let title = self.child_element(head, "title").or_else(|| {
      head
        .descendants()
        .find(|node| matches!(node.value(), Node::Element(el) if el.name() == "title"))
    })?;

    Some(self.collect_text(title.id(), true)).filter(|title| !title.is_empty())
  }
}

impl From<&str> for Document {
  fn from(html: &str) -> Self {
    Self::parse(html)
  }
}
