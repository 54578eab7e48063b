use super::*;

const CONDITIONAL_TAGS: &[&str] =
  &["form", "fieldset", "table", "ul", "ol", "div", "section"];

const EMBED_TAGS: &[&str] = &["embed", "object", "iframe"];

/// Containers with this many commas are treated as prose and kept.
const COMMA_THRESHOLD: usize = 10;

const MIN_CONTENT_LENGTH: usize = 25;

/// Removes fishy containers from the article fragment: negatively weighted
/// blocks, link farms, image galleries without text and form-heavy chrome.
pub(crate) struct CleanConditionallyStage;

#[derive(Debug, Default)]
struct Counts {
  embeds: usize,
  images: usize,
  inputs: usize,
  list_items: usize,
  paragraphs: usize,
}

impl Stage for CleanConditionallyStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let flags = context.flags();

    if !flags.clean_conditionally {
      return Ok(());
    }

    let link_density_modifier = context.options().link_density_modifier;

    let Some(fragment) = context.article_fragment_mut() else {
      return Ok(());
    };

    let mut removed = 0;

    for node_id in fragment.elements_named(CONDITIONAL_TAGS).into_iter().rev()
    {
      if !fragment.is_attached(node_id) {
        continue;
      }

      if Self::should_remove(fragment, node_id, flags, link_density_modifier) {
        fragment.remove_nodes([node_id]);
        removed += 1;
      }
    }

    trace!(removed, "cleaned containers conditionally");

    Ok(())
  }
}

impl CleanConditionallyStage {
  fn counts(node: NodeRef<'_, Node>) -> Counts {
    node.descendants().skip(1).fold(Counts::default(), |mut counts, node| {
      if let Node::Element(element) = node.value() {
        match element.name() {
          "img" => counts.images += 1,
          "input" => counts.inputs += 1,
          "li" => counts.list_items += 1,
          "p" => counts.paragraphs += 1,
          name if EMBED_TAGS.contains(&name) => counts.embeds += 1,
          _ => {}
        }
      }

      counts
    })
  }

  fn has_ancestor_tag(node: NodeRef<'_, Node>, tag: &str) -> bool {
    node.ancestors().any(|ancestor| {
      matches!(ancestor.value(), Node::Element(el) if el.name() == tag)
    })
  }

  /// Tables with headers or a caption hold data rather than layout.
  fn is_data_table(node: NodeRef<'_, Node>) -> bool {
    let Node::Element(element) = node.value() else {
      return false;
    };

    if element.name() != "table" || element.attr("role") == Some("presentation")
    {
      return false;
    }

    element.attr("summary").is_some()
      || node.descendants().any(|descendant| {
        matches!(
          descendant.value(),
          Node::Element(el) if matches!(el.name(), "th" | "caption" | "thead")
        )
      })
  }

  fn should_remove(
    fragment: &ArticleFragment,
    node_id: NodeId,
    flags: Flags,
    link_density_modifier: f64,
  ) -> bool {
    let Some(node) = fragment.node(node_id) else {
      return false;
    };

    let Node::Element(element) = node.value() else {
      return false;
    };

    if Self::is_data_table(node)
      || node.ancestors().any(Self::is_data_table)
      || Self::has_ancestor_tag(node, "code")
    {
      return false;
    }

    let weight = if flags.weight_classes {
      class_weight(element)
    } else {
      0.0
    };

    if weight < 0.0 {
      return true;
    }

    let text = fragment.node_text(node_id);

    if re::COMMA_VARIANTS.find_iter(&text).count() >= COMMA_THRESHOLD {
      return false;
    }

    let is_list = matches!(element.name(), "ul" | "ol");

    let in_figure = Self::has_ancestor_tag(node, "figure");

    let counts = Self::counts(node);

    let content_length = text.chars().count();

    let link_density = fragment.link_density(node_id);

    (counts.images > 1
      && (counts.paragraphs as f64 / counts.images as f64) < 0.5
      && !in_figure)
      || (!is_list && counts.list_items > counts.paragraphs + 100)
      || counts.inputs > counts.paragraphs / 3
      || (!is_list
        && content_length < MIN_CONTENT_LENGTH
        && (counts.images == 0 || counts.images > 2)
        && !in_figure)
      || (!is_list
        && weight < 25.0
        && link_density > 0.2 + link_density_modifier)
      || (weight >= 25.0 && link_density > 0.5 + link_density_modifier)
      || (counts.embeds == 1 && content_length < 75)
      || counts.embeds > 1
  }
}
