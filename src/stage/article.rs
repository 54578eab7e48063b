use super::*;

const DEFAULT_TAGS_TO_SCORE: &[&str] =
  &["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"];

/// Containers scored like paragraphs when they hold only phrasing content.
const PARAGRAPH_LIKE_TAGS: &[&str] = &["div", "article", "section"];

const PHRASING_TAGS: &[&str] = &[
  "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em",
  "font", "i", "img", "kbd", "mark", "q", "s", "samp", "small", "span",
  "strike", "strong", "sub", "sup", "time", "u", "var", "wbr",
];

/// Minimum amount of trimmed text a node must contain to be scored.
const MIN_TEXT_LENGTH: usize = 25;

/// Ratio of the top candidate score used to decide if a sibling is included.
const SIBLING_SCORE_RATIO: f64 = 0.2;

/// Absolute sibling score floor to prevent including very weak candidates.
const MIN_SIBLING_SCORE: f64 = 10.0;

/// Minimum number of strong candidates that must agree on an ancestor.
const MINIMUM_TOP_CANDIDATE_SUPPORT: usize = 3;

/// Score ratio threshold when considering alternative top candidates.
const TOP_CANDIDATE_SCORE_RATIO: f64 = 0.75;

/// Additional score bonus for siblings sharing the top candidate's class.
const CLASS_BONUS_RATIO: f64 = 0.2;

/// Maximum depth when propagating scores to ancestor nodes.
const MAX_PARENT_DEPTH: usize = 5;

struct ArticleContent {
  /// Language code taken from the document's `<body lang>` attribute.
  body_lang: Option<String>,
  /// Text direction derived from the article container hierarchy.
  dir: Option<String>,
  /// HTML fragment representing the primary article content.
  fragment: ArticleFragment,
}

#[derive(Debug, Clone)]
struct Candidate {
  /// Identifier of the DOM node that produced the score.
  node: NodeId,
  /// Aggregated readability score for the candidate node.
  score: f64,
}

/// Selects the best scoring container and its related siblings as the
/// article fragment. Leaves the fragment unset when nothing scores.
pub(crate) struct ArticleStage;

impl Stage for ArticleStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let Some(ArticleContent {
      body_lang,
      dir,
      fragment,
    }) = Self::extract(
      context.document(),
      context.flags(),
      context.options().nb_top_candidates,
    )
    else {
      debug!("no element reached the scoring threshold");
      return Ok(());
    };

    context.set_body_lang(body_lang);
    context.set_article_dir(dir);

    if context.metadata().excerpt.is_none() {
      let excerpt = Self::first_paragraph_text(&fragment);

      if excerpt.is_some() {
        context.set_metadata(Metadata {
          excerpt,
          ..context.metadata().clone()
        });
      }
    }

    context.set_article_fragment(fragment);

    Ok(())
  }
}

impl ArticleStage {
  /// Assigns a readability score to a candidate element based on length and
  /// punctuation density heuristics.
  fn calculate_element_score(
    document: &Document,
    element: ElementRef<'_>,
  ) -> Option<f64> {
    let text = document.collect_text(element.id(), true);

    let length = text.chars().count();

    if length < MIN_TEXT_LENGTH {
      return None;
    }

    let comma_count = f64::from(
      u32::try_from(re::COMMA_VARIANTS.find_iter(&text).count())
        .unwrap_or(u32::MAX),
    );

    let length_bonus =
      f64::from(u32::try_from((length / 100).min(3)).unwrap_or(3));

    Some(1.0 + comma_count + length_bonus)
  }

  /// Assembles the HTML representing the main article by merging the top
  /// candidate with qualifying sibling elements.
  fn collect_article_parts(
    document: &Document,
    top_candidate: NodeId,
    candidates: &HashMap<NodeId, Candidate>,
    top_score: f64,
    top_class: Option<&str>,
  ) -> Option<String> {
    let top_node = document.node(top_candidate)?;

    let top_element = ElementRef::wrap(top_node)?;

    if top_element.value().name() == "body" {
      return Some(top_element.inner_html());
    }

    let threshold = (top_score * SIBLING_SCORE_RATIO).max(MIN_SIBLING_SCORE);

    let parts = top_node
      .parent()
      .map(|parent| {
        parent
          .children()
          .filter_map(ElementRef::wrap)
          .filter(|sibling| {
            Self::should_include_sibling(
              document,
              *sibling,
              top_candidate,
              candidates,
              threshold,
              top_score,
              top_class,
            )
          })
          .map(|sibling| sibling.html())
          .collect::<String>()
      })
      .unwrap_or_else(|| top_element.html());

    if parts.trim().is_empty() {
      None
    } else {
      Some(parts)
    }
  }

  /// Extracts the highest scoring article fragment and its surrounding
  /// attributes from the provided document.
  fn extract(
    document: &Document,
    flags: Flags,
    nb_top_candidates: usize,
  ) -> Option<ArticleContent> {
    let body = document.body_element()?;

    let candidates = Self::score_candidates(document, body.id(), flags);

    let top_candidates =
      Self::top_candidates(body, &candidates, nb_top_candidates);

    let first_candidate = top_candidates.first().copied()?;

    let mut top_candidate = Self::select_top_candidate(
      document,
      &candidates,
      &top_candidates,
      body.id(),
    )
    .unwrap_or(first_candidate);

    top_candidate = Self::promote_single_child_parent(document, top_candidate);

    let top_candidate_score = candidates
      .get(&top_candidate)
      .map_or(0.0, |candidate| candidate.score);

    let top_candidate_class = document
      .node(top_candidate)
      .and_then(ElementRef::wrap)
      .and_then(|el| el.value().attr("class"))
      .map(str::to_string);

    debug!(
      candidates = candidates.len(),
      score = top_candidate_score,
      class = top_candidate_class.as_deref().unwrap_or_default(),
      "selected top candidate"
    );

    let article_html = Self::collect_article_parts(
      document,
      top_candidate,
      &candidates,
      top_candidate_score,
      top_candidate_class.as_deref(),
    )?;

    Some(ArticleContent {
      body_lang: Self::extract_body_lang(body),
      dir: Self::find_article_dir(document, top_candidate),
      fragment: ArticleFragment::from_markup(&article_html),
    })
  }

  /// Reads the language specified on the `<body>` element, if any.
  fn extract_body_lang(body: NodeRef<'_, Node>) -> Option<String> {
    ElementRef::wrap(body)
      .and_then(|el| el.value().attr("lang"))
      .map(str::trim)
      .filter(|lang| !lang.is_empty())
      .map(str::to_string)
  }

  /// Walks the candidate's parent, the candidate itself and then the
  /// remaining ancestors looking for a `dir` attribute.
  fn find_article_dir(document: &Document, node_id: NodeId) -> Option<String> {
    let node = document.node(node_id)?;

    let Some(parent) = node.parent() else {
      return Self::node_dir(node);
    };

    [parent, node]
      .into_iter()
      .chain(parent.ancestors())
      .find_map(Self::node_dir)
  }

  fn first_paragraph_text(fragment: &ArticleFragment) -> Option<String> {
    fragment
      .elements_named(&["p"])
      .into_iter()
      .map(|id| fragment.node_text(id))
      .find(|text| !text.is_empty())
  }

  fn initial_score(document: &Document, node_id: NodeId, flags: Flags) -> f64 {
    document
      .node(node_id)
      .and_then(ElementRef::wrap)
      .map_or(0.0, |element| {
        let weight = if flags.weight_classes {
          class_weight(element.value())
        } else {
          0.0
        };

        Self::node_base_score(element) + weight
      })
  }

  fn is_body_node(node: &Node) -> bool {
    matches!(node, Node::Element(element) if element.name() == "body")
  }

  /// Whether an element holds only text and inline markup.
  fn is_phrasing_container(element: ElementRef<'_>) -> bool {
    element.children().all(|child| match child.value() {
      Node::Element(child) => PHRASING_TAGS.contains(&child.name()),
      _ => true,
    })
  }

  fn is_scorable(element: ElementRef<'_>) -> bool {
    let name = element.value().name();

    DEFAULT_TAGS_TO_SCORE.contains(&name)
      || (PARAGRAPH_LIKE_TAGS.contains(&name)
        && Self::is_phrasing_container(element))
  }

  /// Checks whether a paragraph contains enough natural language text and low
  /// link density to be incorporated into the article.
  fn is_valid_paragraph(document: &Document, node_id: NodeId) -> bool {
    let (text, link_density) = (
      document.collect_text(node_id, true),
      document.link_density(node_id),
    );

    let len = text.chars().count();

    (len > 80 && link_density < 0.25)
      || (len > 0
        && len < 80
        && link_density == 0.0
        && (text.ends_with('.') || text.contains(". ")))
  }

  fn node_ancestors(document: &Document, node_id: NodeId) -> Vec<NodeId> {
    document
      .node(node_id)
      .map(|node| node.ancestors().map(|ancestor| ancestor.id()).collect())
      .unwrap_or_default()
  }

  fn node_base_score(element: ElementRef<'_>) -> f64 {
    match element.value().name() {
      "div" => 5.0,
      "pre" | "td" | "blockquote" => 3.0,
      "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
      "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
      _ => 0.0,
    }
  }

  fn node_dir(node: NodeRef<'_, Node>) -> Option<String> {
    match node.value() {
      Node::Element(element) => element.attr("dir").map(str::to_string),
      _ => None,
    }
  }

  /// Promotes a candidate node to its parent when it is the only element child.
  fn promote_single_child_parent(
    document: &Document,
    mut node_id: NodeId,
  ) -> NodeId {
    loop {
      let Some(node) = document.node(node_id) else {
        break;
      };

      let Some(parent) = node.parent() else {
        break;
      };

      let Node::Element(element) = parent.value() else {
        break;
      };

      if matches!(element.name(), "body" | "html") {
        break;
      }

      let element_children = parent
        .children()
        .filter(|child| child.value().is_element())
        .count();

      if element_children == 1 {
        node_id = parent.id();
      } else {
        break;
      }
    }

    node_id
  }

  /// Generates weighted score contributions for the element ancestors of a
  /// scored node, stopping below `<html>`.
  fn propagate_score_to_parents<'a>(
    node: &'a NodeRef<'a, Node>,
    score: f64,
  ) -> impl Iterator<Item = (NodeId, f64)> + 'a {
    node
      .ancestors()
      .take_while(|ancestor| {
        matches!(ancestor.value(), Node::Element(el) if el.name() != "html")
      })
      .take(MAX_PARENT_DEPTH)
      .enumerate()
      .map(move |(level, parent)| {
        let divider = match level {
          0 => 1.0,
          1 => 2.0,
          _ => f64::from(u32::try_from(level).unwrap_or(u32::MAX)) * 3.0,
        };

        (parent.id(), score / divider)
      })
  }

  /// Computes readability scores for nodes in the `<body>` subtree.
  fn score_candidates(
    document: &Document,
    body_id: NodeId,
    flags: Flags,
  ) -> HashMap<NodeId, Candidate> {
    let Some(body) = document.node(body_id) else {
      return HashMap::new();
    };

    let mut candidates = body
      .descendants()
      .filter_map(ElementRef::wrap)
      .filter(|el| Self::is_scorable(*el))
      .filter_map(|el| {
        Self::calculate_element_score(document, el).map(|score| (el, score))
      })
      .flat_map(|(el, score)| {
        Self::propagate_score_to_parents(&el, score).collect::<Vec<_>>()
      })
      .fold(HashMap::new(), |mut acc, (node_id, score)| {
        acc
          .entry(node_id)
          .and_modify(|c: &mut Candidate| c.score += score)
          .or_insert_with(|| Candidate {
            node: node_id,
            score: score + Self::initial_score(document, node_id, flags),
          });
        acc
      });

    for candidate in candidates.values_mut() {
      let link_density = document.link_density(candidate.node);
      candidate.score *= 1.0 - link_density;
    }

    candidates
  }

  fn select_top_candidate(
    document: &Document,
    candidates: &HashMap<NodeId, Candidate>,
    top_candidates: &[NodeId],
    body_id: NodeId,
  ) -> Option<NodeId> {
    let mut top_candidate = *top_candidates.first()?;

    if top_candidate == body_id {
      return Some(top_candidate);
    }

    let top_score = candidates.get(&top_candidate)?.score;

    let alternative_ancestors = top_candidates
      .iter()
      .skip(1)
      .filter_map(|candidate_id| {
        candidates.get(candidate_id).and_then(|candidate| {
          if candidate.score / top_score >= TOP_CANDIDATE_SCORE_RATIO {
            Some(Self::node_ancestors(document, *candidate_id))
          } else {
            None
          }
        })
      })
      .collect::<Vec<_>>();

    if alternative_ancestors.len() >= MINIMUM_TOP_CANDIDATE_SUPPORT {
      let mut parent =
        document.node(top_candidate).and_then(|node| node.parent());

      while let Some(current) = parent {
        if Self::is_body_node(current.value()) {
          break;
        }

        let current_id = current.id();

        let support = alternative_ancestors
          .iter()
          .filter(|ancestors| ancestors.contains(&current_id))
          .count();

        if support >= MINIMUM_TOP_CANDIDATE_SUPPORT {
          top_candidate = current_id;
          break;
        }

        parent = current.parent();
      }
    }

    let mut parent =
      document.node(top_candidate).and_then(|node| node.parent());

    let mut last_score = candidates
      .get(&top_candidate)
      .map_or(top_score, |candidate| candidate.score);

    let score_threshold = last_score / 3.0;

    while let Some(current) = parent {
      if Self::is_body_node(current.value()) {
        break;
      }

      let parent_id = current.id();

      let Some(parent_candidate) = candidates.get(&parent_id) else {
        parent = current.parent();
        continue;
      };

      let parent_score = parent_candidate.score;

      if parent_score < score_threshold {
        break;
      }

      if parent_score > last_score {
        top_candidate = parent_id;
        break;
      }

      last_score = parent_score;
      parent = current.parent();
    }

    Some(top_candidate)
  }

  /// Determines whether a sibling element should be merged into the article
  /// output based on scoring and structural heuristics.
  fn should_include_sibling(
    document: &Document,
    element: ElementRef<'_>,
    top_candidate: NodeId,
    candidates: &HashMap<NodeId, Candidate>,
    threshold: f64,
    top_score: f64,
    top_class: Option<&str>,
  ) -> bool {
    let child_id = element.id();

    if child_id == top_candidate {
      return true;
    }

    let mut candidate_score =
      candidates.get(&child_id).map_or(0.0, |c| c.score);

    if candidate_score > 0.0
      && let Some(top_class) = top_class.filter(|cls| !cls.is_empty())
      && let Some(sibling_class) = element.value().attr("class")
      && sibling_class == top_class
    {
      candidate_score += top_score * CLASS_BONUS_RATIO;
    }

    if candidate_score >= threshold {
      return true;
    }

    if element.value().name() == "p" {
      Self::is_valid_paragraph(document, child_id)
    } else {
      false
    }
  }

  /// Highest scoring candidates, ties broken by document order.
  fn top_candidates(
    body: NodeRef<'_, Node>,
    candidates: &HashMap<NodeId, Candidate>,
    limit: usize,
  ) -> Vec<NodeId> {
    let mut ranked = body
      .descendants()
      .filter_map(|node| candidates.get(&node.id()))
      .map(|candidate| (candidate.node, candidate.score))
      .collect::<Vec<_>>();

    ranked.sort_by(|a, b| {
      b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
      .into_iter()
      .take(limit)
      .map(|(node, _)| node)
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  const SENTENCE: &str =
    "This sentence is long enough to be scored, and it has a comma or two.";

  fn paragraphs(count: usize) -> String {
    (0..count).map(|_| format!("<p>{SENTENCE}</p>")).collect()
  }

  fn extract(html: &str) -> (Option<ArticleFragment>, Metadata) {
    let (_, fragment, metadata) =
      run_stage(&mut ArticleStage, html, Flags::attempts()[0]);

    (fragment, metadata)
  }

  #[test]
  fn selects_the_densest_container() {
    let html = format!(
      r#"<body>
        <div id="menu"><a href="/a">Short link</a></div>
        <div id="story">{}</div>
        <div id="footer"><p>Copyright notice is short.</p></div>
      </body>"#,
      paragraphs(5)
    );

    let (fragment, _) = extract(&html);

    let fragment = fragment.unwrap();

    assert!(fragment.markup().contains("id=\"story\""));
    assert!(!fragment.markup().contains("Short link"));
    assert_eq!(fragment.elements_named(&["p"]).len(), 5);
  }

  #[test]
  fn leaves_fragment_unset_when_nothing_scores() {
    let (fragment, _) =
      extract("<body><p>Too short.</p><div><a href=\"/\">Home</a></div></body>");

    assert!(fragment.is_none());
  }

  #[test]
  fn leaves_fragment_unset_for_empty_body() {
    let (fragment, _) = extract("");

    assert!(fragment.is_none());
  }

  #[test]
  fn scores_divs_holding_only_phrasing_content() {
    let (fragment, _) = extract(&format!(
      "<body><section><div class=\"text\">{SENTENCE} <b>{SENTENCE}</b></div></section></body>"
    ));

    assert!(fragment.unwrap().text_content().contains("comma or two"));
  }

  #[test]
  fn includes_sibling_paragraphs_with_sentences() {
    let html = format!(
      r#"<body>
        <div><div id="main">{}</div><p>A short closing line.</p><p>menu</p></div>
      </body>"#,
      paragraphs(4)
    );

    let (fragment, _) = extract(&html);

    let text = fragment.unwrap().text_content();

    assert!(text.contains("A short closing line."));
    assert!(!text.contains("menu"));
  }

  #[test]
  fn short_sentence_paragraphs_stop_below_eighty_chars() {
    let valid = |text: String| {
      let document = Document::parse(&format!("<body><p>{text}</p></body>"));
      let node_id = document.select("p").unwrap()[0];
      ArticleStage::is_valid_paragraph(&document, node_id)
    };

    assert!(valid(format!("{}.", "a".repeat(78))));
    assert!(!valid(format!("{}.", "a".repeat(79))));
    assert!(valid(format!("{}.", "a".repeat(80))));
    assert!(!valid("No closing punctuation here".into()));
  }

  #[test]
  fn derives_excerpt_from_first_paragraph() {
    let (_, metadata) = extract(&format!(
      "<body><article><p>  </p>{}</article></body>",
      paragraphs(3)
    ));

    assert_eq!(metadata.excerpt.as_deref(), Some(SENTENCE));
  }

  #[test]
  fn keeps_existing_excerpt() {
    let options = ExtractorOptions::default();

    let mut context = Context::new(
      Document::parse(&format!("<body><article>{}</article></body>", paragraphs(3))),
      &options,
      Flags::attempts()[0],
    );

    context.set_metadata(Metadata {
      excerpt: Some("From meta".into()),
      ..Metadata::default()
    });

    ArticleStage.run(&mut context).unwrap();

    assert_eq!(
      context.into_outcome().metadata.excerpt.as_deref(),
      Some("From meta")
    );
  }

  #[test]
  fn reads_body_lang_and_nearest_dir() {
    let options = ExtractorOptions::default();

    let mut context = Context::new(
      Document::parse(&format!(
        "<body lang=\"ar\"><div dir=\"rtl\"><article>{}</article><aside>x</aside></div></body>",
        paragraphs(3)
      )),
      &options,
      Flags::attempts()[0],
    );

    ArticleStage.run(&mut context).unwrap();

    let outcome = context.into_outcome();

    assert_eq!(outcome.lang.as_deref(), Some("ar"));
    assert_eq!(outcome.dir.as_deref(), Some("rtl"));
  }

  #[test]
  fn class_weight_only_applies_when_flagged() {
    let html = format!(
      "<body><div class=\"comment\">{}</div></body>",
      paragraphs(3)
    );

    let document = Document::parse(&html);

    let body = document.body_element().unwrap().id();

    let div = document.select("div").unwrap()[0];

    let weighted = ArticleStage::score_candidates(
      &document,
      body,
      Flags::attempts()[0],
    );

    let unweighted = ArticleStage::score_candidates(
      &document,
      body,
      Flags {
        weight_classes: false,
        ..Flags::attempts()[0]
      },
    );

    let difference = unweighted[&div].score - weighted[&div].score;

    assert!((difference - 25.0).abs() < 1e-9);
  }

  #[test]
  fn propagation_stops_below_html() {
    let document = Document::parse(&format!("<body>{}</body>", paragraphs(1)));

    let html = document.html_element().unwrap().id();

    let candidates = ArticleStage::score_candidates(
      &document,
      document.body_element().unwrap().id(),
      Flags::attempts()[0],
    );

    assert!(!candidates.contains_key(&html));
    assert!(candidates.contains_key(&document.body_element().unwrap().id()));
  }
}
