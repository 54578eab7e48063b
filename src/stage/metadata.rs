use super::*;

static SELECTOR_ITEMPROP_NAME: LazyLock<Selector> =
  LazyLock::new(|| Selector::parse("[itemprop*=\"name\"]").unwrap());

/// Collects title, byline, excerpt, site name and publication time from
/// JSON-LD, `<meta>` tags and byline markup, in that order of preference.
pub(crate) struct MetadataStage;

impl Stage for MetadataStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let document = context.document();

    let from_json_ld = if context.options().disable_json_ld {
      Metadata::default()
    } else {
      Self::json_ld(document)
    };

    let mut metadata = from_json_ld.or(Self::collect_metadata(document)?);

    if metadata.byline.is_none()
      && let Some((node_id, byline)) = Self::find_byline(document)
    {
      metadata.byline = Some(byline);
      context.document_mut().remove_nodes([node_id]);
    }

    debug!(
      title = metadata.title.as_deref(),
      byline = metadata.byline.as_deref(),
      site_name = metadata.site_name.as_deref(),
      "collected metadata"
    );

    context.set_metadata(metadata);

    Ok(())
  }
}

impl MetadataStage {
  const BYLINE_KEYS: [&'static str; 6] = [
    "dc:creator",
    "dcterm:creator",
    "dcterms:creator",
    "dc:author",
    "author",
    "parsely:author",
  ];

  const EXCERPT_KEYS: [&'static str; 6] = [
    "dc:description",
    "dcterm:description",
    "dcterms:description",
    "description",
    "og:description",
    "twitter:description",
  ];

  const PUBLISHED_TIME_KEYS: [&'static str; 8] = [
    "article:published_time",
    "article:published",
    "og:article:published_time",
    "parsely:pub-date",
    "parsely:publish_date",
    "publish_date",
    "dcterms:created",
    "datepublished",
  ];

  const SITE_NAME_KEYS: [&'static str; 3] =
    ["og:site_name", "parsely:site_name", "parsely:site"];

  const TITLE_KEYS: [&'static str; 7] = [
    "dc:title",
    "dcterm:title",
    "dcterms:title",
    "title",
    "og:title",
    "twitter:title",
    "headline",
  ];

  fn collect_metadata(document: &Document) -> Result<Metadata> {
    let values = Self::collect_values(document);

    Ok(Metadata {
      title: Self::pick_meta_value(&values, &Self::TITLE_KEYS),
      byline: Self::pick_meta_value(&values, &Self::BYLINE_KEYS),
      excerpt: Self::pick_meta_value(&values, &Self::EXCERPT_KEYS),
      site_name: Self::pick_meta_value(&values, &Self::SITE_NAME_KEYS),
      published_time: Self::pick_meta_value(
        &values,
        &Self::PUBLISHED_TIME_KEYS,
      )
      .map_or_else(|| Self::find_time(document), |value| Ok(Some(value)))?,
    })
  }

  fn collect_values(document: &Document) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for node in document.root().descendants() {
      let Some(element) = ElementRef::wrap(node) else {
        continue;
      };

      if element.value().name() != "meta" {
        continue;
      }

      let content = element.value().attr("content").unwrap_or_default().trim();

      if content.is_empty() {
        continue;
      }

      for attribute in ["name", "property", "itemprop"] {
        if let Some(keys) = element.value().attr(attribute) {
          Self::insert_meta_keys(&mut values, keys, content);
        }
      }
    }

    values
  }

  /// First byline-like element outside `<head>`, with its text. The caller
  /// detaches the node so the byline stays out of the article body.
  fn find_byline(document: &Document) -> Option<(NodeId, String)> {
    for node in document.root().descendants() {
      let Some(element) = ElementRef::wrap(node) else {
        continue;
      };

      if matches!(
        element.value().name(),
        "html" | "head" | "body" | "script" | "style" | "meta"
      ) {
        continue;
      }

      let rel_author = element.value().attr("rel").is_some_and(|value| {
        value
          .split_whitespace()
          .any(|token| token.eq_ignore_ascii_case("author"))
      });

      let itemprop_author = element
        .value()
        .attr("itemprop")
        .is_some_and(|value| value.to_ascii_lowercase().contains("author"));

      let match_string = class_and_id(element.value());

      let class_match =
        !match_string.is_empty() && re::BYLINE_HINTS.is_match(&match_string);

      if !(rel_author || itemprop_author || class_match) {
        continue;
      }

      let text = document.collect_text(node.id(), true);

      if text.is_empty() || text.chars().count() >= 100 {
        continue;
      }

      if let Some(name_el) = element.select(&SELECTOR_ITEMPROP_NAME).next() {
        let name = document.collect_text(name_el.id(), true);

        if !name.is_empty() && name.chars().count() < 100 {
          return Some((node.id(), text::decode_html_entities(&name)));
        }
      }

      return Some((node.id(), text::decode_html_entities(&text)));
    }

    None
  }

  /// Falls back to the first `<time datetime>`, preferring entry dates.
  fn find_time(document: &Document) -> Result<Option<String>> {
    for selector in ["time.entry-date[datetime]", "time[datetime]"] {
      let found = document.select(selector)?.into_iter().find_map(|id| {
        document
          .node(id)
          .and_then(ElementRef::wrap)
          .and_then(|element| element.value().attr("datetime"))
          .map(str::trim)
          .filter(|value| !value.is_empty())
          .map(str::to_string)
      });

      if found.is_some() {
        return Ok(found);
      }
    }

    Ok(None)
  }

  fn insert_meta_keys(
    values: &mut HashMap<String, String>,
    raw_keys: &str,
    content: &str,
  ) {
    for raw_key in raw_keys.split_whitespace() {
      let key = Self::normalize_meta_key(raw_key);

      if key.is_empty() {
        continue;
      }

      values.entry(key).or_insert_with(|| content.to_string());
    }
  }

  fn json_ld(document: &Document) -> Metadata {
    let Ok(scripts) = document.select("script[type=\"application/ld+json\"]")
    else {
      return Metadata::default();
    };

    for script in scripts {
      let raw = document.collect_text(script, false);

      let raw = raw
        .trim()
        .trim_start_matches("<![CDATA[")
        .trim_end_matches("]]>")
        .trim();

      let Ok(value) = serde_json::from_str::<Value>(raw) else {
        debug!("skipping malformed JSON-LD block");
        continue;
      };

      if let Some(metadata) = Self::json_ld_article(&value) {
        return metadata;
      }
    }

    Metadata::default()
  }

  fn json_ld_article(value: &Value) -> Option<Metadata> {
    let is_article = |item: &Value| {
      item
        .get("@type")
        .and_then(Value::as_str)
        .is_some_and(|kind| re::JSON_LD_ARTICLE_TYPES.is_match(kind))
    };

    let value = match value.as_array() {
      Some(items) => items.iter().find(|item| is_article(item))?,
      None => value,
    };

    let has_schema_context = match value.get("@context") {
      Some(Value::String(context)) => re::SCHEMA_ORG_CONTEXT.is_match(context),
      Some(Value::Object(context)) => context
        .get("@vocab")
        .and_then(Value::as_str)
        .is_some_and(|vocab| re::SCHEMA_ORG_CONTEXT.is_match(vocab)),
      _ => false,
    };

    if !has_schema_context {
      return None;
    }

    let article = if value.get("@type").is_none() {
      value
        .get("@graph")
        .and_then(Value::as_array)?
        .iter()
        .find(|item| is_article(item))?
    } else {
      value
    };

    if !is_article(article) {
      return None;
    }

    let string = |value: Option<&Value>| {
      value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(text::decode_html_entities)
    };

    let publisher = string(article.get("publisher").and_then(|p| p.get("name")));

    let name = string(article.get("name"));

    let headline = string(article.get("headline"));

    let title = match (name, headline) {
      (Some(name), Some(headline)) if publisher.as_ref() == Some(&name) => {
        Some(headline)
      }
      (Some(name), _) => Some(name),
      (None, headline) => headline,
    };

    let byline = match article.get("author") {
      Some(Value::Array(authors)) => Some(
        authors
          .iter()
          .filter_map(|author| string(author.get("name")))
          .collect::<Vec<_>>()
          .join(", "),
      )
      .filter(|names| !names.is_empty()),
      Some(author @ Value::String(_)) => string(Some(author)),
      Some(author) => string(author.get("name")),
      None => None,
    };

    Some(Metadata {
      byline,
      excerpt: string(article.get("description")),
      published_time: string(article.get("datePublished")),
      site_name: publisher,
      title,
    })
  }

  fn normalize_meta_key(raw: &str) -> String {
    raw
      .trim()
      .chars()
      .filter(|ch| !ch.is_whitespace())
      .map(|ch| {
        if ch == '.' {
          ':'
        } else {
          ch.to_ascii_lowercase()
        }
      })
      .collect()
  }

  fn pick_meta_value(
    values: &HashMap<String, String>,
    keys: &[&str],
  ) -> Option<String> {
    keys
      .iter()
      .find_map(|key| values.get(&Self::normalize_meta_key(key)))
      .map(|value| text::decode_html_entities(value))
      .filter(|value| !value.trim().is_empty())
  }
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  fn collect(html: &str) -> Metadata {
    run_stage(&mut MetadataStage, html, Flags::attempts()[0]).2
  }

  #[test]
  fn prefers_dublin_core_over_open_graph() {
    let metadata = collect(
      r#"<html><head>
        <meta property="og:title" content="OG title">
        <meta name="dc.title" content="DC title">
        <meta name="author" content="Jane &amp; John">
        <meta property="og:site_name" content="Example News">
        <meta name="description" content="  Summary text ">
        <meta property="article:published_time" content="2020-01-02T03:04:05Z">
      </head><body></body></html>"#,
    );

    assert_eq!(
      metadata,
      Metadata {
        byline: Some("Jane & John".into()),
        excerpt: Some("Summary text".into()),
        published_time: Some("2020-01-02T03:04:05Z".into()),
        site_name: Some("Example News".into()),
        title: Some("DC title".into()),
      }
    );
  }

  #[test]
  fn splits_space_separated_properties() {
    let metadata = collect(
      r#"<head><meta property="og:title twitter:title" content="Shared"></head>"#,
    );

    assert_eq!(metadata.title.as_deref(), Some("Shared"));
  }

  #[test]
  fn json_ld_takes_precedence_over_meta_tags() {
    let metadata = collect(
      r#"<html><head>
        <meta property="og:title" content="Meta title">
        <meta property="og:site_name" content="Meta site">
        <script type="application/ld+json">
          {
            "@context": "https://schema.org",
            "@type": "NewsArticle",
            "headline": "Json headline",
            "author": [{"name": "Ann"}, {"name": "Bob"}],
            "publisher": {"name": "Json site"},
            "datePublished": "2021-05-06"
          }
        </script>
      </head><body></body></html>"#,
    );

    assert_eq!(metadata.title.as_deref(), Some("Json headline"));
    assert_eq!(metadata.byline.as_deref(), Some("Ann, Bob"));
    assert_eq!(metadata.site_name.as_deref(), Some("Json site"));
    assert_eq!(metadata.published_time.as_deref(), Some("2021-05-06"));
  }

  #[test]
  fn json_ld_graph_and_non_article_types() {
    let from_graph = collect(
      r#"<script type="application/ld+json">
        {"@context": {"@vocab": "http://schema.org/"},
         "@graph": [{"@type": "WebSite", "name": "Site"},
                    {"@type": "BlogPosting", "name": "Post", "author": "Kim"}]}
      </script>"#,
    );

    assert_eq!(from_graph.title.as_deref(), Some("Post"));
    assert_eq!(from_graph.byline.as_deref(), Some("Kim"));

    let ignored = collect(
      r#"<script type="application/ld+json">
        {"@context": "https://schema.org", "@type": "WebPage", "name": "Page"}
      </script>"#,
    );

    assert_eq!(ignored.title, None);
  }

  #[test]
  fn json_ld_can_be_disabled() {
    let options = ExtractorOptions::builder().disable_json_ld(true).build();

    let mut context = Context::new(
      Document::parse(
        r#"<script type="application/ld+json">
          {"@context": "https://schema.org", "@type": "Article", "name": "Hidden"}
        </script>"#,
      ),
      &options,
      Flags::attempts()[0],
    );

    MetadataStage.run(&mut context).unwrap();

    assert_eq!(context.metadata().title, None);
  }

  #[test]
  fn finds_byline_from_markup() {
    let metadata = collect(
      r#"<body>
        <div class="byline">By <span itemprop="name">Alex Writer</span></div>
        <p>Body text.</p>
      </body>"#,
    );

    assert_eq!(metadata.byline.as_deref(), Some("Alex Writer"));

    let metadata = collect(
      r#"<body><a rel="author" href="/u/sam">Sam Smith</a></body>"#,
    );

    assert_eq!(metadata.byline.as_deref(), Some("Sam Smith"));
  }

  #[test]
  fn falls_back_to_time_elements() {
    let metadata = collect(
      r#"<body>
        <time datetime="2019-01-01">Jan 1</time>
        <time class="entry-date" datetime="2018-12-31">Dec 31</time>
      </body>"#,
    );

    assert_eq!(metadata.published_time.as_deref(), Some("2018-12-31"));
  }

  #[test]
  fn detaches_byline_markup_from_document() {
    let (document, _, metadata) = run_stage(
      &mut MetadataStage,
      r#"<body><article><p class="byline">By Pat Reporter</p><p>Story.</p></article></body>"#,
      Flags::attempts()[0],
    );

    assert_eq!(metadata.byline.as_deref(), Some("By Pat Reporter"));
    assert!(document.select(".byline").unwrap().is_empty());
    assert_eq!(document.select("p").unwrap().len(), 1);
  }

  #[test]
  fn keeps_byline_markup_when_meta_supplies_author() {
    let (document, _, metadata) = run_stage(
      &mut MetadataStage,
      r#"<head><meta name="author" content="Meta Author"></head>
        <body><p class="byline">By Pat Reporter</p></body>"#,
      Flags::attempts()[0],
    );

    assert_eq!(metadata.byline.as_deref(), Some("Meta Author"));
    assert_eq!(document.select(".byline").unwrap().len(), 1);
  }
}
