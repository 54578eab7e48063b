use super::*;

macro_rules! re {
  ($pat:expr) => {
    LazyLock::new(|| Regex::new(concat!("^", $pat, "$")).unwrap())
  };
}

pub(crate) static BYLINE_HINTS: LazyLock<Regex> =
  re!(r"(?i).*(?:byline|author|dateline|writtenby|p-author).*");

pub(crate) static COMMA_VARIANTS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[,،﹐︐﹑⹀⸲，]").unwrap());

pub(crate) static FRAGMENT_URL: LazyLock<Regex> = re!(r"#.+");

pub(crate) static HIDDEN_STYLE: LazyLock<Regex> =
  re!(r"(?is).*(?:display\s*:\s*none|visibility\s*:\s*hidden).*");

pub(crate) static JSON_LD_ARTICLE_TYPES: LazyLock<Regex> = re!(concat!(
  r"(?:Article|AdvertiserContentArticle|NewsArticle|AnalysisNewsArticle|",
  r"AskPublicNewsArticle|BackgroundNewsArticle|OpinionNewsArticle|",
  r"ReportageNewsArticle|ReviewNewsArticle|Report|SatiricalArticle|",
  r"ScholarlyArticle|MedicalScholarlyArticle|SocialMediaPosting|",
  r"BlogPosting|LiveBlogPosting|DiscussionForumPosting|TechArticle|",
  r"APIReference)"
));

pub(crate) static NAMED_HTML_ENTITIES: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"&(?P<name>quot|amp|apos|lt|gt);").unwrap());

pub(crate) static NEGATIVE_CONTENT_HINTS: LazyLock<Regex> = re!(concat!(
  r"(?i).*(?:-ad-|hidden|banner|combx|comment|com-|contact|footer|gdpr|",
  r"masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|",
  r"sidebar|skyscraper|sponsor|shopping|tags|widget|(?:^| )hid(?:$| )).*"
));

pub(crate) static NUMERIC_HTML_ENTITY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"&#(?:x([0-9a-fA-F]+)|([0-9]+));").unwrap());

pub(crate) static POSSIBLE_CONTENT_CANDIDATE: LazyLock<Regex> =
  re!(r"(?i).*(?:and|article|body|column|content|main|mathjax|shadow).*");

pub(crate) static POSITIVE_CONTENT_HINTS: LazyLock<Regex> = re!(concat!(
  r"(?i).*(?:article|body|content|entry|hentry|h-entry|main|page|pagination|",
  r"post|text|blog|story).*"
));

pub(crate) static SCHEMA_ORG_CONTEXT: LazyLock<Regex> =
  re!(r"https?://schema\.org/?");

pub(crate) static TITLE_HIERARCHICAL_SEPARATOR: LazyLock<Regex> =
  re!(r".*\s[\\\/>»]\s.*");

pub(crate) static TITLE_HINTS: LazyLock<Regex> =
  re!(r"(?i).*(?:title|headline).*");

pub(crate) static TITLE_LEADING_SEPARATOR: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^\|\-–—\\\/>»]*[\|\-–—\\\/>»]").unwrap());

pub(crate) static TITLE_SEPARATOR_CHARS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[\|\-–—\\\/>»]+").unwrap());

pub(crate) static TITLE_SEPARATOR_RUN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s[\|\-–—\\\/>»]\s").unwrap());

pub(crate) static UNLIKELY_CONTENT_CANDIDATES: LazyLock<Regex> = re!(concat!(
  r"(?i).*(?:-ad-|ai2html|banner|breadcrumbs|combx|comment|community|cover-wrap|",
  r"disqus|extra|footer|gdpr|header|legends|menu|related|remark|replies|rss|",
  r"shoutbox|sidebar|skyscraper|social|sponsor|supplemental|ad-break|agegate|",
  r"pagination|pager|popup|yom-remote|advert|(?:^|\s)ads?(?:\s|$)).*"
));

pub(crate) static WHITESPACE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn byline_hints_detects_substrings() {
    assert!(BYLINE_HINTS.is_match("article byline container"));
    assert!(BYLINE_HINTS.is_match("AUTHOR badge"));
    assert!(!BYLINE_HINTS.is_match("contributor details"));
  }

  #[test]
  fn fragment_url_requires_fragment_reference() {
    assert!(FRAGMENT_URL.is_match("#section-1"));
    assert!(!FRAGMENT_URL.is_match("/path#section-1"));
  }

  #[test]
  fn hidden_style_matches_display_and_visibility() {
    assert!(HIDDEN_STYLE.is_match("color: red; display : none"));
    assert!(HIDDEN_STYLE.is_match("VISIBILITY:hidden"));
    assert!(!HIDDEN_STYLE.is_match("display: block"));
  }

  #[test]
  fn json_ld_article_types_are_exact() {
    assert!(JSON_LD_ARTICLE_TYPES.is_match("NewsArticle"));
    assert!(JSON_LD_ARTICLE_TYPES.is_match("BlogPosting"));
    assert!(!JSON_LD_ARTICLE_TYPES.is_match("WebPage"));
    assert!(!JSON_LD_ARTICLE_TYPES.is_match("NewsArticleExtra"));
  }

  #[test]
  fn negative_content_hints_handle_hid_variants() {
    assert!(NEGATIVE_CONTENT_HINTS.is_match("hid"));
    assert!(NEGATIVE_CONTENT_HINTS.is_match("header hid footer"));
    assert!(!NEGATIVE_CONTENT_HINTS.is_match("content primary"));
  }

  #[test]
  fn schema_org_context_accepts_both_schemes() {
    assert!(SCHEMA_ORG_CONTEXT.is_match("https://schema.org"));
    assert!(SCHEMA_ORG_CONTEXT.is_match("http://schema.org/"));
    assert!(!SCHEMA_ORG_CONTEXT.is_match("https://example.org"));
  }

  #[test]
  fn title_separator_run_counts_instances() {
    assert_eq!(TITLE_SEPARATOR_RUN.find_iter("Foo - Bar | Baz").count(), 2);
  }

  #[test]
  fn unlikely_candidates_match_ad_tokens() {
    assert!(UNLIKELY_CONTENT_CANDIDATES.is_match("ad"));
    assert!(UNLIKELY_CONTENT_CANDIDATES.is_match("top ads"));
    assert!(UNLIKELY_CONTENT_CANDIDATES.is_match("advertisement"));
    assert!(!UNLIKELY_CONTENT_CANDIDATES.is_match("headline"));
    assert!(!UNLIKELY_CONTENT_CANDIDATES.is_match("loaded"));
  }

  #[test]
  fn whitespace_collapses_every_run() {
    assert_eq!(
      WHITESPACE.replace_all("foo \n\t bar\nbaz", " ").as_ref(),
      "foo bar baz"
    );
  }
}
