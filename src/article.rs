use super::*;

/// The readable article extracted from a document.
///
/// Serializes with camel-cased keys. Every key is always present; values the
/// document did not provide are `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
  pub title: Option<String>,
  pub byline: Option<String>,
  pub dir: Option<String>,
  pub lang: Option<String>,
  pub content: String,
  pub text_content: String,
  pub length: usize,
  pub excerpt: Option<String>,
  pub site_name: Option<String>,
  pub published_time: Option<String>,
}

impl Article {
  #[allow(clippy::too_many_arguments)]
  #[must_use]
  pub fn new(
    title: Option<String>,
    byline: Option<String>,
    dir: Option<String>,
    lang: Option<String>,
    content: String,
    text_content: String,
    excerpt: Option<String>,
    site_name: Option<String>,
    published_time: Option<String>,
  ) -> Self {
    let length = text_content.chars().count();

    Self {
      title,
      byline,
      dir,
      lang,
      content,
      text_content,
      length,
      excerpt,
      site_name,
      published_time,
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq};

  #[test]
  fn length_counts_characters_not_bytes() {
    let article = Article::new(
      None,
      None,
      None,
      None,
      String::new(),
      "naïve café".into(),
      None,
      None,
      None,
    );

    assert_eq!(article.length, 10);
  }

  #[test]
  fn serializes_camel_case_keys_with_nulls() {
    let article = Article::new(
      Some("Title".into()),
      None,
      None,
      None,
      "<p>x</p>".into(),
      "x".into(),
      None,
      Some("Site".into()),
      None,
    );

    assert_eq!(
      serde_json::to_value(&article).unwrap(),
      serde_json::json!({
        "title": "Title",
        "byline": null,
        "dir": null,
        "lang": null,
        "content": "<p>x</p>",
        "textContent": "x",
        "length": 1,
        "excerpt": null,
        "siteName": "Site",
        "publishedTime": null,
      })
    );
  }
}
