#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Metadata {
  pub(crate) byline: Option<String>,
  pub(crate) excerpt: Option<String>,
  pub(crate) published_time: Option<String>,
  pub(crate) site_name: Option<String>,
  pub(crate) title: Option<String>,
}

impl Metadata {
  /// Fills every field that is still missing from `other`.
  pub(crate) fn or(self, other: Metadata) -> Metadata {
    Metadata {
      byline: self.byline.or(other.byline),
      excerpt: self.excerpt.or(other.excerpt),
      published_time: self.published_time.or(other.published_time),
      site_name: self.site_name.or(other.site_name),
      title: self.title.or(other.title),
    }
  }
}
