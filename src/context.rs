use super::*;

/// State threaded through the stages of one extraction attempt.
pub(crate) struct Context<'a> {
  article_dir: Option<String>,
  article_fragment: Option<ArticleFragment>,
  body_lang: Option<String>,
  document: Document,
  document_lang: Option<String>,
  flags: Flags,
  metadata: Metadata,
  options: &'a ExtractorOptions,
  title: Option<String>,
}

/// What an attempt leaves behind once every stage has run.
pub(crate) struct Outcome {
  pub(crate) dir: Option<String>,
  pub(crate) fragment: Option<ArticleFragment>,
  pub(crate) lang: Option<String>,
  pub(crate) metadata: Metadata,
  pub(crate) title: Option<String>,
}

impl<'a> Context<'a> {
  pub(crate) fn article_fragment(&self) -> Option<&ArticleFragment> {
    self.article_fragment.as_ref()
  }

  pub(crate) fn article_fragment_mut(
    &mut self,
  ) -> Option<&mut ArticleFragment> {
    self.article_fragment.as_mut()
  }

  pub(crate) fn document(&self) -> &Document {
    &self.document
  }

  pub(crate) fn document_mut(&mut self) -> &mut Document {
    &mut self.document
  }

  pub(crate) fn flags(&self) -> Flags {
    self.flags
  }

  pub(crate) fn into_outcome(self) -> Outcome {
    Outcome {
      dir: self.article_dir,
      fragment: self.article_fragment,
      lang: self.document_lang.or(self.body_lang),
      metadata: self.metadata,
      title: self.title,
    }
  }

  pub(crate) fn metadata(&self) -> &Metadata {
    &self.metadata
  }

  pub(crate) fn new(
    document: Document,
    options: &'a ExtractorOptions,
    flags: Flags,
  ) -> Self {
    Self {
      article_dir: None,
      article_fragment: None,
      body_lang: None,
      document,
      document_lang: None,
      flags,
      metadata: Metadata::default(),
      options,
      title: None,
    }
  }

  pub(crate) fn options(&self) -> &ExtractorOptions {
    self.options
  }

  pub(crate) fn set_article_dir(&mut self, dir: Option<String>) {
    self.article_dir = dir;
  }

  pub(crate) fn set_article_fragment(&mut self, fragment: ArticleFragment) {
    self.article_fragment = Some(fragment);
  }

  pub(crate) fn set_body_lang(&mut self, lang: Option<String>) {
    self.body_lang = lang;
  }

  pub(crate) fn set_document_lang(&mut self, lang: Option<String>) {
    self.document_lang = lang;
  }

  pub(crate) fn set_metadata(&mut self, metadata: Metadata) {
    self.metadata = metadata;
  }

  pub(crate) fn set_title(&mut self, title: Option<String>) {
    self.title = title;
  }
}
