use super::*;

/// Finds the main article in a [`Document`].
///
/// Each attempt runs the stage pipeline over a fresh copy of the document.
/// When an attempt yields less text than
/// [`ExtractorOptions::char_threshold`], the next attempt relaxes one
/// heuristic; if none reaches the threshold the longest attempt is used.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
  options: ExtractorOptions,
}

struct Attempt {
  article: Article,
  flags: Flags,
}

impl Extractor {
  /// Returns the article, or `None` when no element holds enough text to be
  /// considered content.
  pub fn extract(&self, document: &Document) -> Result<Option<Article>> {
    let mut best: Option<Attempt> = None;

    for flags in Flags::attempts() {
      let context = Context::new(document.clone(), &self.options, flags);

      let outcome =
        Pipeline::with_default_stages(context).run()?.into_outcome();

      let Some(article) = Self::assemble(outcome) else {
        debug!(?flags, "attempt produced no article");
        continue;
      };

      debug!(?flags, length = article.length, "attempt produced article");

      if article.length >= self.options.char_threshold {
        return Ok(Some(article));
      }

      if best
        .as_ref()
        .is_none_or(|best| article.length > best.article.length)
      {
        best = Some(Attempt { article, flags });
      }
    }

    if let Some(Attempt { flags, .. }) = &best {
      debug!(
        ?flags,
        threshold = self.options.char_threshold,
        "no attempt reached the threshold, using the longest"
      );
    }

    Ok(best.map(|attempt| attempt.article))
  }

  #[must_use]
  pub fn new(options: ExtractorOptions) -> Self {
    Self { options }
  }

  #[must_use]
  pub fn options(&self) -> &ExtractorOptions {
    &self.options
  }

  fn assemble(outcome: Outcome) -> Option<Article> {
    let Outcome {
      dir,
      fragment,
      lang,
      metadata,
      title,
    } = outcome;

    let fragment = fragment?;

    let text_content = fragment.text_content();

    if text_content.is_empty() {
      return None;
    }

    Some(Article::new(
      title,
      metadata.byline,
      dir,
      lang,
      fragment.markup(),
      text_content,
      metadata.excerpt,
      metadata.site_name,
      metadata.published_time,
    ))
  }
}
