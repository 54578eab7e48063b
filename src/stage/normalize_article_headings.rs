use super::*;

/// Renames `<h1>` elements inside the article to `<h2>` so the title stays
/// the only top-level heading.
pub(crate) struct NormalizeArticleHeadingsStage;

impl Stage for NormalizeArticleHeadingsStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let Some(fragment) = context.article_fragment_mut() else {
      return Ok(());
    };

    fragment.edit_elements(|element| {
      if element.name() == "h1" {
        element.name.local = "h2".into();
      }
    });

    Ok(())
  }
}
