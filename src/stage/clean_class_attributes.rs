use super::*;

/// Drops `class` attributes from the article, keeping only the configured
/// classes unless every class is to be kept.
pub(crate) struct CleanClassAttributesStage;

impl Stage for CleanClassAttributesStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let options = context.options();

    if options.keep_classes {
      return Ok(());
    }

    let preserve = options.classes_to_preserve.clone();

    let Some(fragment) = context.article_fragment_mut() else {
      return Ok(());
    };

    Self::clean_classes(fragment, &preserve);

    Ok(())
  }
}

impl CleanClassAttributesStage {
  fn clean_classes(fragment: &mut ArticleFragment, preserve: &[String]) {
    fragment.edit_elements(|element| {
      element.attrs.retain_mut(|(name, value)| {
        if name.local.as_ref() != "class" {
          return true;
        }

        let kept = value
          .split_whitespace()
          .filter(|class| preserve.iter().any(|keep| keep == class))
          .collect::<Vec<_>>()
          .join(" ");

        *value = kept.as_str().into();

        !value.is_empty()
      });
    });
  }
}
