use super::*;

pub(crate) struct LanguageStage;

impl Stage for LanguageStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    let lang = context
      .document()
      .html_element()
      .and_then(ElementRef::wrap)
      .and_then(|element| element.value().attr("lang"))
      .map(str::trim)
      .filter(|lang| !lang.is_empty())
      .map(str::to_string);

    context.set_document_lang(lang);

    Ok(())
  }
}
