use super::*;

pub(crate) struct ElementLimitStage;

impl Stage for ElementLimitStage {
  fn run(&mut self, context: &mut Context<'_>) -> Result {
    if let Some(limit) = context.options().max_elems_to_parse {
      let count = context.document().element_count();

      if count > limit {
        return Err(Error::ElementLimitExceeded {
          found: count,
          limit,
        });
      }
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn run_with_limit(html: &str, limit: Option<usize>) -> Result {
    let options = ExtractorOptions::builder().max_elems_to_parse(limit).build();

    let mut context =
      Context::new(Document::parse(html), &options, Flags::attempts()[0]);

    ElementLimitStage.run(&mut context)
  }

  #[test]
  fn rejects_documents_above_the_limit() {
    let error =
      run_with_limit("<div><p>a</p><p>b</p></div>", Some(3)).unwrap_err();

    assert!(matches!(
      error,
      Error::ElementLimitExceeded { found: 6, limit: 3 }
    ));
  }

  #[test]
  fn accepts_documents_within_the_limit() {
    assert!(run_with_limit("<p>a</p>", Some(4)).is_ok());
    assert!(run_with_limit("<p>a</p>", None).is_ok());
  }
}
