#[derive(Debug, Clone)]
pub struct ExtractorOptions {
  pub char_threshold: usize,
  pub classes_to_preserve: Vec<String>,
  pub disable_json_ld: bool,
  pub keep_classes: bool,
  pub link_density_modifier: f64,
  pub max_elems_to_parse: Option<usize>,
  pub nb_top_candidates: usize,
}

impl Default for ExtractorOptions {
  fn default() -> Self {
    Self {
      char_threshold: 500,
      classes_to_preserve: vec!["page".to_string()],
      disable_json_ld: false,
      keep_classes: false,
      link_density_modifier: 0.0,
      max_elems_to_parse: None,
      nb_top_candidates: 5,
    }
  }
}

impl ExtractorOptions {
  #[must_use]
  pub fn builder() -> ExtractorOptionsBuilder {
    ExtractorOptionsBuilder::default()
  }
}

#[derive(Default)]
pub struct ExtractorOptionsBuilder {
  inner: ExtractorOptions,
}

impl ExtractorOptionsBuilder {
  #[must_use]
  pub fn build(self) -> ExtractorOptions {
    self.inner
  }

  #[must_use]
  pub fn char_threshold(self, char_threshold: usize) -> Self {
    Self {
      inner: ExtractorOptions {
        char_threshold,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn classes_to_preserve<I, S>(self, classes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      inner: ExtractorOptions {
        classes_to_preserve: classes.into_iter().map(Into::into).collect(),
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn disable_json_ld(self, disable_json_ld: bool) -> Self {
    Self {
      inner: ExtractorOptions {
        disable_json_ld,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn keep_classes(self, keep_classes: bool) -> Self {
    Self {
      inner: ExtractorOptions {
        keep_classes,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn link_density_modifier(self, link_density_modifier: f64) -> Self {
    Self {
      inner: ExtractorOptions {
        link_density_modifier,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn max_elems_to_parse(self, max_elems_to_parse: Option<usize>) -> Self {
    Self {
      inner: ExtractorOptions {
        max_elems_to_parse,
        ..self.inner
      },
    }
  }

  #[must_use]
  pub fn nb_top_candidates(self, nb_top_candidates: usize) -> Self {
    Self {
      inner: ExtractorOptions {
        nb_top_candidates: nb_top_candidates.max(1),
        ..self.inner
      },
    }
  }
}
