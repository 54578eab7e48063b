/// Heuristics that are relaxed one at a time when an extraction attempt
/// yields too little text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Flags {
  pub(crate) clean_conditionally: bool,
  pub(crate) strip_unlikely: bool,
  pub(crate) weight_classes: bool,
}

impl Flags {
  const ALL: Flags = Flags {
    clean_conditionally: true,
    strip_unlikely: true,
    weight_classes: true,
  };

  /// Flag sets to try, strictest first.
  pub(crate) fn attempts() -> [Flags; 4] {
    let all = Self::ALL;

    let keep_unlikely = Flags {
      strip_unlikely: false,
      ..all
    };

    let ignore_classes = Flags {
      weight_classes: false,
      ..keep_unlikely
    };

    let keep_everything = Flags {
      clean_conditionally: false,
      ..ignore_classes
    };

    [all, keep_unlikely, ignore_classes, keep_everything]
  }
}
