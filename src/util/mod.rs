
/// Derives a URL-safe slug from a human-readable name such as a
/// username or a game title. The result is lowercase ASCII with runs
/// of non-alphanumeric characters collapsed into single hyphens.
///
/// Slugs are computed once, when the owning entity is created, and
/// are never recomputed on update.
pub fn slugify(input: &str) -> String {
  let mut slug = String::new();
  let mut last_hyphen = false;
  for ch in input.chars() {
    if ch.is_ascii_alphanumeric() {
      slug.push(ch.to_ascii_lowercase());
      last_hyphen = false;
    } else if !last_hyphen {
      slug.push('-');
      last_hyphen = true;
    }
  }
  slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slugify_lowercases_simple_names() {
    assert_eq!(slugify("Chess"), "chess");
    assert_eq!(slugify("alice"), "alice");
  }

  #[test]
  fn slugify_hyphenates_word_boundaries() {
    assert_eq!(slugify("Stardew Valley"), "stardew-valley");
    assert_eq!(slugify("Baldur's Gate 3"), "baldur-s-gate-3");
  }

  #[test]
  fn slugify_collapses_and_trims_separators() {
    assert_eq!(slugify("  Half -- Life  "), "half-life");
    assert_eq!(slugify("!!fun!!"), "fun");
  }

  #[test]
  fn slugify_drops_non_ascii() {
    assert_eq!(slugify("café 64"), "caf-64");
  }
}
