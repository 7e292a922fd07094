//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Locate the first bracket-balanced JSON array-of-objects literal in `text`.
///
/// Models often wrap their JSON in prose or code fences; we scan from the
/// first `[` that is followed (modulo whitespace) by `{` and return the
/// substring up to the matching `]`, tracking strings and escapes so that
/// brackets inside string literals don't confuse the scan.
pub fn extract_json_array(text: &str) -> Option<&str> {
  let mut start = None;
  for (i, ch) in text.char_indices() {
    if ch == '[' && text[i + 1..].trim_start().starts_with('{') {
      start = Some(i);
      break;
    }
  }
  let start = start?;
  balanced_slice(text, start, '[', ']')
}

/// Locate the first brace-balanced JSON object literal in `text`.
/// Same scanning rules as [`extract_json_array`].
pub fn extract_json_object(text: &str) -> Option<&str> {
  let start = text.find('{')?;
  balanced_slice(text, start, '{', '}')
}

fn balanced_slice(text: &str, start: usize, open: char, close: char) -> Option<&str> {
  let mut depth = 0usize;
  let mut in_str = false;
  let mut escaped = false;
  for (i, ch) in text[start..].char_indices() {
    if in_str {
      if escaped {
        escaped = false;
      } else if ch == '\\' {
        escaped = true;
      } else if ch == '"' {
        in_str = false;
      }
      continue;
    }
    if ch == '"' {
      in_str = true;
    } else if ch == open {
      depth += 1;
    } else if ch == close {
      depth -= 1;
      if depth == 0 {
        return Some(&text[start..start + i + ch.len_utf8()]);
      }
    }
  }
  None
}

/// Best-effort unique problem id: millisecond timestamp plus a short
/// random suffix. Collisions are tolerated, not prevented.
pub fn fresh_problem_id() -> String {
  let millis = chrono::Utc::now().timestamp_millis();
  let suffix = uuid::Uuid::new_v4().simple().to_string();
  format!("{}-{}", millis, &suffix[..9])
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_fills_all_placeholders() {
    let out = fill_template(
      "make {count} {language} problems",
      &[("count", "3"), ("language", "python")],
    );
    assert_eq!(out, "make 3 python problems");
  }

  #[test]
  fn array_extraction_ignores_surrounding_prose() {
    let text = "Sure! Here you go:\n```json\n[{\"title\": \"A [draft]\"}, {\"title\": \"B\"}]\n```\nEnjoy.";
    let found = extract_json_array(text).expect("array");
    let v: serde_json::Value = serde_json::from_str(found).expect("valid json");
    assert_eq!(v.as_array().map(|a| a.len()), Some(2));
  }

  #[test]
  fn array_extraction_skips_non_object_arrays() {
    // A bare number array before the object array must not win.
    let text = "tags: [1, 2, 3] then [ {\"k\": \"v\"} ] done";
    assert_eq!(extract_json_array(text), Some("[ {\"k\": \"v\"} ]"));
  }

  #[test]
  fn object_extraction_handles_braces_in_strings() {
    let text = "reply: {\"feedback\": \"use {} sparingly\"} trailing";
    let found = extract_json_object(text).expect("object");
    let v: serde_json::Value = serde_json::from_str(found).expect("valid json");
    assert_eq!(v["feedback"], "use {} sparingly");
  }

  #[test]
  fn no_array_present_yields_none() {
    assert!(extract_json_array("no json here").is_none());
    assert!(extract_json_object("still nothing").is_none());
  }

  #[test]
  fn problem_ids_have_timestamp_and_suffix() {
    let id = fresh_problem_id();
    let (ts, suffix) = id.split_once('-').expect("dash separator");
    assert!(ts.parse::<i64>().is_ok());
    assert_eq!(suffix.len(), 9);
    assert_ne!(fresh_problem_id(), fresh_problem_id());
  }

  #[test]
  fn truncation_reports_total_size() {
    let s = "abcdefgh";
    assert_eq!(trunc_for_log(s, 100), s);
    assert!(trunc_for_log(s, 4).starts_with("abcd"));
    assert!(trunc_for_log(s, 4).contains("8 bytes total"));
  }
}
