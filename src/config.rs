//! Prompt configuration (TOML) with built-in defaults.
//!
//! The prompt templates sent to the model can be overridden via a TOML
//! file pointed at by `PROMPTS_CONFIG_PATH`. Placeholders use `{name}`
//! syntax and are filled by `util::fill_template`.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompt templates used by the generation/validation/optimization calls.
/// Override them in TOML if you need to tune tone or output structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  /// Placeholders: {count}, {language}, {topics}, {difficulties}, {extra_instructions}.
  pub generation_template: String,
  /// Placeholders: {title}, {description}, {language}, {reference_block}, {code}.
  pub validation_template: String,
  /// Placeholders: {title}, {description}, {language}, {code}.
  pub optimization_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      generation_template: r#"You are an expert programming teacher who creates coding practice problems for beginner programmers.

Please create {count} unique, educational coding problems in the {language} programming language.
The problems should cover the following topics: {topics}
The problems should be at the following difficulty levels: {difficulties}
{extra_instructions}
IMPORTANT: Return ONLY a JSON array with problems in the following format:
[
  {
    "title": "Problem Title",
    "description": "Detailed problem description...",
    "language": "{language}",
    "difficulty": "easy|medium|hard",
    "topics": ["topic1", "topic2"],
    "hints": ["First hint", "Second hint", "Third hint", "Fourth hint", "Fifth hint"],
    "solution": "Code solution with line breaks as \n"
  }
]

NO EXPLANATION TEXT. ONLY RETURN VALID JSON."#
        .into(),
      validation_template: r#"I need to validate a user's code solution for a programming problem.

Problem Title: {title}
Problem Description: {description}
Programming Language: {language}

{reference_block}
User's Code:
```{language}
{code}
```

Please evaluate the code and respond with a JSON object containing the following fields:
1. "isValid" (boolean): Whether the code is a valid solution to the problem
2. "output" (string): The simulated output of the code when executed with reasonable test cases
3. "error" (string or null): Any syntax errors or runtime errors in the code
4. "feedback" (string): Constructive feedback on the solution. Mention what's good and what could be improved.

Return ONLY the JSON object, nothing else."#
        .into(),
      optimization_template: r#"I need optimization suggestions for the following code solution to a programming problem.

Problem Title: {title}
Problem Description: {description}
Programming Language: {language}

User's Code:
```{language}
{code}
```

Please analyze this code and provide suggestions for optimizing it in terms of:
1. Time Complexity
2. Space Complexity
3. Code Readability
4. Best Practices for {language}

Respond with a JSON object containing a single field:
"optimizationFeedback": A detailed string with your optimization suggestions, potential improvements, and explanations.

Return ONLY the JSON object, nothing else."#
        .into(),
    }
  }
}

/// Attempt to load `AppConfig` from PROMPTS_CONFIG_PATH. On any parsing/IO
/// error, returns None and the built-in defaults apply.
pub fn load_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("PROMPTS_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "codequest_backend", %path, "Loaded prompt config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "codequest_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "codequest_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_templates_keep_their_placeholders() {
    let p = Prompts::default();
    for key in ["{count}", "{language}", "{topics}", "{difficulties}", "{extra_instructions}"] {
      assert!(p.generation_template.contains(key), "missing {key}");
    }
    assert!(p.validation_template.contains("{reference_block}"));
    assert!(p.optimization_template.contains("{code}"));
  }

  #[test]
  fn missing_prompts_table_uses_defaults() {
    let cfg: AppConfig = toml::from_str("").expect("empty config");
    assert!(cfg.prompts.generation_template.contains("JSON array"));
  }
}
