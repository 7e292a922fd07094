//! Prompt construction and defensive response parsing.
//!
//! The model is asked for strict JSON, but replies routinely arrive
//! wrapped in prose or code fences. Parsing therefore runs a fixed
//! cascade: whole-text JSON parse, then extraction of the first balanced
//! JSON literal, then (for generation) the mock-problem fallback. The
//! user-visible outcome of a parse failure is always success.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::Prompts;
use crate::domain::{Difficulty, LearningFocus, Problem};
use crate::protocol::{GenerateRequest, OptimizeRequest, ValidateRequest};
use crate::util::{extract_json_array, extract_json_object, fill_template, fresh_problem_id};

const FOCUS_DSA: &str = "For data structures & algorithms focus: Create problems that emphasize algorithmic thinking, efficiency analysis, and common data structures like arrays, linked lists, trees, graphs, stacks, and queues. Include classic algorithm problems that teach problem-solving patterns.";

const FOCUS_JOB_PREP: &str = "For job preparation focus: Create problems commonly asked in technical interviews. Include problems that test fundamental concepts but also assess problem-solving abilities under pressure. Add real-world context to problems when possible.";

const FOCUS_BASIC: &str = "For basic learning focus: Create beginner-friendly problems that gradually introduce fundamental programming concepts. Include detailed explanations in hints and make sure solutions are well-commented and easy to understand.";

const FOCUS_FRAMEWORK: &str = "For framework-specific focus: Create problems that use the specified framework's features and patterns. Focus on real-world scenarios where the framework would typically be used. Include framework-specific APIs, methods and best practices in the solution.";

/// One canned paragraph per learning focus.
pub fn learning_focus_instructions(focus: Option<LearningFocus>) -> &'static str {
  match focus {
    Some(LearningFocus::DataStructuresAlgorithms) => FOCUS_DSA,
    Some(LearningFocus::JobPreparation) => FOCUS_JOB_PREP,
    Some(LearningFocus::BasicLearning) => FOCUS_BASIC,
    Some(LearningFocus::FrameworkSpecific) => FOCUS_FRAMEWORK,
    None => "",
  }
}

/// Render the generation prompt from the configured template.
pub fn build_generation_prompt(prompts: &Prompts, req: &GenerateRequest) -> String {
  let mut extra = Vec::new();
  if let Some(focus) = req.learning_focus {
    extra.push(format!("The problems should focus on {} learning.", focus.as_prose()));
  }
  if let Some(fw) = &req.framework_name {
    extra.push(format!("The problems should specifically relate to the {} framework.", fw));
  }
  if let Some(ci) = &req.custom_instructions {
    if !ci.is_empty() {
      extra.push(format!("Additional instructions: {}", ci));
    }
  }
  let focus_paragraph = learning_focus_instructions(req.learning_focus);
  if !focus_paragraph.is_empty() {
    extra.push(String::new());
    extra.push(focus_paragraph.to_string());
  }

  let topics = req.topics.join(", ");
  let difficulties =
    req.difficulty.iter().map(|d| d.as_str()).collect::<Vec<_>>().join(", ");

  fill_template(
    &prompts.generation_template,
    &[
      ("count", &req.count.to_string()),
      ("language", &req.language),
      ("topics", &topics),
      ("difficulties", &difficulties),
      ("extra_instructions", &extra.join("\n")),
    ],
  )
}

/// Render the code-validation prompt from the configured template.
pub fn build_validation_prompt(prompts: &Prompts, req: &ValidateRequest) -> String {
  let reference_block = match &req.solution_code {
    Some(solution) if !solution.is_empty() => format!(
      "Reference Solution (for comparison only):\n```{}\n{}\n```\n",
      req.language, solution
    ),
    _ => String::new(),
  };
  fill_template(
    &prompts.validation_template,
    &[
      ("title", &req.problem_title),
      ("description", &req.problem_description),
      ("language", &req.language),
      ("reference_block", &reference_block),
      ("code", &req.code),
    ],
  )
}

/// Render the code-optimization prompt from the configured template.
pub fn build_optimization_prompt(prompts: &Prompts, req: &OptimizeRequest) -> String {
  fill_template(
    &prompts.optimization_template,
    &[
      ("title", &req.problem_title),
      ("description", &req.problem_description),
      ("language", &req.language),
      ("code", &req.code),
    ],
  )
}

/// Problem shape as the model emits it. Every field is defaulted so a
/// sparse object still passes; structural garbage fails the whole parse.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProblem {
  #[serde(default)]
  title: String,
  #[serde(default)]
  description: String,
  #[serde(default)]
  language: String,
  #[serde(default)]
  difficulty: Difficulty,
  #[serde(default)]
  topics: Vec<String>,
  #[serde(default)]
  hints: Vec<String>,
  #[serde(default)]
  solution: String,
}

/// Parse a model reply into decorated problems.
///
/// Cascade: whole text as JSON, then the first bracket-balanced array of
/// objects. The parsed value may be the array itself or an object with a
/// `problems` field. Anything else (including an empty array) yields None
/// and the caller falls back to mock selection.
pub fn parse_generated_problems(content: &str) -> Option<Vec<Problem>> {
  let value: serde_json::Value = match serde_json::from_str(content) {
    Ok(v) => v,
    Err(_) => {
      debug!(target: "generate", "Whole-text parse failed, extracting JSON array");
      serde_json::from_str(extract_json_array(content)?).ok()?
    }
  };

  let items = match value {
    serde_json::Value::Array(items) => items,
    serde_json::Value::Object(mut map) => match map.remove("problems") {
      Some(serde_json::Value::Array(items)) => items,
      _ => return None,
    },
    _ => return None,
  };
  if items.is_empty() {
    return None;
  }

  let mut problems = Vec::with_capacity(items.len());
  for item in items {
    let raw: RawProblem = serde_json::from_value(item).ok()?;
    problems.push(decorate(raw));
  }
  Some(problems)
}

/// Assign a fresh id and reset UI state before the problem leaves the server.
fn decorate(raw: RawProblem) -> Problem {
  Problem {
    id: fresh_problem_id(),
    title: raw.title,
    description: raw.description,
    language: raw.language,
    difficulty: raw.difficulty,
    topics: raw.topics,
    hints: raw.hints,
    solution: raw.solution,
    show_hints: false,
    show_solution: false,
    hint_index: 0,
    saved: false,
  }
}

/// Parse a free-text feedback reply into `T`: whole text first, then the
/// first brace-balanced object. None means the caller should answer with
/// its safe-default body.
pub fn parse_feedback_object<T: DeserializeOwned>(content: &str) -> Option<T> {
  if let Ok(v) = serde_json::from_str::<T>(content) {
    return Some(v);
  }
  debug!(target: "generate", "Whole-text parse failed, extracting JSON object");
  serde_json::from_str(extract_json_object(content)?).ok()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::protocol::ValidateOut;

  fn sample_request() -> GenerateRequest {
    serde_json::from_value(serde_json::json!({
      "language": "python",
      "topics": ["loops", "functions"],
      "difficulty": ["easy", "medium"],
      "count": 3,
      "learningFocus": "job-preparation",
      "frameworkName": "django",
      "customInstructions": "Use short names."
    }))
    .expect("request")
  }

  #[test]
  fn generation_prompt_embeds_all_parameters() {
    let prompt = build_generation_prompt(&Prompts::default(), &sample_request());
    assert!(prompt.contains("create 3 unique"));
    assert!(prompt.contains("python programming language"));
    assert!(prompt.contains("loops, functions"));
    assert!(prompt.contains("easy, medium"));
    assert!(prompt.contains("focus on job preparation learning"));
    assert!(prompt.contains("the django framework"));
    assert!(prompt.contains("Additional instructions: Use short names."));
    assert!(prompt.contains("For job preparation focus:"));
    assert!(prompt.contains("ONLY RETURN VALID JSON"));
  }

  #[test]
  fn generation_prompt_omits_absent_options() {
    let req: GenerateRequest = serde_json::from_value(serde_json::json!({
      "language": "ruby",
      "topics": ["blocks"],
      "difficulty": ["hard"],
      "count": 1
    }))
    .expect("request");
    let prompt = build_generation_prompt(&Prompts::default(), &req);
    assert!(!prompt.contains("should focus on"));
    assert!(!prompt.contains("framework"));
    assert!(!prompt.contains("Additional instructions"));
  }

  #[test]
  fn validation_prompt_includes_reference_solution_when_given() {
    let req: ValidateRequest = serde_json::from_value(serde_json::json!({
      "code": "print(1)",
      "language": "python",
      "problemTitle": "Print One",
      "problemDescription": "Print the number one.",
      "solutionCode": "print(1)"
    }))
    .expect("request");
    let prompt = build_validation_prompt(&Prompts::default(), &req);
    assert!(prompt.contains("Reference Solution (for comparison only):"));

    let without = ValidateRequest { solution_code: None, ..req };
    let prompt = build_validation_prompt(&Prompts::default(), &without);
    assert!(!prompt.contains("Reference Solution"));
  }

  #[test]
  fn direct_json_array_parses() {
    let content = r#"[{"title": "A", "difficulty": "medium", "hints": ["h1"]}]"#;
    let problems = parse_generated_problems(content).expect("problems");
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].title, "A");
    assert_eq!(problems[0].difficulty, Difficulty::Medium);
    assert!(!problems[0].show_hints && problems[0].hint_index == 0);
  }

  #[test]
  fn fenced_array_is_extracted() {
    let content = "Here are your problems:\n```json\n[{\"title\": \"B\"}]\n```";
    let problems = parse_generated_problems(content).expect("problems");
    assert_eq!(problems[0].title, "B");
  }

  #[test]
  fn problems_wrapped_object_is_accepted() {
    let content = r#"{"problems": [{"title": "C"}, {"title": "D"}]}"#;
    let problems = parse_generated_problems(content).expect("problems");
    assert_eq!(problems.len(), 2);
  }

  #[test]
  fn garbage_and_empty_replies_yield_none() {
    assert!(parse_generated_problems("I could not comply, sorry.").is_none());
    assert!(parse_generated_problems("[]").is_none());
    assert!(parse_generated_problems("{\"problems\": 42}").is_none());
  }

  #[test]
  fn each_problem_gets_a_distinct_fresh_id() {
    let content = r#"[{"title": "X"}, {"title": "Y"}]"#;
    let problems = parse_generated_problems(content).expect("problems");
    assert_ne!(problems[0].id, problems[1].id);
  }

  #[test]
  fn feedback_object_parses_with_and_without_prose() {
    let direct: ValidateOut =
      parse_feedback_object("{\"isValid\": true, \"feedback\": \"nice\"}").expect("direct");
    assert!(direct.is_valid);

    let wrapped: ValidateOut =
      parse_feedback_object("Verdict below.\n{\"isValid\": false, \"output\": \"7\"}")
        .expect("wrapped");
    assert!(!wrapped.is_valid);
    assert_eq!(wrapped.output, "7");

    assert!(parse_feedback_object::<ValidateOut>("no json at all").is_none());
  }
}
