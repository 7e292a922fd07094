//! Domain models shared by the generation service and the progress store.

use serde::{Deserialize, Serialize};

/// Difficulty levels a problem can carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  #[default]
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }

  pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

/// Instructional emphasis that selects one canned paragraph in the
/// generation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LearningFocus {
  DataStructuresAlgorithms,
  JobPreparation,
  BasicLearning,
  FrameworkSpecific,
}

impl LearningFocus {
  /// Human-readable form used when embedding the focus in prose
  /// ("data-structures-algorithms" -> "data structures algorithms").
  pub fn as_prose(&self) -> &'static str {
    match self {
      LearningFocus::DataStructuresAlgorithms => "data structures algorithms",
      LearningFocus::JobPreparation => "job preparation",
      LearningFocus::BasicLearning => "basic learning",
      LearningFocus::FrameworkSpecific => "framework specific",
    }
  }
}

/// A coding practice problem plus its UI-only presentation state.
/// Uniqueness of `id` is best-effort (timestamp + random suffix).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
  pub id: String,
  pub title: String,
  pub description: String,
  pub language: String,
  pub difficulty: Difficulty,
  pub topics: Vec<String>,
  pub hints: Vec<String>,
  pub solution: String,

  // UI state
  pub show_hints: bool,
  pub show_solution: bool,
  pub hint_index: usize,
  pub saved: bool,
}

/// Long-lived client working state, mutated incrementally by the filter form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
  pub language: String,
  pub topics: Vec<String>,
  pub difficulty: Vec<Difficulty>,
  pub custom_instructions: String,
  pub num_questions: u32,
  pub learning_focus: Option<LearningFocus>,
  pub framework_name: Option<String>,
}

impl Default for Filters {
  fn default() -> Self {
    Self {
      language: "python".into(),
      topics: vec!["variables".into(), "loops".into(), "functions".into()],
      difficulty: vec![Difficulty::Easy],
      custom_instructions: String::new(),
      num_questions: 2,
      learning_focus: Some(LearningFocus::BasicLearning),
      framework_name: None,
    }
  }
}

/// Daily completion counters and the streak of consecutive active days.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
  pub daily_completed: u32,
  pub daily_total: u32,
  pub streak: u32,
  /// ISO calendar date (no time component), e.g. "2026-08-25".
  pub last_active_date: String,
}

impl UserProgress {
  pub fn fresh(today: chrono::NaiveDate) -> Self {
    Self {
      daily_completed: 0,
      daily_total: 10,
      streak: 0,
      last_active_date: today.format("%Y-%m-%d").to_string(),
    }
  }
}

/// A pinned problem that expires at the next local midnight.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
  pub problem: Problem,
  /// Epoch milliseconds.
  pub expires_at: i64,
}

/// The single persisted blob. Read-modify-written as a whole on every
/// change; there are no partial updates.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
  pub problems: Vec<Problem>,
  pub saved_problems: Vec<Problem>,
  pub daily_challenge: Option<DailyChallenge>,
  pub progress: UserProgress,
  pub dark_mode: bool,
}

impl PersistedState {
  pub fn fresh(today: chrono::NaiveDate) -> Self {
    Self {
      problems: Vec::new(),
      saved_problems: Vec::new(),
      daily_challenge: None,
      progress: UserProgress::fresh(today),
      dark_mode: false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn difficulty_uses_lowercase_wire_names() {
    assert_eq!(serde_json::to_string(&Difficulty::Medium).ok().as_deref(), Some("\"medium\""));
    let d: Difficulty = serde_json::from_str("\"hard\"").expect("parse");
    assert_eq!(d, Difficulty::Hard);
  }

  #[test]
  fn learning_focus_uses_kebab_case() {
    let f: LearningFocus = serde_json::from_str("\"data-structures-algorithms\"").expect("parse");
    assert_eq!(f, LearningFocus::DataStructuresAlgorithms);
  }

  #[test]
  fn persisted_state_round_trips_camel_case() {
    let state = PersistedState::fresh(chrono::NaiveDate::from_ymd_opt(2026, 8, 25).expect("date"));
    let json = serde_json::to_value(&state).expect("serialize");
    assert!(json.get("savedProblems").is_some());
    assert!(json.get("darkMode").is_some());
    assert_eq!(json["progress"]["lastActiveDate"], "2026-08-25");
  }
}
