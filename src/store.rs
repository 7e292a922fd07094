//! Client progress store: generated problems, saved problems, daily
//! progress/streak counters, and the filter working state.
//!
//! The store owns the single persisted blob and read-modify-writes it as
//! a whole through an injected [`StatePort`] on every mutation. Problem
//! generation goes through an injected [`ProblemSource`] so the store is
//! testable without a network (and without a real storage backend).
//!
//! Concurrency note: rapid interleaved mutations are a classic
//! read-modify-write race on the blob and overlapping generate calls are
//! last-write-wins. Intended use is single-user, single-tab; no locking.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::catalog::{topics_for, LANGUAGES};
use crate::domain::{
  DailyChallenge, Difficulty, Filters, LearningFocus, PersistedState, Problem, UserProgress,
};
use crate::protocol::GenerateRequest;

/// Fixed key under which browser-side embedders keep the blob.
pub const STORAGE_KEY: &str = "codequest-storage";

/// Persistence port for the single state blob.
pub trait StatePort {
  fn load(&self) -> Option<PersistedState>;
  fn save(&self, state: &PersistedState);
}

impl<P: StatePort + ?Sized> StatePort for Arc<P> {
  fn load(&self) -> Option<PersistedState> {
    (**self).load()
  }
  fn save(&self, state: &PersistedState) {
    (**self).save(state)
  }
}

/// In-memory port: serializes the blob like a real key-value store would,
/// so tests exercise the same whole-blob semantics.
#[derive(Default)]
pub struct MemoryPort {
  blob: Mutex<Option<String>>,
}

impl StatePort for MemoryPort {
  fn load(&self) -> Option<PersistedState> {
    let guard = self.blob.lock().ok()?;
    guard.as_deref().and_then(|s| serde_json::from_str(s).ok())
  }

  fn save(&self, state: &PersistedState) {
    if let (Ok(mut guard), Ok(s)) = (self.blob.lock(), serde_json::to_string(state)) {
      *guard = Some(s);
    }
  }
}

/// Where generated problems come from (the HTTP endpoint in production,
/// a fake in tests).
pub trait ProblemSource {
  async fn generate(&self, req: &GenerateRequest) -> Result<Vec<Problem>, String>;
}

/// Store-local failures. Surfaced to the user as notifications; they
/// never reach the network layer.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
  #[error("Please select at least one topic and difficulty level.")]
  EmptySelection,
  #[error("Invalid problem index")]
  InvalidIndex,
  #[error("{0}")]
  Source(String),
}

/// Incremental update to the filter form. `None` leaves a field alone;
/// the nested options distinguish "clear" from "leave".
#[derive(Clone, Debug, Default)]
pub struct FilterPatch {
  pub language: Option<String>,
  pub topics: Option<Vec<String>>,
  pub difficulty: Option<Vec<Difficulty>>,
  pub custom_instructions: Option<String>,
  pub num_questions: Option<u32>,
  pub learning_focus: Option<Option<LearningFocus>>,
  pub framework_name: Option<Option<String>>,
}

pub struct ProgressStore<S: ProblemSource, P: StatePort> {
  source: S,
  port: P,
  pub filters: Filters,
  state: PersistedState,
}

impl<S: ProblemSource, P: StatePort> ProgressStore<S, P> {
  /// Load the blob (or start fresh) and apply the daily reset: a new day
  /// zeroes `daily_completed` without touching the streak.
  pub fn new(source: S, port: P) -> Self {
    Self::new_on(source, port, Local::now().date_naive())
  }

  fn new_on(source: S, port: P, today: NaiveDate) -> Self {
    let mut state = port.load().unwrap_or_else(|| PersistedState::fresh(today));
    if apply_daily_reset(&mut state.progress, today) {
      info!(target: "store", "New day: daily counter reset");
      port.save(&state);
    }
    Self { source, port, filters: Filters::default(), state }
  }

  pub fn problems(&self) -> &[Problem] {
    &self.state.problems
  }

  pub fn saved_problems(&self) -> &[Problem] {
    &self.state.saved_problems
  }

  pub fn progress(&self) -> &UserProgress {
    &self.state.progress
  }

  pub fn dark_mode(&self) -> bool {
    self.state.dark_mode
  }

  fn persist(&self) {
    self.port.save(&self.state);
  }

  /// Shallow-merge into the working filters. Changing the language clears
  /// topics and the framework; moving the learning focus away from
  /// framework-specific clears the framework.
  pub fn set_filters(&mut self, patch: FilterPatch) {
    if let Some(language) = patch.language {
      if language != self.filters.language {
        self.filters.topics.clear();
        self.filters.framework_name = None;
      }
      self.filters.language = language;
    }
    if let Some(focus) = patch.learning_focus {
      if focus != Some(LearningFocus::FrameworkSpecific) {
        self.filters.framework_name = None;
      }
      self.filters.learning_focus = focus;
    }
    if let Some(topics) = patch.topics {
      self.filters.topics = topics;
    }
    if let Some(difficulty) = patch.difficulty {
      self.filters.difficulty = difficulty;
    }
    if let Some(ci) = patch.custom_instructions {
      self.filters.custom_instructions = ci;
    }
    if let Some(n) = patch.num_questions {
      self.filters.num_questions = n;
    }
    if let Some(fw) = patch.framework_name {
      self.filters.framework_name = fw;
    }
  }

  fn request_from_filters(&self, count: u32) -> GenerateRequest {
    GenerateRequest {
      language: self.filters.language.clone(),
      topics: self.filters.topics.clone(),
      difficulty: self.filters.difficulty.clone(),
      custom_instructions: Some(self.filters.custom_instructions.clone()),
      count,
      learning_focus: self.filters.learning_focus,
      framework_name: self.filters.framework_name.clone(),
    }
  }

  /// Replace the whole problem list from the current filters. On failure
  /// the list is left untouched and the message is surfaced.
  #[instrument(level = "info", skip(self), fields(language = %self.filters.language))]
  pub async fn generate_problems(&mut self) -> Result<usize, StoreError> {
    if self.filters.topics.is_empty() || self.filters.difficulty.is_empty() {
      return Err(StoreError::EmptySelection);
    }
    let req = self.request_from_filters(self.filters.num_questions);
    let problems = self.source.generate(&req).await.map_err(StoreError::Source)?;
    let n = problems.len();
    self.state.problems = problems;
    self.persist();
    info!(target: "store", generated = n, "Problem list replaced");
    Ok(n)
  }

  /// Request exactly one new problem and replace only the given slot;
  /// every other entry keeps its UI state.
  #[instrument(level = "info", skip(self))]
  pub async fn regenerate_problem(&mut self, index: usize) -> Result<(), StoreError> {
    if index >= self.state.problems.len() {
      return Err(StoreError::InvalidIndex);
    }
    let req = self.request_from_filters(1);
    let mut problems = self.source.generate(&req).await.map_err(StoreError::Source)?;
    if problems.is_empty() {
      return Err(StoreError::Source("Failed to generate a new problem".into()));
    }
    self.state.problems[index] = problems.remove(0);
    self.persist();
    Ok(())
  }

  /// Random language/topics/difficulty/count, overwriting those filter
  /// fields, then a full regeneration with a canned fun instruction. The
  /// request deliberately omits learning focus and framework.
  #[instrument(level = "info", skip(self))]
  pub async fn surprise_me(&mut self) -> Result<usize, StoreError> {
    let (language, topics, difficulty, count) = sample_surprise();
    self.set_filters(FilterPatch {
      language: Some(language.clone()),
      topics: Some(topics.clone()),
      difficulty: Some(vec![difficulty]),
      num_questions: Some(count),
      ..FilterPatch::default()
    });

    let req = GenerateRequest {
      language,
      topics,
      difficulty: vec![difficulty],
      custom_instructions: Some("Make this fun and creative!".into()),
      count,
      learning_focus: None,
      framework_name: None,
    };
    let problems = self.source.generate(&req).await.map_err(StoreError::Source)?;
    let n = problems.len();
    self.state.problems = problems;
    self.persist();
    Ok(n)
  }

  /// Mark saved in the live list and add to the deduplicated saved list.
  pub fn save_problem(&mut self, problem: &Problem) {
    if let Some(p) = self.state.problems.iter_mut().find(|p| p.id == problem.id) {
      p.saved = true;
    }
    if !self.state.saved_problems.iter().any(|p| p.id == problem.id) {
      let mut copy = problem.clone();
      copy.saved = true;
      self.state.saved_problems.push(copy);
    }
    self.persist();
  }

  pub fn unsave_problem(&mut self, id: &str) {
    if let Some(p) = self.state.problems.iter_mut().find(|p| p.id == id) {
      p.saved = false;
    }
    self.state.saved_problems.retain(|p| p.id != id);
    self.persist();
  }

  /// Flip hint visibility. Silent no-op if the id is no longer present.
  pub fn toggle_hints(&mut self, id: &str) {
    if let Some(p) = self.state.problems.iter_mut().find(|p| p.id == id) {
      p.show_hints = !p.show_hints;
      self.persist();
    }
  }

  /// Advance by exactly one hint; a no-op at the last hint.
  pub fn show_next_hint(&mut self, id: &str) {
    if let Some(p) = self.state.problems.iter_mut().find(|p| p.id == id) {
      if p.hints.is_empty() || p.hint_index >= p.hints.len() - 1 {
        return;
      }
      p.hint_index += 1;
      self.persist();
    }
  }

  /// Reveal the solution and count it as today's completion. There is no
  /// real grading, so showing the solution is what advances the streak.
  pub fn show_solution(&mut self, id: &str) {
    self.show_solution_on(id, Local::now().date_naive());
  }

  fn show_solution_on(&mut self, id: &str, today: NaiveDate) {
    if let Some(p) = self.state.problems.iter_mut().find(|p| p.id == id) {
      p.show_solution = true;
    } else {
      warn!(target: "store", %id, "show_solution on a problem no longer in the list");
    }
    apply_completion(&mut self.state.progress, today);
    self.persist();
  }

  /// Completion/streak update without revealing anything.
  pub fn mark_completed(&mut self) {
    apply_completion(&mut self.state.progress, Local::now().date_naive());
    self.persist();
  }

  /// Pin a problem as the daily challenge until the next local midnight.
  pub fn set_daily_challenge(&mut self, problem: Problem) {
    self.state.daily_challenge =
      Some(DailyChallenge { problem, expires_at: next_local_midnight_millis() });
    self.persist();
  }

  /// Current daily challenge, clearing it (and persisting) once expired.
  pub fn daily_challenge(&mut self) -> Option<DailyChallenge> {
    let now = Local::now().timestamp_millis();
    if let Some(dc) = &self.state.daily_challenge {
      if dc.expires_at < now {
        self.state.daily_challenge = None;
        self.persist();
        return None;
      }
    }
    self.state.daily_challenge.clone()
  }

  pub fn set_dark_mode(&mut self, on: bool) {
    self.state.dark_mode = on;
    self.persist();
  }
}

/// Completion/streak transition, triggered by revealing a solution.
///
/// Same day: bump `daily_completed`, capped at `daily_total`. New day:
/// continue the streak if the last activity was yesterday, otherwise
/// restart it at 1; either way today starts with one completion.
pub fn apply_completion(progress: &mut UserProgress, today: NaiveDate) {
  let today_str = today.format("%Y-%m-%d").to_string();
  if progress.last_active_date == today_str {
    progress.daily_completed = (progress.daily_completed + 1).min(progress.daily_total);
    return;
  }

  let was_yesterday = NaiveDate::parse_from_str(&progress.last_active_date, "%Y-%m-%d")
    .ok()
    .zip(today.pred_opt())
    .map_or(false, |(last, yesterday)| last == yesterday);
  if was_yesterday {
    progress.streak += 1;
  } else {
    progress.streak = 1;
  }
  progress.last_active_date = today_str;
  progress.daily_completed = 1;
}

/// Startup reset: a new day zeroes the counter but leaves the streak
/// alone (streak mutation happens only on an actual completion).
pub fn apply_daily_reset(progress: &mut UserProgress, today: NaiveDate) -> bool {
  let today_str = today.format("%Y-%m-%d").to_string();
  if progress.last_active_date == today_str {
    return false;
  }
  progress.daily_completed = 0;
  progress.last_active_date = today_str;
  true
}

fn sample_surprise() -> (String, Vec<String>, Difficulty, u32) {
  let mut rng = rand::thread_rng();
  let language = LANGUAGES
    .choose(&mut rng)
    .copied()
    .unwrap_or("python")
    .to_string();
  let pool = topics_for(&language);

  // 1-3 draws; duplicate draws are dropped, not replaced.
  let num_topics = rng.gen_range(1..=3);
  let mut topics: Vec<String> = Vec::new();
  for _ in 0..num_topics {
    if let Some(t) = pool.choose(&mut rng) {
      if !topics.iter().any(|x| x == t) {
        topics.push(t.to_string());
      }
    }
  }

  let difficulty = Difficulty::ALL.choose(&mut rng).copied().unwrap_or_default();
  let count = rng.gen_range(1..=3);
  (language, topics, difficulty, count)
}

fn next_local_midnight_millis() -> i64 {
  Local::now()
    .date_naive()
    .succ_opt()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .and_then(|dt| dt.and_local_timezone(Local).earliest())
    .map(|dt| dt.timestamp_millis())
    .unwrap_or_default()
}
