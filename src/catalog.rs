//! Static catalog of supported languages and their topic lists.
//! Used by the surprise-me sampler and available to embedding UIs.

/// Languages the surprise-me sampler draws from.
pub const LANGUAGES: [&str; 8] = [
  "python",
  "javascript",
  "cpp",
  "java",
  "ruby",
  "go",
  "rust",
  "typescript",
];

const PYTHON_TOPICS: &[&str] = &[
  "variables", "loops", "functions", "dictionaries", "lists", "tuples", "sets", "classes",
  "exception handling", "file I/O", "lambdas", "comprehensions", "decorators", "generators",
  "context managers", "arrays", "linked lists", "stacks", "queues", "hash tables", "trees",
  "binary trees", "binary search trees", "heaps", "graphs", "sorting algorithms",
  "searching algorithms", "dynamic programming", "recursion", "backtracking",
  "greedy algorithms", "big O notation", "time complexity", "space complexity",
];

const JAVASCRIPT_TOPICS: &[&str] = &[
  "variables", "loops", "functions", "objects", "arrays", "DOM manipulation", "promises",
  "async/await", "closures", "event handling", "higher-order functions", "this keyword",
  "prototypes", "modules", "destructuring", "spread operator", "linked lists", "stacks",
  "queues", "hash tables", "trees", "binary trees", "binary search trees", "heaps", "graphs",
  "sorting algorithms", "searching algorithms", "dynamic programming", "recursion",
  "memoization", "backtracking", "greedy algorithms", "big O notation", "time complexity",
  "space complexity",
];

const CPP_TOPICS: &[&str] = &[
  "variables", "loops", "functions", "arrays", "pointers", "references", "classes", "templates",
  "STL", "memory management", "operator overloading", "inheritance", "polymorphism",
  "namespace", "exception handling", "smart pointers", "vectors", "linked lists", "stacks",
  "queues", "hash tables", "maps", "sets", "trees", "binary trees", "binary search trees",
  "heaps", "priority queues", "graphs", "sorting algorithms", "searching algorithms",
  "dynamic programming", "recursion", "backtracking", "greedy algorithms",
  "divide and conquer", "big O notation", "time complexity", "space complexity",
];

const JAVA_TOPICS: &[&str] = &[
  "variables", "loops", "methods", "arrays", "classes", "inheritance", "interfaces",
  "collections", "exception handling", "threads", "generics", "annotations",
  "lambda expressions", "streams", "IO operations", "serialization", "ArrayList", "LinkedList",
  "HashMap", "HashSet", "Stack", "Queue", "PriorityQueue", "trees", "binary trees",
  "binary search trees", "heaps", "graphs", "sorting algorithms", "searching algorithms",
  "dynamic programming", "recursion", "backtracking", "greedy algorithms",
  "divide and conquer", "big O notation", "time complexity", "space complexity",
];

const RUBY_TOPICS: &[&str] = &[
  "variables", "loops", "methods", "arrays", "hashes", "classes", "modules", "blocks", "procs",
  "metaprogramming", "symbols", "lambdas", "iterators", "mixins", "exception handling",
  "linked lists", "stacks", "queues", "hash tables", "trees", "binary trees",
  "binary search trees", "heaps", "graphs", "sorting algorithms", "searching algorithms",
  "dynamic programming", "recursion", "backtracking", "greedy algorithms", "big O notation",
  "time complexity", "space complexity",
];

const GO_TOPICS: &[&str] = &[
  "variables", "loops", "functions", "arrays", "slices", "maps", "structs", "interfaces",
  "goroutines", "channels", "error handling", "pointers", "defer statements",
  "type assertions", "type switches", "reflection", "linked lists", "stacks", "queues",
  "hash tables", "trees", "binary trees", "binary search trees", "heaps", "graphs",
  "sorting algorithms", "searching algorithms", "dynamic programming", "recursion",
  "backtracking", "greedy algorithms", "big O notation", "time complexity",
  "space complexity",
];

const RUST_TOPICS: &[&str] = &[
  "variables", "loops", "functions", "vectors", "structs", "enums", "traits",
  "pattern matching", "ownership", "lifetimes", "borrowing", "references", "modules",
  "error handling", "generics", "closures", "linked lists", "stacks", "queues", "hash tables",
  "trees", "binary trees", "binary search trees", "heaps", "graphs", "sorting algorithms",
  "searching algorithms", "dynamic programming", "recursion", "backtracking",
  "greedy algorithms", "big O notation", "time complexity", "space complexity",
];

const TYPESCRIPT_TOPICS: &[&str] = &[
  "variables", "loops", "functions", "interfaces", "classes", "generics", "enums",
  "type assertions", "decorators", "namespaces", "type annotations", "union types",
  "intersection types", "type guards", "utility types", "async/await", "arrays",
  "linked lists", "stacks", "queues", "hash tables", "trees", "binary trees",
  "binary search trees", "heaps", "graphs", "sorting algorithms", "searching algorithms",
  "dynamic programming", "recursion", "backtracking", "greedy algorithms", "big O notation",
  "time complexity", "space complexity",
];

/// Topic list for a language. Unknown languages fall back to python,
/// mirroring the generation fallback table.
pub fn topics_for(language: &str) -> &'static [&'static str] {
  match language.to_lowercase().as_str() {
    "python" => PYTHON_TOPICS,
    "javascript" => JAVASCRIPT_TOPICS,
    "cpp" => CPP_TOPICS,
    "java" => JAVA_TOPICS,
    "ruby" => RUBY_TOPICS,
    "go" => GO_TOPICS,
    "rust" => RUST_TOPICS,
    "typescript" => TYPESCRIPT_TOPICS,
    _ => PYTHON_TOPICS,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_language_has_topics() {
    for lang in LANGUAGES {
      assert!(!topics_for(lang).is_empty(), "no topics for {lang}");
    }
  }

  #[test]
  fn unknown_language_falls_back_to_python() {
    assert_eq!(topics_for("haskell"), topics_for("python"));
  }
}
