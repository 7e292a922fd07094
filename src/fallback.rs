//! Static mock-problem tables and deterministic selection.
//!
//! Whenever the external provider is unavailable or its output cannot be
//! parsed, generation falls back to these hand-authored tables so the
//! endpoint never returns an error (and never returns zero problems).

use crate::domain::{Difficulty, Problem};
use crate::util::fresh_problem_id;

struct MockProblem {
  title: &'static str,
  description: &'static str,
  language: &'static str,
  difficulty: Difficulty,
  topics: &'static [&'static str],
  hints: &'static [&'static str],
  solution: &'static str,
}

impl MockProblem {
  fn to_problem(&self) -> Problem {
    Problem {
      id: fresh_problem_id(),
      title: self.title.to_string(),
      description: self.description.to_string(),
      language: self.language.to_string(),
      difficulty: self.difficulty,
      topics: self.topics.iter().map(|t| t.to_string()).collect(),
      hints: self.hints.iter().map(|h| h.to_string()).collect(),
      solution: self.solution.to_string(),
      show_hints: false,
      show_solution: false,
      hint_index: 0,
      saved: false,
    }
  }
}

const PYTHON_PROBLEMS: &[MockProblem] = &[
  MockProblem {
    title: "Sum of Even Numbers",
    description: "Write a function that takes a list of numbers as an argument and returns the sum of all the even numbers in the list.",
    language: "python",
    difficulty: Difficulty::Easy,
    topics: &["variables", "functions", "loops"],
    hints: &[
      "Define a function that takes a list parameter",
      "Initialize a variable to store the sum",
      "Loop through each number in the list",
      "Check if each number is even using the modulo operator (%)",
      "Add even numbers to your sum variable and return the final result",
    ],
    solution: r#"def sum_of_even_numbers(numbers):
    # Initialize sum variable
    even_sum = 0

    # Loop through each number
    for num in numbers:
        # Check if the number is even
        if num % 2 == 0:
            # Add to sum if even
            even_sum += num

    # Return the sum of even numbers
    return even_sum

# Example usage
print(sum_of_even_numbers([1, 2, 3, 4, 5, 6]))  # Output: 12 (2+4+6)"#,
  },
  MockProblem {
    title: "Count Vowels",
    description: "Write a function that takes a string as input and returns the count of vowels (a, e, i, o, u) in the string. Ignore case sensitivity.",
    language: "python",
    difficulty: Difficulty::Easy,
    topics: &["strings", "loops", "functions"],
    hints: &[
      "Define a function that accepts a string parameter",
      "Create a list or string containing all vowels",
      "Initialize a counter variable",
      "Loop through each character in the input string",
      "Check if the lowercase version of each character is in your vowels collection",
    ],
    solution: r#"def count_vowels(string):
    # Define vowels
    vowels = "aeiou"

    # Initialize counter
    count = 0

    # Check each character
    for char in string.lower():
        if char in vowels:
            count += 1

    return count

# Example usage
print(count_vowels("Hello World"))  # Output: 3 (e, o, o)"#,
  },
  MockProblem {
    title: "Fibonacci Sequence",
    description: "Write a function to generate the nth Fibonacci number. The Fibonacci sequence starts with 0 and 1, and each subsequent number is the sum of the two preceding ones.",
    language: "python",
    difficulty: Difficulty::Medium,
    topics: &["functions", "recursion", "algorithms"],
    hints: &[
      "Define a function that accepts an integer n",
      "Remember the base cases: fib(0) = 0 and fib(1) = 1",
      "For n >= 2, the Fibonacci number is the sum of the two preceding numbers",
      "You can use either recursion or iteration",
      "For better performance, consider using iteration or memoization",
    ],
    solution: r#"def fibonacci(n):
    # Base cases
    if n == 0:
        return 0
    elif n == 1:
        return 1

    # Initialize first two numbers
    a, b = 0, 1

    # Iterate to find the nth number
    for _ in range(2, n + 1):
        # Calculate next number
        a, b = b, a + b

    return b

# Example usage
print(fibonacci(10))  # Output: 55"#,
  },
];

const JAVASCRIPT_PROBLEMS: &[MockProblem] = &[
  MockProblem {
    title: "Array Sum",
    description: "Write a function that takes an array of numbers and returns the sum of all numbers in the array.",
    language: "javascript",
    difficulty: Difficulty::Easy,
    topics: &["arrays", "functions", "loops"],
    hints: &[
      "Define a function that accepts an array parameter",
      "Initialize a variable to store the sum",
      "Loop through each number in the array",
      "Add each number to your sum variable",
      "Return the final sum",
    ],
    solution: r#"function sumArray(numbers) {
  // Initialize sum variable
  let sum = 0;

  // Loop through each number in the array
  for (let i = 0; i < numbers.length; i++) {
    // Add the current number to the sum
    sum += numbers[i];
  }

  // Return the final sum
  return sum;
}

// Example usage
console.log(sumArray([1, 2, 3, 4, 5])); // Output: 15"#,
  },
  MockProblem {
    title: "Palindrome Checker",
    description: "Write a function that checks if a given string is a palindrome (reads the same backward as forward), ignoring case sensitivity and non-alphanumeric characters.",
    language: "javascript",
    difficulty: Difficulty::Medium,
    topics: &["strings", "functions", "algorithms"],
    hints: &[
      "Define a function that accepts a string parameter",
      "Clean the string by removing non-alphanumeric characters and converting to lowercase",
      "You can use a regular expression to remove non-alphanumeric characters",
      "Compare the cleaned string with its reverse",
      "To reverse a string, you can convert it to an array, reverse it, and join it back",
    ],
    solution: r#"function isPalindrome(str) {
  // Clean the string - remove non-alphanumeric and convert to lowercase
  const cleanStr = str.replace(/[^a-zA-Z0-9]/g, '').toLowerCase();

  // Reverse the string
  const reversedStr = cleanStr.split('').reverse().join('');

  // Check if the cleaned string equals its reverse
  return cleanStr === reversedStr;
}

// Example usage
console.log(isPalindrome("A man, a plan, a canal: Panama")); // Output: true
console.log(isPalindrome("Hello World")); // Output: false"#,
  },
  MockProblem {
    title: "Closure Counter",
    description: "Create a function that returns a counter function. The counter function, when called, should increment and return a count starting from zero.",
    language: "javascript",
    difficulty: Difficulty::Medium,
    topics: &["closures", "functions", "scope"],
    hints: &[
      "Define a function that will return another function",
      "Initialize a counter variable in the outer function",
      "The inner function should increment the counter and return its value",
      "The counter variable should be accessible to the inner function through closure",
      "Each call to the returned function should increment the counter",
    ],
    solution: r#"function createCounter() {
  // Initialize counter in the outer function's scope
  let count = 0;

  // Return a function that increments and returns the counter
  return function() {
    return count++;
  };
}

// Example usage
const counter = createCounter();
console.log(counter()); // Output: 0
console.log(counter()); // Output: 1
console.log(counter()); // Output: 2"#,
  },
];

const RUBY_PROBLEMS: &[MockProblem] = &[
  MockProblem {
    title: "Array Element Sum",
    description: "Write a method that takes an array of numbers and returns the sum of all the numbers in the array.",
    language: "ruby",
    difficulty: Difficulty::Easy,
    topics: &["arrays", "methods", "loops"],
    hints: &[
      "Define a method that takes an array as a parameter",
      "Use Ruby's enumerable methods to iterate through the array",
      "The reduce method can be used to accumulate values",
      "Alternatively, you can use a loop with a sum variable",
      "Return the final sum",
    ],
    solution: r#"def sum_array(numbers)
  # Using Ruby's reduce method to sum the array
  numbers.reduce(0) { |sum, num| sum + num }

  # Alternatively, you could use the sum method
  # numbers.sum
end

# Example usage
puts sum_array([1, 2, 3, 4, 5]) # Output: 15"#,
  },
  MockProblem {
    title: "Word Counter",
    description: "Write a method that takes a string and returns a hash with each word as a key and its frequency as the value.",
    language: "ruby",
    difficulty: Difficulty::Medium,
    topics: &["hashes", "strings", "methods"],
    hints: &[
      "Define a method that takes a string parameter",
      "Split the string into words using the split method",
      "Initialize an empty hash to store word counts",
      "Iterate through each word and update its count in the hash",
      "You can use the each_with_object method or a simple each loop",
    ],
    solution: r#"def word_count(string)
  # Split the string into words
  words = string.downcase.split

  # Count occurrences of each word
  counts = Hash.new(0)

  words.each do |word|
    counts[word] += 1
  end

  counts
end

# Example usage
puts word_count("hello world hello ruby").inspect
# Output: {"hello"=>2, "world"=>1, "ruby"=>1}"#,
  },
];

fn table_for(language: &str) -> &'static [MockProblem] {
  match language.to_lowercase().as_str() {
    "python" => PYTHON_PROBLEMS,
    "javascript" => JAVASCRIPT_PROBLEMS,
    "ruby" => RUBY_PROBLEMS,
    // Any other language falls back to the python table.
    _ => PYTHON_PROBLEMS,
  }
}

/// Deterministic selection, no network.
///
/// Filters the per-language table by difficulty membership, then by topic
/// intersection. If filtering empties the candidate set, the filters are
/// dropped and the unfiltered table applies instead. Problems are taken in
/// table order up to `count`; when `count` exceeds the candidates, the
/// table is cycled with a " (Variation N)" title suffix, N counting the
/// completed cycles. The result always holds exactly `count` problems.
pub fn mock_problems(
  language: &str,
  topics: &[String],
  difficulties: &[Difficulty],
  count: usize,
) -> Vec<Problem> {
  let table = table_for(language);
  let mut candidates: Vec<&MockProblem> = table.iter().collect();

  if !difficulties.is_empty() {
    candidates.retain(|p| difficulties.contains(&p.difficulty));
  }
  if !topics.is_empty() {
    candidates.retain(|p| p.topics.iter().any(|t| topics.iter().any(|q| q == t)));
  }
  if candidates.is_empty() {
    candidates = table.iter().collect();
  }

  let mut out: Vec<Problem> = candidates.iter().take(count).map(|p| p.to_problem()).collect();
  while out.len() < count {
    let idx = out.len() % candidates.len();
    let cycle = out.len() / candidates.len();
    let mut p = candidates[idx].to_problem();
    p.title = format!("{} (Variation {})", p.title, cycle);
    out.push(p);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strs(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn returns_exactly_count_problems_with_variations() {
    // Full python table has 3 entries; asking for 5 cycles once.
    let out = mock_problems("python", &[], &[], 5);
    assert_eq!(out.len(), 5);
    assert_eq!(out[3].title, "Sum of Even Numbers (Variation 1)");
    assert_eq!(out[4].title, "Count Vowels (Variation 1)");
  }

  #[test]
  fn variation_counter_advances_per_completed_cycle() {
    // Filtered table: 2 easy python problems mention "loops".
    let out = mock_problems("python", &strs(&["loops"]), &[Difficulty::Easy], 5);
    assert_eq!(out.len(), 5);
    assert_eq!(out[2].title, "Sum of Even Numbers (Variation 1)");
    assert_eq!(out[3].title, "Count Vowels (Variation 1)");
    assert_eq!(out[4].title, "Sum of Even Numbers (Variation 2)");
  }

  #[test]
  fn impossible_difficulty_reverts_to_unfiltered_table() {
    // The python table has no hard entries; the filter must not empty the set.
    let out = mock_problems("python", &[], &[Difficulty::Hard], 3);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].title, "Sum of Even Numbers");
  }

  #[test]
  fn impossible_topic_reverts_to_unfiltered_table() {
    let out = mock_problems("ruby", &strs(&["monads"]), &[], 2);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].language, "ruby");
  }

  #[test]
  fn unknown_language_uses_python_table() {
    let out = mock_problems("haskell", &[], &[], 1);
    assert_eq!(out[0].language, "python");
  }

  #[test]
  fn selected_problems_carry_fresh_ui_state() {
    let out = mock_problems("javascript", &[], &[], 2);
    for p in &out {
      assert!(!p.id.is_empty());
      assert!(!p.show_hints && !p.show_solution && !p.saved);
      assert_eq!(p.hint_index, 0);
      assert_eq!(p.hints.len(), 5);
    }
    assert_ne!(out[0].id, out[1].id);
  }
}
