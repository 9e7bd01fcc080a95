//! Output formatting for CLI

use crate::pipeline::{MatchResult, TrainingResult};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a count together with its share of the total
pub fn format_count(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print outcome counts of a training run
pub fn print_training_result(result: &TrainingResult) {
    print_kv("Episodes", &format_number(result.total_games));
    print_kv("X wins", &format_count(result.x_wins, result.x_win_rate));
    print_kv("O wins", &format_count(result.o_wins, result.o_win_rate));
    print_kv("Ties", &format_count(result.ties, result.tie_rate));
}

/// Print the score line of a match
pub fn print_match_result(result: &MatchResult) {
    print_kv("X", &result.x_learner);
    print_kv("O", &result.o_learner);
    print_kv("Games", &format_number(result.games));
    println!("\n{}", result.score_line());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(19_683), "19,683");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn counts_carry_their_percentage() {
        assert_eq!(format_count(25, 0.25), "25 (25.0%)");
    }
}
