//! Keyword match scoring.
//!
//! A record's score is the percentage of keyword terms that appear as plain
//! substrings of its lowercased title, description and tags. No tokenization,
//! stemming or word boundaries are involved.

use crate::models::job::JobRecord;

/// Splits a comma-separated keyword string into lowercased, trimmed, non-empty terms.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Scores `job` against already-parsed `keywords`. An empty keyword list scores 0.
pub fn match_score(job: &JobRecord, keywords: &[String]) -> u8 {
    if keywords.is_empty() {
        return 0;
    }

    let haystack = job.haystack();
    let matches = keywords
        .iter()
        .filter(|term| haystack.contains(term.as_str()))
        .count();

    let percent = (matches as f64 / keywords.len() as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Annotates every record with its score against `raw_keywords`.
pub fn score_all(jobs: Vec<JobRecord>, raw_keywords: &str) -> Vec<JobRecord> {
    let keywords = parse_keywords(raw_keywords);
    jobs.into_iter()
        .map(|mut job| {
            job.match_score = Some(match_score(&job, &keywords));
            job
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobBoard;
    use crate::sources::testing::job;

    fn record(title: &str, description: &str, tags: &[&str]) -> JobRecord {
        let mut record = job(JobBoard::RemoteOk, "1", title);
        record.description = description.to_string();
        record.tags = tags.iter().map(|t| t.to_string()).collect();
        record
    }

    #[test]
    fn test_parse_keywords_trims_lowercases_and_drops_blanks() {
        assert_eq!(
            parse_keywords(" Python,  REMOTE ,, ,rust"),
            vec!["python", "remote", "rust"]
        );
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" , ,").is_empty());
    }

    #[test]
    fn test_all_terms_in_title_scores_100() {
        let job = record("Remote Python Engineer", "", &[]);
        assert_eq!(match_score(&job, &parse_keywords("python, remote")), 100);
    }

    #[test]
    fn test_partial_match_rounds() {
        let job = record("Rust Developer", "", &[]);
        // 1 of 3 → 33.33 → 33
        assert_eq!(match_score(&job, &parse_keywords("rust, go, java")), 33);
        // 2 of 3 → 66.67 → 67
        assert_eq!(match_score(&job, &parse_keywords("rust, developer, java")), 67);
    }

    #[test]
    fn test_half_rounds_up() {
        let job = record("a b c d e f g h", "", &[]);
        let keywords = parse_keywords("a, x1, x2, x3, x4, x5, x6, x7");
        // 1 of 8 → 12.5 → 13
        assert_eq!(match_score(&job, &keywords), 13);
    }

    #[test]
    fn test_tags_and_description_count() {
        let job = record("Engineer", "Work with Kubernetes daily", &["AWS"]);
        assert_eq!(match_score(&job, &parse_keywords("kubernetes, aws")), 100);
    }

    #[test]
    fn test_substring_match_without_word_boundaries() {
        let job = record("JavaScript Wizard", "", &[]);
        assert_eq!(match_score(&job, &parse_keywords("java")), 100);
    }

    #[test]
    fn test_empty_keywords_score_zero() {
        let job = record("Anything", "at all", &["tag"]);
        assert_eq!(match_score(&job, &[]), 0);
        assert_eq!(match_score(&job, &parse_keywords(" ,, ")), 0);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let job = record("Chef", "", &[]);
        assert_eq!(match_score(&job, &parse_keywords("rust")), 0);
    }

    #[test]
    fn test_score_is_bounded_and_deterministic() {
        let job = record("rust rust rust", "rust", &["rust"]);
        let keywords = parse_keywords("rust, rust");
        let first = match_score(&job, &keywords);
        assert_eq!(first, 100);
        assert_eq!(first, match_score(&job, &keywords));
    }

    #[test]
    fn test_score_all_annotates_every_record() {
        let jobs = vec![record("Rust", "", &[]), record("Go", "", &[])];
        let scored = score_all(jobs, "rust");
        assert_eq!(scored[0].match_score, Some(100));
        assert_eq!(scored[1].match_score, Some(0));
    }
}
