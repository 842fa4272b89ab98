//! Issue kind, activity and experience level patterns.

use crate::error::PatternError;
use crate::pattern::Pattern;
use crate::types::{ActivityLevel, ExperienceLevel, FilterCategory, IssueKind, MatchValue};

fn fixed(
  name: &str,
  category: FilterCategory,
  keywords: &[&str],
  value: MatchValue,
) -> Result<Pattern, PatternError> {
  Ok(Pattern::keywords(name, category, keywords)?.with_normalizer(move |_| Some(value.clone())))
}

pub fn issues() -> Result<Vec<Pattern>, PatternError> {
  let issue = |name: &str, keywords: &'static [&'static str], kind: IssueKind| {
    fixed(name, FilterCategory::Issue, keywords, MatchValue::Issue(kind))
  };
  Ok(vec![
    issue(
      "issue:good-first-issue",
      &["good first issue", "good first issues", "first timers only"],
      IssueKind::GoodFirstIssue,
    )?,
    issue("issue:help-wanted", &["help wanted"], IssueKind::HelpWanted)?,
    issue(
      "issue:bug",
      &["bug", "bugs", "bugfix", "bugfixes", "bug fix", "bug fixes"],
      IssueKind::Bug,
    )?,
    issue("issue:documentation", &["documentation", "docs"], IssueKind::Documentation)?,
    issue(
      "issue:enhancement",
      &["enhancement", "enhancements", "feature request", "feature requests"],
      IssueKind::Enhancement,
    )?,
  ])
}

/// Activity patterns. Negative phrases come first so that `not maintained`
/// and `inactive` are not read as `maintained` and `active`.
pub fn activity() -> Result<Vec<Pattern>, PatternError> {
  let activity = |name: &str, keywords: &'static [&'static str], level: ActivityLevel| {
    fixed(name, FilterCategory::Activity, keywords, MatchValue::Activity(level))
  };
  Ok(vec![
    activity(
      "activity:low",
      &[
        "no longer maintained",
        "not maintained",
        "unmaintained",
        "inactive",
        "dormant",
        "abandoned",
        "archived",
        "stale",
      ],
      ActivityLevel::Low,
    )?,
    activity(
      "activity:moderate",
      &["moderately active", "somewhat active", "occasionally updated", "moderate activity"],
      ActivityLevel::Moderate,
    )?,
    activity(
      "activity:high",
      &[
        "very active",
        "highly active",
        "actively maintained",
        "actively developed",
        "well maintained",
        "recently updated",
        "maintained",
        "active",
      ],
      ActivityLevel::High,
    )?,
  ])
}

pub fn experience() -> Result<Vec<Pattern>, PatternError> {
  let experience_level = |name: &str, keywords: &'static [&'static str], level: ExperienceLevel| {
    fixed(name, FilterCategory::Experience, keywords, MatchValue::Experience(level))
  };
  Ok(vec![
    experience_level(
      "experience:beginner",
      &[
        "beginner friendly",
        "beginner",
        "beginners",
        "newbie",
        "newbies",
        "novice",
        "novices",
        "first time contributors",
        "first time contributor",
        "first timers",
        "first timer",
        "newcomers",
        "newcomer",
        "entry level",
        "junior",
      ],
      ExperienceLevel::Beginner,
    )?,
    experience_level(
      "experience:intermediate",
      &["intermediate", "mid level"],
      ExperienceLevel::Intermediate,
    )?,
    experience_level(
      "experience:advanced",
      &["advanced", "experts", "expert", "experienced", "senior"],
      ExperienceLevel::Advanced,
    )?,
  ])
}

/// Words that hint at a level without naming it. Registered late and
/// weighted low.
pub fn experience_hints() -> Result<Vec<Pattern>, PatternError> {
  Ok(vec![
    fixed(
      "experience:easy",
      FilterCategory::Experience,
      &["easy", "simple", "starter"],
      MatchValue::Experience(ExperienceLevel::Beginner),
    )?
    .with_weight(0.5),
    fixed(
      "experience:hard",
      FilterCategory::Experience,
      &["challenging", "difficult", "complex", "hard"],
      MatchValue::Experience(ExperienceLevel::Advanced),
    )?
    .with_weight(0.5),
  ])
}
