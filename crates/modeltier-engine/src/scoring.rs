use once_cell::sync::Lazy;
use regex::Regex;

pub type Score = u64;

/// One step of the capability heuristic.
///
/// Rules are applied in list order and their bonuses add up. Order matters:
/// a `FirstMatch` group must list specific markers (`codex-max`,
/// `codex-mini`) before the generic marker they contain (`codex`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreRule {
    /// The first marker contained in the id adds its bonus; the rest of the
    /// group is skipped.
    FirstMatch(&'static [(&'static str, Score)]),
    /// Flat bonus when the id contains the marker.
    Contains(&'static str, Score),
    /// Flat bonus when the id starts with the marker.
    Prefix(&'static str, Score),
    /// First capture of `pattern` parsed as a decimal version, times
    /// `multiplier`, rounded.
    Version {
        pattern: &'static str,
        multiplier: f64,
    },
    /// Captures `(major, minor?)`; adds `major * major_weight + minor * minor_weight`.
    MajorMinor {
        pattern: &'static str,
        major_weight: Score,
        minor_weight: Score,
    },
}

pub const SCORE_RULES: &[ScoreRule] = &[
    ScoreRule::FirstMatch(&[
        ("opus", 1000),
        ("sonnet", 600),
        ("haiku", 200),
        ("pro", 500),
        ("flash", 250),
    ]),
    ScoreRule::FirstMatch(&[("codex-max", 400), ("codex-mini", 50), ("codex", 300)]),
    ScoreRule::Contains("thinking", 150),
    ScoreRule::Version {
        pattern: r"gpt-([0-9]+(?:\.[0-9]+)?)",
        multiplier: 80.0,
    },
    ScoreRule::Version {
        pattern: r"gemini-([0-9]+(?:\.[0-9]+)?)",
        multiplier: 60.0,
    },
    ScoreRule::MajorMinor {
        pattern: r"claude-(?:opus|sonnet|haiku)-([0-9]+)-?([0-9]+)?",
        major_weight: 20,
        minor_weight: 2,
    },
    ScoreRule::Contains("image", 10),
    ScoreRule::Prefix("gemini-claude", 50),
];

static BUILTIN_SCORER: Lazy<ModelScorer> =
    Lazy::new(|| ModelScorer::new(SCORE_RULES).expect("builtin score rules compile"));

#[derive(Debug, Clone)]
enum CompiledRule {
    FirstMatch(&'static [(&'static str, Score)]),
    Contains(&'static str, Score),
    Prefix(&'static str, Score),
    Version {
        regex: Regex,
        multiplier: f64,
    },
    MajorMinor {
        regex: Regex,
        major_weight: Score,
        minor_weight: Score,
    },
}

impl CompiledRule {
    fn compile(rule: &ScoreRule) -> Result<Self, regex::Error> {
        Ok(match *rule {
            ScoreRule::FirstMatch(group) => CompiledRule::FirstMatch(group),
            ScoreRule::Contains(marker, bonus) => CompiledRule::Contains(marker, bonus),
            ScoreRule::Prefix(marker, bonus) => CompiledRule::Prefix(marker, bonus),
            ScoreRule::Version {
                pattern,
                multiplier,
            } => CompiledRule::Version {
                regex: Regex::new(pattern)?,
                multiplier,
            },
            ScoreRule::MajorMinor {
                pattern,
                major_weight,
                minor_weight,
            } => CompiledRule::MajorMinor {
                regex: Regex::new(pattern)?,
                major_weight,
                minor_weight,
            },
        })
    }

    fn bonus(&self, id: &str) -> Score {
        match self {
            CompiledRule::FirstMatch(group) => group
                .iter()
                .find(|(marker, _)| id.contains(marker))
                .map(|(_, bonus)| *bonus)
                .unwrap_or(0),
            CompiledRule::Contains(marker, bonus) => {
                if id.contains(marker) {
                    *bonus
                } else {
                    0
                }
            }
            CompiledRule::Prefix(marker, bonus) => {
                if id.starts_with(marker) {
                    *bonus
                } else {
                    0
                }
            }
            CompiledRule::Version { regex, multiplier } => regex
                .captures(id)
                .and_then(|caps| caps.get(1))
                .and_then(|version| version.as_str().parse::<f64>().ok())
                .map(|version| (version * multiplier).round() as Score)
                .unwrap_or(0),
            CompiledRule::MajorMinor {
                regex,
                major_weight,
                minor_weight,
            } => {
                let Some(caps) = regex.captures(id) else {
                    return 0;
                };
                let major = caps.get(1).map(|m| parse_saturating(m.as_str())).unwrap_or(0);
                let minor = caps.get(2).map(|m| parse_saturating(m.as_str())).unwrap_or(0);
                major
                    .saturating_mul(*major_weight)
                    .saturating_add(minor.saturating_mul(*minor_weight))
            }
        }
    }
}

fn parse_saturating(digits: &str) -> Score {
    digits.parse::<Score>().unwrap_or(Score::MAX)
}

/// Maps a model id to an integer capability score. Total: any text scores,
/// unknown ids score 0.
#[derive(Debug, Clone)]
pub struct ModelScorer {
    rules: Vec<CompiledRule>,
}

impl ModelScorer {
    pub fn new(rules: &[ScoreRule]) -> Result<Self, regex::Error> {
        Ok(Self {
            rules: rules
                .iter()
                .map(CompiledRule::compile)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    pub fn builtin() -> &'static ModelScorer {
        &BUILTIN_SCORER
    }

    pub fn score(&self, id: &str) -> Score {
        self.rules
            .iter()
            .fold(0, |total: Score, rule| total.saturating_add(rule.bonus(id)))
    }
}

impl Default for ModelScorer {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

pub fn score_model(id: &str) -> Score {
    ModelScorer::builtin().score(id)
}

#[cfg(test)]
mod tests {
    use super::{score_model, ModelScorer, ScoreRule, SCORE_RULES};

    #[test]
    fn unknown_ids_score_zero() {
        assert_eq!(score_model(""), 0);
        assert_eq!(score_model("llama-3-70b"), 0);
        assert_eq!(score_model("💥 not a model"), 0);
    }

    #[test]
    fn newer_claude_versions_rank_higher() {
        let opus_46 = score_model("claude-opus-4-6");
        let opus_45 = score_model("claude-opus-4-5");
        let sonnet_45 = score_model("claude-sonnet-4-5");
        assert_eq!(opus_46, 1092);
        assert_eq!(opus_45, 1090);
        assert_eq!(sonnet_45, 690);
        assert!(opus_46 > opus_45 && opus_45 > sonnet_45);
    }

    #[test]
    fn family_bonus_takes_first_match_only() {
        // "opus" wins; the "pro" inside "preview-pro" is not added on top.
        assert_eq!(score_model("opus-preview-pro"), 1000);
        assert_eq!(score_model("x-pro"), 500);
        assert_eq!(score_model("x-flash"), 250);
        assert_eq!(score_model("x-haiku"), 200);
    }

    #[test]
    fn codex_variants_are_checked_before_generic_codex() {
        assert_eq!(score_model("codex-max"), 400);
        assert_eq!(score_model("codex"), 300);
        assert_eq!(score_model("codex-mini"), 50);
        assert!(score_model("gpt-5.1-codex-mini") < score_model("gpt-5.1-codex"));
        assert!(score_model("gpt-5.1-codex") < score_model("gpt-5.1-codex-max"));
    }

    #[test]
    fn gpt_and_gemini_versions_scale_with_multiplier() {
        assert_eq!(score_model("gpt-5"), 400);
        assert_eq!(score_model("gpt-5.1"), 408);
        assert_eq!(score_model("gpt-5.2"), 416);
        assert_eq!(score_model("gpt-5.2-codex"), 716);
        assert_eq!(score_model("gemini-2.5-flash"), 400);
        assert_eq!(score_model("gemini-3-pro-preview"), 680);
    }

    #[test]
    fn thinking_image_and_hybrid_bonuses_add_up() {
        assert_eq!(score_model("claude-sonnet-4-5-thinking"), 840);
        assert_eq!(score_model("gemini-2.5-flash-image"), 410);
        assert_eq!(score_model("gemini-claude-opus-4-5-thinking"), 1290);
    }

    #[test]
    fn claude_version_without_minor_uses_zero() {
        assert_eq!(score_model("claude-opus-4"), 1080);
        assert_eq!(score_model("claude-haiku-3"), 260);
    }

    #[test]
    fn dated_snapshot_suffix_counts_as_minor_version() {
        // The optional minor group also captures a date suffix.
        assert_eq!(
            score_model("claude-sonnet-4-20250514"),
            600 + 80 + 20_250_514 * 2
        );
    }

    #[test]
    fn oversized_numbers_saturate_instead_of_overflowing() {
        let id = format!("claude-opus-{}", "9".repeat(40));
        assert_eq!(score_model(&id), u64::MAX);
    }

    #[test]
    fn scoring_is_deterministic() {
        let ids = ["gpt-5.2-codex", "claude-opus-4-6", "gemini-3-flash", "x"];
        for id in ids {
            assert_eq!(score_model(id), score_model(id));
            assert_eq!(ModelScorer::default().score(id), score_model(id));
        }
    }

    #[test]
    fn rule_order_changes_overlapping_scores() {
        const GENERIC_FIRST: &[ScoreRule] = &[ScoreRule::FirstMatch(&[
            ("codex", 300),
            ("codex-mini", 50),
        ])];
        let generic_first = ModelScorer::new(GENERIC_FIRST).unwrap();
        assert_eq!(generic_first.score("codex-mini"), 300);
        assert_eq!(ModelScorer::new(SCORE_RULES).unwrap().score("codex-mini"), 50);
    }

    #[test]
    fn invalid_custom_pattern_is_rejected() {
        const BROKEN: &[ScoreRule] = &[ScoreRule::Version {
            pattern: "gpt-(",
            multiplier: 1.0,
        }];
        assert!(ModelScorer::new(BROKEN).is_err());
    }
}
