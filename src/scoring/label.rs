use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative tag for a lead score. Ordered from coldest to hottest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    Cold,
    Cool,
    Warm,
    Hot,
}

/// Display color token attached to each label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelColor {
    Red,
    Orange,
    Blue,
    Slate,
}

impl ScoreLabel {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreLabel::Hot
        } else if score >= 60 {
            ScoreLabel::Warm
        } else if score >= 40 {
            ScoreLabel::Cool
        } else {
            ScoreLabel::Cold
        }
    }

    pub fn color(self) -> LabelColor {
        match self {
            ScoreLabel::Hot => LabelColor::Red,
            ScoreLabel::Warm => LabelColor::Orange,
            ScoreLabel::Cool => LabelColor::Blue,
            ScoreLabel::Cold => LabelColor::Slate,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreLabel::Hot => "Hot",
            ScoreLabel::Warm => "Warm",
            ScoreLabel::Cool => "Cool",
            ScoreLabel::Cold => "Cold",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(ScoreLabel::Hot),
            "warm" => Ok(ScoreLabel::Warm),
            "cool" => Ok(ScoreLabel::Cool),
            "cold" => Ok(ScoreLabel::Cold),
            other => bail!("Unknown label '{}' (expected hot, warm, cool or cold)", other),
        }
    }
}

/// Label for a final lead score
pub fn score_label(score: u8) -> ScoreLabel {
    ScoreLabel::from_score(score)
}
