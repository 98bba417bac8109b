//! Leaf conditions and codec allow-lists for device profiles.
//!
//! A [`ProfileCondition`] compares one numeric (or boolean-as-numeric)
//! property of a candidate stream against a string-encoded literal. A
//! [`CodecProfile`] groups conditions with a comma-separated codec
//! allow-list; an empty list is a wildcard.

use serde::{Deserialize, Serialize};

/// Comparison applied by a [`ProfileCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    Equals,
    NotEquals,
    LessThanEqual,
    GreaterThanEqual,
}

/// Stream or file property a condition inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionProperty {
    AudioChannels,
    AudioBitrate,
    AudioProfile,
    Filesize,
    Width,
    Height,
    Has64BitOffsets,
    VideoBitDepth,
    VideoBitrate,
    VideoFramerate,
    VideoLevel,
    VideoProfile,
}

/// Which stream kind a [`CodecProfile`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecType {
    Video,
    VideoAudio,
    Audio,
}

/// A single comparison a candidate stream must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCondition {
    pub condition: ConditionType,
    pub property: ConditionProperty,
    /// Literal to compare against, string-encoded as profiles store it.
    pub value: String,
    /// Required conditions are hard filters; optional ones are preference
    /// signals. That policy lives with the caller.
    #[serde(default = "default_true")]
    pub is_required: bool,
}

fn default_true() -> bool {
    true
}

impl ProfileCondition {
    /// Evaluate this condition against an actual property value, with
    /// booleans encoded as 0/1.
    ///
    /// An unparseable literal never matches.
    pub fn evaluate(&self, actual: f64) -> bool {
        let Some(expected) = parse_literal(&self.value) else {
            return false;
        };
        match self.condition {
            ConditionType::Equals => actual == expected,
            ConditionType::NotEquals => actual != expected,
            ConditionType::LessThanEqual => actual <= expected,
            ConditionType::GreaterThanEqual => actual >= expected,
        }
    }
}

/// Parse a condition literal: a decimal number, or `true`/`false` as 1/0.
fn parse_literal(value: &str) -> Option<f64> {
    if let Ok(number) = value.trim().parse::<f64>() {
        return Some(number);
    }
    match value.trim().to_lowercase().as_str() {
        "true" => Some(1.0),
        "false" => Some(0.0),
        _ => None,
    }
}

/// Conditions plus a codec allow-list for one stream kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecProfile {
    #[serde(rename = "type")]
    pub codec_type: CodecType,

    #[serde(default)]
    pub conditions: Vec<ProfileCondition>,

    /// Comma-separated codec allow-list; empty or absent matches every
    /// codec.
    #[serde(default)]
    pub codec: Option<String>,
}

impl CodecProfile {
    /// The parsed allow-list: comma-separated, entries trimmed, blanks
    /// discarded.
    pub fn codecs(&self) -> Vec<String> {
        self.codec
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|codec| !codec.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// True when the allow-list is empty (wildcard) or contains `codec`
    /// case-insensitively.
    pub fn contains_codec(&self, codec: &str) -> bool {
        let codecs = self.codecs();
        codecs.is_empty() || codecs.iter().any(|c| c.eq_ignore_ascii_case(codec))
    }
}
