use serde::{Deserialize, Serialize};

/// One scheduled talk or activity with timing, format, language and speaker
/// metadata, as delivered by the remote session API.
///
/// `start_time` and `start_slot` are kept as the ISO-8601 strings the API
/// sends; the pipeline orders and buckets them by string comparison.
/// `favorite` is derived from the favorites list on every pipeline run and is
/// never trusted from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub title: String,
    pub format: SessionFormat,
    pub language: Language,
    pub start_time: String,
    pub start_slot: String,
    #[serde(default)]
    pub room: Option<String>,
    pub length: u32,
    #[serde(default)]
    pub speakers: Vec<Speaker>,
    #[serde(skip_deserializing)]
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
}

/// Session format as published by the API. Formats the service does not know
/// about decode to `Other` instead of failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionFormat {
    Presentation,
    LightningTalk,
    Workshop,
    #[serde(other)]
    Other,
}

/// Spoken language of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    No,
    En,
}

impl Language {
    /// Parse a selector parameter value ("no" / "en").
    pub fn parse_param(value: &str) -> Option<Self> {
        match value {
            "no" => Some(Language::No),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

/// The format axis of the filter state. Unlike `SessionFormat` this also
/// carries the "favorites" choice, which selects on the favorites list
/// rather than on a format value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatSelector {
    Presentation,
    LightningTalk,
    Favorites,
}

impl FormatSelector {
    /// Parse a selector parameter value.
    pub fn parse_param(value: &str) -> Option<Self> {
        match value {
            "presentation" => Some(FormatSelector::Presentation),
            "lightning-talk" => Some(FormatSelector::LightningTalk),
            "favorites" => Some(FormatSelector::Favorites),
            _ => None,
        }
    }
}

/// The three independent optional selectors narrowing the visible program.
///
/// Each axis is `None` when unset. The state is initialized to all-unset per
/// visitor and lives in the ephemeral selector store for the lifetime of the
/// process only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub day: Option<String>,
    pub language: Option<Language>,
    pub format: Option<FormatSelector>,
}

/// Pipeline output: the two day partitions, already sorted and bucketed,
/// plus the per-format counts surfaced next to the format selector.
///
/// This is the whole contract handed to presentation code; consumers must
/// not re-filter or re-sort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramView {
    pub wednesday: Vec<TimeSlot>,
    pub thursday: Vec<TimeSlot>,
    pub counts: FormatCounts,
}

/// One fixed start-time bucket within a day. Buckets with no sessions are
/// never emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSlot {
    pub start: String,
    pub sessions: Vec<Session>,
}

/// Session counts per format choice, computed over the day+language-filtered
/// set before the format filter itself is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormatCounts {
    pub all: usize,
    pub presentations: usize,
    pub lightning_talks: usize,
    pub favorites: usize,
}
