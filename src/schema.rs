use derive_more::{AsRef, Display, From};
use getset::Getters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Title cell of a page's results table, e.g. `NBA - 16/10/2018`.
#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct DateLabel(String);

/// Workbook tab name derived from a [`DateLabel`], e.g. `16-10-2018`.
/// Never contains a path separator.
#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct SheetName(String);

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct MatchTime(String);

#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct TeamName(String);

/// One side of a final score, kept as the verbatim cell text.
#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct Score(String);

impl From<&str> for DateLabel {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}
impl From<&str> for MatchTime {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}
impl From<&str> for TeamName {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}
impl From<&str> for Score {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

/// One game entry of a calendar page, in the column order of the output sheet.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct MatchRecord {
    time: MatchTime,
    home_team: TeamName,
    home_score: Score,
    away_score: Score,
    away_team: TeamName,
}
