use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapModule {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub title: String,
    #[serde(default)]
    pub modules: Vec<RoadmapModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapTrack {
    pub phases: Vec<RoadmapPhase>,
}

/// Contents of `roadmaps.json`: tracks keyed by name (`web`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roadmaps(HashMap<String, RoadmapTrack>);

impl Roadmaps {
    pub fn track(&self, name: &str) -> Option<&RoadmapTrack> {
        self.0.get(name)
    }

    pub fn track_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Side of the timeline a phase is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseNode {
    pub index: usize,
    pub side: Side,
    pub phase: RoadmapPhase,
}

impl RoadmapTrack {
    pub fn nodes(&self) -> Vec<PhaseNode> {
        self.phases
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, phase)| PhaseNode {
                index,
                side: Side::for_index(index),
                phase,
            })
            .collect()
    }
}
