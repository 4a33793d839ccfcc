//! Bundled example graphs in the text input format.

use crate::error::{Error, Result};

/// A named example graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "diamond",
        description: "Two paths from A that meet again at D",
        source: "A -> B\nA -> C\nB -> D\nC -> D\n",
    },
    Preset {
        name: "cycle",
        description: "Three vertices in a ring; no order exists",
        source: "A -> B\nB -> C\nC -> A\n",
    },
    Preset {
        name: "disconnected",
        description: "One edge plus two isolated vertices",
        source: "E -> F\nX\nY\n",
    },
    Preset {
        name: "self-loop",
        description: "A single vertex depending on itself",
        source: "A -> A\n",
    },
    Preset {
        name: "courses",
        description: "Course prerequisites for a two-year curriculum",
        source: "\
# prerequisite -> course
intro-programming -> data-structures
intro-programming -> discrete-math
discrete-math -> algorithms
data-structures -> algorithms
data-structures -> databases
algorithms -> compilers
computer-architecture -> operating-systems
data-structures -> operating-systems
operating-systems -> distributed-systems
databases -> distributed-systems
",
    },
    Preset {
        name: "build",
        description: "Build steps of a small project",
        source: "\
fetch -> configure
configure -> compile
codegen -> compile
compile -> link
compile -> test
link -> package
test -> package
docs
",
    },
];

/// Look up a preset by name.
pub fn get(name: &str) -> Result<&'static Preset> {
    PRESETS
        .iter()
        .find(|preset| preset.name == name)
        .ok_or_else(|| Error::UnknownPreset {
            name: name.to_string(),
            available: names(),
        })
}

pub fn names() -> Vec<&'static str> {
    PRESETS.iter().map(|preset| preset.name).collect()
}
