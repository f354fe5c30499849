// patterns.rs - Built-in library of canonical life-forms

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LifeError;
use crate::grid::Grid;
use crate::variants::Shape;

/// One phase of a named life-form, drawn with `O` for live cells.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub art: &'static [&'static str],
}

impl Pattern {
    pub fn shape(&self) -> Shape {
        Shape::from_art(self.art)
    }

    /// Clear `grid` and draw this pattern with its top-left corner at
    /// `(row, col)`. Cells falling off the board are dropped.
    pub fn apply(&self, grid: &mut Grid, row: usize, col: usize) {
        grid.clear();
        self.stamp(grid, row, col);
    }

    /// Draw this pattern's live cells onto `grid` without clearing it.
    pub fn stamp(&self, grid: &mut Grid, row: usize, col: usize) {
        for (r, line) in self.art.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                if ch == 'O' {
                    grid.set(row + r, col + c, true);
                }
            }
        }
    }
}

pub const BLOCK: Pattern = Pattern { name: "Block", art: &["OO", "OO"] };

pub const BEEHIVE: Pattern = Pattern {
    name: "Beehive",
    art: &[
        ".OO.",
        "O..O",
        ".OO.",
    ],
};

pub const BLINKER_1: Pattern = Pattern { name: "Blinker (phase 1)", art: &["OOO"] };

pub const BLINKER_2: Pattern = Pattern { name: "Blinker (phase 2)", art: &["O", "O", "O"] };

pub const TOAD_1: Pattern = Pattern {
    name: "Toad (phase 1)",
    art: &[
        ".OOO",
        "OOO.",
    ],
};

pub const TOAD_2: Pattern = Pattern {
    name: "Toad (phase 2)",
    art: &[
        "..O.",
        "O..O",
        "O..O",
        ".O..",
    ],
};

pub const GLIDER_1: Pattern = Pattern {
    name: "Glider (phase 1)",
    art: &[
        ".O.",
        "..O",
        "OOO",
    ],
};

pub const GLIDER_2: Pattern = Pattern {
    name: "Glider (phase 2)",
    art: &[
        "O.O",
        ".OO",
        ".O.",
    ],
};

pub const LWSS_1: Pattern = Pattern {
    name: "Lightweight spaceship (phase 1)",
    art: &[
        ".O..O",
        "O....",
        "O...O",
        "OOOO.",
    ],
};

pub const LWSS_2: Pattern = Pattern {
    name: "Lightweight spaceship (phase 2)",
    art: &[
        ".OO..",
        "OO.OO",
        ".OOOO",
        "..OO.",
    ],
};

pub const PATTERNS: &[Pattern] = &[
    BLOCK, BEEHIVE, BLINKER_1, BLINKER_2, TOAD_1, TOAD_2, GLIDER_1, GLIDER_2, LWSS_1, LWSS_2,
];

/// Family of life-forms searched for by an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PatternClass {
    StillLife,
    Oscillator,
    Spaceship,
}

impl PatternClass {
    pub const ALL: [PatternClass; 3] = [Self::StillLife, Self::Oscillator, Self::Spaceship];

    /// Canonical shapes whose presence counts as a detection for this class.
    pub fn patterns(self) -> &'static [Pattern] {
        match self {
            Self::StillLife  => &[BLOCK, BEEHIVE],
            Self::Oscillator => &[BLINKER_1, BLINKER_2, TOAD_1, TOAD_2],
            Self::Spaceship  => &[GLIDER_1, GLIDER_2, LWSS_1, LWSS_2],
        }
    }

    /// Consecutive detections needed before a sighting counts as stable.
    pub fn threshold(self) -> u32 {
        match self {
            Self::StillLife  => 2,
            Self::Oscillator => 3,
            Self::Spaceship  => 5,
        }
    }

    pub fn selector(self) -> u8 {
        match self {
            Self::StillLife  => 1,
            Self::Oscillator => 2,
            Self::Spaceship  => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::StillLife  => "Block or Beehive",
            Self::Oscillator => "Blinker or Toad",
            Self::Spaceship  => "Glider or LWSS",
        }
    }
}

impl TryFrom<u8> for PatternClass {
    type Error = LifeError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            1 => Ok(Self::StillLife),
            2 => Ok(Self::Oscillator),
            3 => Ok(Self::Spaceship),
            other => Err(LifeError::UnknownPatternClass(other)),
        }
    }
}

impl From<PatternClass> for u8 {
    fn from(class: PatternClass) -> Self {
        class.selector()
    }
}

impl fmt::Display for PatternClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
