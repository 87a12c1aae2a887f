//! Level layouts
//!
//! A level is a text grid, one brick row per line. `1`-`9` place a brick with
//! that durability; `.`, `-`, `0` and spaces leave the cell empty. Lines
//! starting with `#` are comments.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::GameConfig;
use crate::sim::{Brick, BrickShape, Rect};

/// Built-in layouts, compiled into the binary
pub const LEVEL_1: &str = include_str!("../levels/level1.txt");
pub const LEVEL_2: &str = include_str!("../levels/level2.txt");
pub const LEVEL_3: &str = include_str!("../levels/level3.txt");
pub const LEVEL_5: &str = include_str!("../levels/level5.txt");

/// One entry of the level-selection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChoice {
    /// Digit key that selects it
    pub key: u8,
    /// File stem under the levels directory
    pub name: &'static str,
    pub shape: BrickShape,
    layout: &'static str,
}

impl LevelChoice {
    /// Menu line, e.g. "1. Level 1      Rectangular Bricks"
    pub fn label(&self) -> String {
        let number = self.name.trim_start_matches("level");
        format!(
            "{}. Level {}      {} Bricks",
            self.key,
            number,
            self.shape.as_str()
        )
    }

    /// Build this level's bricks. With a directory, `<dir>/<name>.txt` is read
    /// and the built-in copy is used only when that file does not exist.
    pub fn load(&self, dir: Option<&Path>, config: &GameConfig) -> Result<Vec<Brick>> {
        if let Some(dir) = dir {
            let path = dir.join(format!("{}.txt", self.name));
            if path.exists() {
                return load_level(&path, self.shape, config);
            }
            log::warn!(
                "{} not found, using built-in {}",
                path.display(),
                self.name
            );
        }
        parse_level(self.layout, self.shape, config).with_context(|| format!("built-in {}", self.name))
    }
}

/// The five menu choices
pub const CATALOGUE: [LevelChoice; 5] = [
    LevelChoice {
        key: 1,
        name: "level1",
        shape: BrickShape::Rectangular,
        layout: LEVEL_1,
    },
    LevelChoice {
        key: 2,
        name: "level2",
        shape: BrickShape::Rectangular,
        layout: LEVEL_2,
    },
    LevelChoice {
        key: 3,
        name: "level3",
        shape: BrickShape::Rectangular,
        layout: LEVEL_3,
    },
    LevelChoice {
        key: 4,
        name: "level1",
        shape: BrickShape::Triangular,
        layout: LEVEL_1,
    },
    LevelChoice {
        key: 5,
        name: "level5",
        shape: BrickShape::Hexagonal,
        layout: LEVEL_5,
    },
];

/// Look up a menu choice by its digit key
pub fn choice_for_key(key: u8) -> Option<&'static LevelChoice> {
    CATALOGUE.iter().find(|c| c.key == key)
}

/// Read and parse a level file
pub fn load_level(path: &Path, shape: BrickShape, config: &GameConfig) -> Result<Vec<Brick>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read level {}", path.display()))?;
    let bricks = parse_level(&text, shape, config).with_context(|| format!("in level {}", path.display()))?;
    log::info!("Loaded {} bricks from {}", bricks.len(), path.display());
    Ok(bricks)
}

/// Turn a text layout into bricks, in row-major order
pub fn parse_level(text: &str, shape: BrickShape, config: &GameConfig) -> Result<Vec<Brick>> {
    let brick_w = config.brick_width();
    let brick_h = config.brick_height;
    let spacing = config.spacing;

    let mut bricks = Vec::new();
    let mut row = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        let line = line.trim_end();

        let cells = line.chars().count();
        if cells > config.columns as usize {
            bail!(
                "line {}: {} cells but only {} columns fit",
                line_no + 1,
                cells,
                config.columns
            );
        }

        for (col, c) in line.chars().enumerate() {
            let durability = match c {
                '.' | '-' | ' ' | '0' => continue,
                '1'..='9' => c.to_digit(10).unwrap_or(1),
                other => bail!(
                    "line {}, column {}: unexpected {:?}",
                    line_no + 1,
                    col + 1,
                    other
                ),
            };
            let x = spacing + col as f32 * (brick_w + spacing);
            let y = spacing + row as f32 * (brick_h + spacing);
            bricks.push(Brick::new(Rect::new(x, y, brick_w, brick_h), shape, durability));
        }
        row += 1;
    }

    if bricks.is_empty() {
        bail!("level has no bricks");
    }

    let bottom = bricks.iter().map(|b| b.rect.bottom()).fold(0.0, f32::max);
    if bottom >= config.paddle_top() {
        bail!("bricks reach down to the paddle ({bottom} >= {})", config.paddle_top());
    }

    Ok(bricks)
}
