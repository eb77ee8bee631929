//! Built-in sample images.
//!
//! Each sample is a 7x7 grid written as one string per row, one legend
//! character per cell.

use pixel_cells::ColorValue;

use crate::models::CellQueue;
use crate::services::batch_validator::cells_from_grid;

pub struct Sample {
    pub name: &'static str,
    pub rows: &'static [&'static str],
}

const LEGEND: &[(char, ColorValue)] = &[
    ('R', ColorValue::new(0xff, 0x00, 0x00)),
    ('Y', ColorValue::new(0xff, 0xff, 0x00)),
    ('K', ColorValue::new(0x00, 0x00, 0x00)),
    ('W', ColorValue::new(0xff, 0xff, 0xff)),
];

/// Unknown legend characters render white
const FALLBACK: ColorValue = ColorValue::new(0xff, 0xff, 0xff);

pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "heart",
        rows: &[
            "WRRWRRW",
            "RRRRRRR",
            "RRRRRRR",
            "RRRRRRR",
            "WRRRRRW",
            "WWRRRWW",
            "WWWRWWW",
        ],
    },
    Sample {
        name: "smiley",
        rows: &[
            "WWYYYWW",
            "WYYYYYW",
            "YYKYKYY",
            "YYYYYYY",
            "YKYYYKY",
            "WYKKKYW",
            "WWYYYWW",
        ],
    },
];

impl Sample {
    pub fn width(&self) -> u32 {
        self.rows.first().map_or(0, |row| row.chars().count() as u32)
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Row-major colors, one per legend character
    pub fn colors(&self) -> Vec<ColorValue> {
        self.rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|ch| {
                LEGEND
                    .iter()
                    .find(|(key, _)| *key == ch)
                    .map_or(FALLBACK, |(_, color)| *color)
            })
            .collect()
    }

    pub fn queue(&self) -> CellQueue {
        let cells = cells_from_grid(&self.colors(), self.width(), self.height());
        CellQueue::new(self.name, cells)
    }
}

/// Look up a sample by name (case-insensitive)
pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// Sample names joined for messages, e.g. `"heart, smiley"`
pub fn names() -> String {
    SAMPLES.iter().map(|s| s.name).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_square_grids() {
        for sample in SAMPLES {
            assert_eq!((sample.width(), sample.height()), (7, 7), "{}", sample.name);
            assert!(sample.rows.iter().all(|r| r.len() == 7), "{}", sample.name);
        }
    }

    #[test]
    fn test_heart_queue() {
        let queue = find("heart").unwrap().queue();
        assert_eq!(queue.len(), 49);
        assert_eq!(queue.name(), "heart");

        let red = "#ff0000".parse::<ColorValue>().unwrap();
        let reds = queue.cells().iter().filter(|c| c.color == red).count();
        assert_eq!(reds, 34);

        // top-left is background, tip of the heart is red
        assert_eq!(queue.get(0).unwrap().color.to_string(), "#ffffff");
        let tip = queue.cells().iter().find(|c| (c.x, c.y) == (3, 6)).unwrap();
        assert_eq!(tip.color, red);
    }

    #[test]
    fn test_smiley_colors() {
        let queue = find("Smiley").unwrap().queue();
        let diagnostics = queue.diagnostics();
        assert_eq!((diagnostics.width, diagnostics.height), (7, 7));
        assert_eq!(diagnostics.distinct_colors, 3);

        let eye = queue.cells().iter().find(|c| (c.x, c.y) == (2, 2)).unwrap();
        assert_eq!(eye.color.to_string(), "#000000");
    }

    #[test]
    fn test_unknown_sample() {
        assert!(find("rocket").is_none());
        assert_eq!(names(), "heart, smiley");
    }
}
