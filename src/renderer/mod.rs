//! Text rasterizer
//!
//! Turns a [`RowMap`] into printable lines: one line per row from 0 to the
//! last occupied row, the fill character at occupied columns and spaces in
//! between. Lines are not padded to a common width.

use std::io::Write;

use crate::color::ColorScheme;
use crate::error::Result;
use crate::spiral::RowMap;

pub const DEFAULT_FILL: char = '*';

/// Parameters controlling how rows are printed.
#[derive(Debug, Clone)]
pub struct RenderParams<'a> {
    pub fill: char,
    /// Written at the start of every line.
    pub prefix: &'a str,
    /// Follow the prefix with the zero-padded row index.
    pub line_numbers: bool,
    /// Color fill characters when set; spaces stay plain.
    pub color_scheme: Option<ColorScheme>,
}

impl Default for RenderParams<'_> {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL,
            prefix: "",
            line_numbers: false,
            color_scheme: None,
        }
    }
}

impl RenderParams<'_> {
    fn line_prefix(&self, y: i32) -> String {
        if self.line_numbers {
            format!("{}{:03}", self.prefix, y)
        } else {
            self.prefix.to_string()
        }
    }
}

/// Render one row: `prefix`, then `fill` at every column listed in `xs`
/// (ascending) and a space at every other column up to the last one.
pub fn rasterize_row(xs: &[i32], fill: char, prefix: &str) -> String {
    build_row(xs, prefix, |line, _| line.push(fill))
}

fn build_row(xs: &[i32], prefix: &str, mut put_fill: impl FnMut(&mut String, i32)) -> String {
    let mut line = String::from(prefix);

    let Some(&last) = xs.last() else {
        return line;
    };

    for col in 0..=last {
        if xs.binary_search(&col).is_ok() {
            put_fill(&mut line, col);
        } else {
            line.push(' ');
        }
    }

    line
}

/// Write every row from 0 through the last occupied one, so the drawing is a
/// contiguous block. Returns the number of lines written.
pub fn render_rows<W: Write>(out: &mut W, rows: &RowMap, params: &RenderParams) -> Result<usize> {
    let Some(max_y) = rows.max_y() else {
        return Ok(0);
    };
    let max_x = rows.max_x().unwrap_or(0).max(1) as f32;
    let height = max_y.max(1) as f32;

    let mut written = 0;
    for y in 0..=max_y {
        let prefix = params.line_prefix(y);
        let xs = rows.row(y);

        let line = match params.color_scheme {
            Some(scheme) => {
                let intensity = y as f32 / height;
                build_row(xs, &prefix, |line, x| {
                    line.push_str(&scheme.paint(params.fill, x as f32 / max_x, intensity));
                })
            }
            None => rasterize_row(xs, params.fill, &prefix),
        };

        writeln!(out, "{line}")?;
        written += 1;
    }

    out.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spiral::{self, Point, SpiralParams};

    fn render_to_string(rows: &RowMap, params: &RenderParams) -> (usize, String) {
        let mut out = Vec::new();
        let n = render_rows(&mut out, rows, params).unwrap();
        (n, String::from_utf8(out).unwrap())
    }

    fn strip_ansi(s: &str) -> String {
        let mut plain = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                plain.push(c);
            }
        }
        plain
    }

    #[test]
    fn fills_listed_columns_only() {
        let line = rasterize_row(&[0, 2, 5], '*', "");
        assert_eq!(line, "* *  *");
        assert_eq!(line.len(), 6);
    }

    #[test]
    fn empty_row_is_prefix_only() {
        assert_eq!(rasterize_row(&[], '*', ""), "");
        assert_eq!(rasterize_row(&[], '*', ">> "), ">> ");
    }

    #[test]
    fn prefix_comes_first() {
        assert_eq!(rasterize_row(&[1], 'O', "|"), "| O");
    }

    #[test]
    fn gaps_become_empty_lines() {
        let rows = RowMap::group(&[Point::new(0, 0), Point::new(3, 2)]);
        let (n, out) = render_to_string(&rows, &RenderParams::default());
        assert_eq!(n, 3);
        assert_eq!(out, "*\n\n   *\n");
    }

    #[test]
    fn empty_map_writes_nothing() {
        let (n, out) = render_to_string(&RowMap::default(), &RenderParams::default());
        assert_eq!(n, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn line_numbers_are_zero_padded() {
        let rows = RowMap::group(&[Point::new(1, 0), Point::new(0, 1)]);
        let params = RenderParams {
            line_numbers: true,
            prefix: "#",
            ..RenderParams::default()
        };
        let (_, out) = render_to_string(&rows, &params);
        assert_eq!(out, "#000 *\n#001*\n");
    }

    #[test]
    fn spiral_renders_one_line_per_row() {
        let points = spiral::generate(&SpiralParams {
            circulation_factor: 3.0,
            ..SpiralParams::new(80)
        })
        .unwrap();
        let rows = RowMap::group(&spiral::normalize(&points, 0));
        let max_y = rows.max_y().unwrap();

        let (n, out) = render_to_string(&rows, &RenderParams::default());
        assert_eq!(n as i32, max_y + 1);
        assert_eq!(out.lines().count() as i32, max_y + 1);

        for (y, line) in out.lines().enumerate() {
            let xs = rows.row(y as i32);
            let expected_len = xs.last().map_or(0, |&x| x as usize + 1);
            assert_eq!(line.len(), expected_len, "row {y}");
            assert!(!line.ends_with(' '));
        }

        let stars = out.chars().filter(|&c| c == '*').count();
        assert_eq!(stars, points.len());
    }

    #[test]
    fn colored_output_matches_plain_text() {
        let points = spiral::generate(&SpiralParams::new(40)).unwrap();
        let rows = RowMap::group(&spiral::normalize(&points, 2));

        let (_, plain) = render_to_string(&rows, &RenderParams::default());
        let colored_params = RenderParams {
            color_scheme: Some(ColorScheme::Ocean),
            ..RenderParams::default()
        };
        let (_, colored) = render_to_string(&rows, &colored_params);

        assert_eq!(strip_ansi(&colored), plain);
    }
}
