use anyhow::Result;
use crossterm::tty::IsTty;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::renderer::{self, RenderParams};
use crate::spiral::{self, RowMap, SpiralParams};

/// Width assumed when the terminal can't be asked (e.g. output is piped).
pub const FALLBACK_WIDTH: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

/// Read the terminal dimensions once.
pub fn probe() -> TerminalSize {
    match crossterm::terminal::size() {
        Ok((width, height)) if width > 0 => TerminalSize { width, height },
        Ok(_) => {
            warn!("Terminal reported zero width, assuming {} columns", FALLBACK_WIDTH);
            TerminalSize { width: FALLBACK_WIDTH, height: 0 }
        }
        Err(e) => {
            warn!("Could not read terminal size ({}), assuming {} columns", e, FALLBACK_WIDTH);
            TerminalSize { width: FALLBACK_WIDTH, height: 0 }
        }
    }
}

/// Generate, lay out and print the spiral to `out` for a surface `width`
/// columns wide. Returns the number of lines written.
pub fn draw<W: Write>(out: &mut W, config: &Config, width: u16) -> crate::error::Result<usize> {
    let params = SpiralParams {
        circulation_factor: config.spiral.circulation_factor,
        granularity: config.spiral.granularity,
        reference_width: width,
        inset: config.spiral.inset,
    };

    let points = spiral::generate(&params)?;
    let points = spiral::normalize(&points, config.render.margin);
    let rows = RowMap::group(&points);
    if rows.is_empty() {
        debug!("Nothing to draw");
    } else {
        debug!("{} points across {} rows", points.len(), rows.len());
    }

    let render = RenderParams {
        fill: config.render.fill,
        prefix: &config.render.prefix,
        line_numbers: config.render.line_numbers,
        color_scheme: config.render.color_scheme,
    };
    renderer::render_rows(out, &rows, &render)
}

/// Config as it applies to the actual output: color escapes only go to a tty.
fn output_config(config: &Config, is_tty: bool) -> Config {
    let mut config = config.clone();
    if !is_tty && config.render.color_scheme.is_some() {
        debug!("Stdout is not a terminal, printing without color");
        config.render.color_scheme = None;
    }
    config
}

pub fn run(config: &Config) -> Result<()> {
    let width = match config.spiral.width {
        Some(width) => width,
        None => {
            let size = probe();
            info!("Terminal size: {}x{}", size.width, size.height);
            size.width
        }
    };

    let stdout = io::stdout();
    let config = output_config(config, stdout.is_tty());
    let mut out = BufWriter::new(stdout.lock());

    match draw(&mut out, &config, width) {
        Ok(lines) => {
            debug!("Printed {} lines", lines);
            Ok(())
        }
        Err(e) if e.is_broken_pipe() => {
            debug!("Output closed early");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorScheme;
    use crate::error::SpiralError;

    fn draw_to_string(config: &Config, width: u16) -> (usize, String) {
        let mut out = Vec::new();
        let lines = draw(&mut out, config, width).unwrap();
        (lines, String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_config_fits_the_width() {
        let (lines, out) = draw_to_string(&Config::default(), 80);
        assert!(lines > 0);
        assert_eq!(out.lines().count(), lines);
        assert!(out.lines().all(|l| l.len() <= 81));
        assert!(out.lines().any(|l| l.starts_with('*')));
    }

    #[test]
    fn margin_shifts_every_line() {
        let mut config = Config::default();
        config.render.margin = 3;
        let (_, out) = draw_to_string(&config, 60);
        for line in out.lines().filter(|l| !l.is_empty()) {
            assert!(line.starts_with("   "), "line {line:?}");
        }
        assert!(out.lines().any(|l| l.starts_with("   *")));
    }

    #[test]
    fn line_numbers_count_up_from_zero() {
        let mut config = Config::default();
        config.render.line_numbers = true;
        let (lines, out) = draw_to_string(&config, 40);
        for (i, line) in out.lines().enumerate() {
            assert!(line.starts_with(&format!("{:03}", i)));
        }
        assert_eq!(out.lines().count(), lines);
    }

    #[test]
    fn invalid_parameters_are_reported() {
        let mut config = Config::default();
        config.spiral.circulation_factor = 0.0;
        let mut out = Vec::new();
        let err = draw(&mut out, &config, 80).unwrap_err();
        assert!(matches!(err, SpiralError::InvalidCirculationFactor(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn color_is_dropped_when_not_a_tty() {
        let mut config = Config::default();
        config.render.color_scheme = Some(ColorScheme::Fire);

        let piped = output_config(&config, false);
        assert_eq!(piped.render.color_scheme, None);
        let (_, out) = draw_to_string(&piped, 40);
        assert!(!out.contains('\u{1b}'));

        let tty = output_config(&config, true);
        assert_eq!(tty.render.color_scheme, Some(ColorScheme::Fire));
    }

    #[test]
    fn probe_never_reports_zero_width() {
        assert!(probe().width > 0);
    }
}
