use crate::model::{Analysis, DailyCount};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const PADDING: f32 = 20.0;
const TITLE_HEIGHT: f32 = 30.0;
const AXIS_LABEL_WIDTH: f32 = 40.0;
const PLOT_HEIGHT: f32 = 300.0;
const BAR_WIDTH: f32 = 12.0;
const BAR_GAP: f32 = 4.0;
const MIN_PLOT_WIDTH: f32 = 320.0;
const FONT_SIZE: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub axis: &'static str,
    pub bar: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                axis: "#616e7f",
                bar: "#58a6ff",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                axis: "#6a737d",
                bar: "#2563eb",
            },
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Y-axis ticks: whole numbers from 0 to `max`, at most five of them.
fn y_ticks(max: u32) -> Vec<u32> {
    if max == 0 {
        return vec![0];
    }
    let step = max.div_ceil(4).max(1);
    let mut ticks: Vec<u32> = (0..=max).step_by(step as usize).collect();
    if ticks.last() != Some(&max) {
        ticks.push(max);
    }
    ticks
}

/// Bar chart of commits per day.
pub fn generate_chart_svg(username: &str, daily: &[DailyCount], theme: Theme) -> String {
    let colors = theme.colors();
    let max = daily.iter().map(|d| d.count).max().unwrap_or(0);

    let bars_width = daily.len() as f32 * (BAR_WIDTH + BAR_GAP);
    let plot_width = bars_width.max(MIN_PLOT_WIDTH);
    let plot_x = PADDING + AXIS_LABEL_WIDTH;
    let plot_y = PADDING + TITLE_HEIGHT;
    let baseline = plot_y + PLOT_HEIGHT;

    let w = plot_x + plot_width + PADDING;
    let h = baseline + PADDING * 2.0;

    let scale = |count: u32| {
        if max == 0 {
            0.0
        } else {
            count as f32 / max as f32 * PLOT_HEIGHT
        }
    };

    let mut ticks = String::new();
    for tick in y_ticks(max) {
        let y = baseline - scale(tick);
        ticks.push_str(&format!(
            r#"<line x1="{plot_x}" y1="{y}" x2="{x2}" y2="{y}" class="grid"/>
<text x="{tx}" y="{ty}" text-anchor="end">{tick}</text>
"#,
            x2 = plot_x + plot_width,
            tx = plot_x - 6.0,
            ty = y + FONT_SIZE / 3.0,
        ));
    }

    let mut bars = String::new();
    for (i, d) in daily.iter().enumerate() {
        let bar_h = scale(d.count);
        let x = plot_x + i as f32 * (BAR_WIDTH + BAR_GAP) + BAR_GAP / 2.0;
        let y = baseline - bar_h;
        bars.push_str(&format!(
            r#"<rect x="{x}" y="{y}" width="{BAR_WIDTH}" height="{bar_h}" class="bar"><title>{date}: {count}</title></rect>
"#,
            date = d.date.format("%Y-%m-%d"),
            count = d.count,
        ));
    }

    let empty_note = if daily.is_empty() {
        format!(
            r#"<text x="{x}" y="{y}" text-anchor="middle">No commit activity</text>
"#,
            x = plot_x + plot_width / 2.0,
            y = plot_y + PLOT_HEIGHT / 2.0,
        )
    } else {
        String::new()
    };

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="{FONT_SIZE}px">

<style>
.bar  {{ fill: {bar}; }}
.grid {{ stroke: {axis}; stroke-width: 0.5; }}
.axis {{ stroke: {axis}; stroke-width: 1; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<g fill="{text}">
<text x="{PADDING}" y="{title_y}" font-size="16px">Daily commits: {user}</text>
{ticks}{empty_note}</g>

<line x1="{plot_x}" y1="{baseline}" x2="{axis_end}" y2="{baseline}" class="axis"/>

{bars}
</svg>
"#,
        bg = colors.bg,
        text = colors.text,
        axis = colors.axis,
        bar = colors.bar,
        title_y = PADDING + 16.0,
        user = escape_xml(username),
        axis_end = plot_x + plot_width,
    )
}

/// Write the dark and light charts for `analysis` into `dir`.
pub fn write_charts(dir: &Path, analysis: &Analysis) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for theme in [Theme::Dark, Theme::Light] {
        let path = dir.join(format!(
            "{}_commits_{}.svg",
            analysis.username,
            theme.suffix()
        ));
        fs::write(
            &path,
            generate_chart_svg(&analysis.username, &analysis.daily_commits, theme),
        )?;
        written.push(path);
    }
    Ok(written)
}
