//! SVG export: renders a command list as a standalone SVG document.

use std::fmt::Write as _;

use paper_trails_protocol::{
    Paint, RenderCommand, Size, TextAlign, TextBaseline, ThemeToken,
};

use crate::preferences::Theme;

/// Render `commands` into an SVG document of `size`.
///
/// Transforms become nested `<g transform>` elements. Scale-invariant text
/// is counter-scaled around its anchor so it keeps its size when the
/// enclosing transform zooms.
pub fn render_svg(commands: &[RenderCommand], size: Size, theme: Theme) -> String {
    let (width, height) = (size.width, size.height);
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve(Paint::Token(ThemeToken::Background), theme),
    );

    let mut scales: Vec<f64> = Vec::new();
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                fill,
                border,
                label,
                key,
            } => {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    resolve(*fill, theme),
                );
                if let Some(border) = border {
                    let _ = write!(svg, r#" stroke="{}" stroke-width="1""#, resolve(*border, theme));
                }
                if let Some(key) = key {
                    let _ = write!(svg, r#" data-key="{}""#, escape_xml(&key.to_string()));
                }
                svg.push('>');
                if let Some(label) = label {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(label));
                }
                svg.push_str("</rect>");
            }
            RenderCommand::DrawImage {
                rect,
                source,
                border,
                alt,
                key,
                ..
            } => {
                let _ = write!(
                    svg,
                    r#"<image x="{}" y="{}" width="{}" height="{}" href="{}" preserveAspectRatio="xMidYMid slice""#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    escape_xml(source),
                );
                if let Some(key) = key {
                    let _ = write!(svg, r#" data-key="{}""#, escape_xml(&key.to_string()));
                }
                let _ = write!(svg, "><title>{}</title></image>", escape_xml(alt));
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="3" vector-effect="non-scaling-stroke"/>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    resolve(*border, theme),
                );
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
                ..
            } => {
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{line_width}" vector-effect="non-scaling-stroke"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    resolve(*color, theme),
                );
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                baseline,
                bold,
                scale_invariant,
            } => {
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let baseline = match baseline {
                    TextBaseline::Hanging => "hanging",
                    TextBaseline::Middle => "central",
                    TextBaseline::Alphabetic => "alphabetic",
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="{baseline}""#,
                    position.x,
                    position.y,
                    resolve(*color, theme),
                );
                if *bold {
                    svg.push_str(r#" font-weight="bold""#);
                }
                let scale: f64 = scales.iter().product();
                if *scale_invariant && scale > 0.0 && scale != 1.0 {
                    let (x, y) = (position.x, position.y);
                    let inv = 1.0 / scale;
                    let _ = write!(
                        svg,
                        r#" transform="translate({x} {y}) scale({inv}) translate({} {})""#,
                        -x,
                        -y,
                    );
                }
                let _ = write!(svg, ">{}</text>", escape_xml(text));
            }
            RenderCommand::PushTransform { translate, scale } => {
                scales.push(*scale);
                let _ = write!(
                    svg,
                    r#"<g transform="translate({} {}) scale({scale})">"#,
                    translate.x, translate.y,
                );
            }
            RenderCommand::PopTransform => {
                if scales.pop().is_some() {
                    svg.push_str("</g>");
                }
            }
            RenderCommand::BeginGroup { id, .. } => {
                let _ = write!(svg, r#"<g id="{}">"#, escape_xml(id));
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }
    for _ in scales {
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

/// Hex colour for a paint under `theme`.
pub fn resolve(paint: Paint, theme: Theme) -> String {
    match paint {
        Paint::Rgb(color) => color.to_hex(),
        Paint::Token(token) => token_color(token, theme).to_owned(),
    }
}

fn token_color(token: ThemeToken, theme: Theme) -> &'static str {
    match theme {
        Theme::Light => match token {
            ThemeToken::Background => "#f9f9f9",
            ThemeToken::AxisLine => "#333333",
            ThemeToken::YearTick => "#999999",
            ThemeToken::YearTickMajor => "#555555",
            ThemeToken::YearLabel => "#666666",
            ThemeToken::YearLabelMajor => "#333333",
            ThemeToken::CurrentYear => "#d9534f",
            ThemeToken::MarkerBorder => "#ffffff",
            ThemeToken::EventBorder => "#00000033",
        },
        Theme::Dark => match token {
            ThemeToken::Background => "#1e1e1e",
            ThemeToken::AxisLine => "#cccccc",
            ThemeToken::YearTick => "#777777",
            ThemeToken::YearTickMajor => "#aaaaaa",
            ThemeToken::YearLabel => "#aaaaaa",
            ThemeToken::YearLabelMajor => "#e0e0e0",
            ThemeToken::CurrentYear => "#ff6b6b",
            ThemeToken::MarkerBorder => "#2a2a2a",
            ThemeToken::EventBorder => "#ffffff33",
        },
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
