use paper_trails_protocol::{
    Point, RenderCommand, SharedStr, Size, TextAlign, TextBaseline, ThemeToken,
};

use crate::config::TimelineConfig;
use crate::model::YEARS;

const AXIS_LINE_WIDTH: f64 = 2.0;
const TICK_HEIGHT: f64 = 10.0;
const MAJOR_TICK_HEIGHT: f64 = 20.0;
const LABEL_FONT_SIZE: f64 = 10.0;
const LABEL_OFFSET_Y: f64 = 4.0;
const DECADE: i32 = 10;
const CENTURY: i32 = 100;

/// The shared year → pixel mapping of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearAxis {
    start_year: i32,
    end_year: i32,
    canvas_width: f64,
    axis_y: f64,
}

impl YearAxis {
    /// `None` when the year range is empty, leaves [`YEARS`], or the canvas
    /// has no width.
    pub fn new(start_year: i32, end_year: i32, canvas_width: f64, axis_y: f64) -> Option<Self> {
        if end_year <= start_year
            || !YEARS.contains(&start_year)
            || !YEARS.contains(&end_year)
            || !(canvas_width > 0.0)
            || !canvas_width.is_finite()
        {
            return None;
        }
        Some(Self {
            start_year,
            end_year,
            canvas_width,
            axis_y,
        })
    }

    /// Axis for a viewport: the canvas is the wider of `viewport_width * K`
    /// and `year_span * density`, the axis runs through the vertical middle.
    pub fn for_viewport(config: &TimelineConfig, viewport: Size) -> Option<Self> {
        let span = f64::from(config.year_span());
        let width = (viewport.width * config.canvas_width_factor).max(span * config.pixels_per_year);
        Self::new(config.start_year, config.end_year, width, viewport.height / 2.0)
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn span(&self) -> i32 {
        self.end_year - self.start_year
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn axis_y(&self) -> f64 {
        self.axis_y
    }

    /// Horizontal canvas position of `year`. Years off the axis map outside
    /// `0..canvas_width`.
    pub fn x(&self, year: i32) -> f64 {
        (f64::from(year) - f64::from(self.start_year)) / f64::from(self.span()) * self.canvas_width
    }

    /// Point on the axis line for `year`.
    pub fn point(&self, year: i32) -> Point {
        Point::new(self.x(year), self.axis_y)
    }

    /// Clamp the left edge of an item `size` wide into the canvas. Never
    /// panics, even when the item is wider than the canvas.
    pub fn clamp_left(&self, left: f64, size: f64) -> f64 {
        left.min(self.canvas_width - size).max(0.0)
    }

    /// Decade ticks from the start year, plus the end year when it falls
    /// after the last decade.
    pub fn ticks(&self) -> Vec<YearTick> {
        let last_decade = self.end_year.div_euclid(DECADE) * DECADE;
        let mut ticks: Vec<YearTick> = (self.start_year..=last_decade)
            .step_by(DECADE as usize)
            .map(|year| YearTick {
                year,
                x: self.x(year),
                kind: if year.rem_euclid(CENTURY) == 0 {
                    TickKind::Century
                } else {
                    TickKind::Decade
                },
            })
            .collect();
        if self.end_year > last_decade {
            ticks.push(YearTick {
                year: self.end_year,
                x: self.x(self.end_year),
                kind: TickKind::Current,
            });
        }
        ticks
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Decade,
    Century,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearTick {
    pub year: i32,
    pub x: f64,
    pub kind: TickKind,
}

/// Axis line and tick marks.
pub fn axis_commands(axis: &YearAxis, ticks: &[YearTick]) -> Vec<RenderCommand> {
    let y = axis.axis_y();
    let mut commands = Vec::with_capacity(ticks.len() + 3);
    commands.push(RenderCommand::BeginGroup {
        id: "axis".into(),
        label: Some("Year axis".into()),
    });
    commands.push(RenderCommand::DrawLine {
        from: Point::new(0.0, y),
        to: Point::new(axis.canvas_width(), y),
        color: ThemeToken::AxisLine.into(),
        width: AXIS_LINE_WIDTH,
        key: None,
    });
    for tick in ticks {
        let (height, color) = match tick.kind {
            TickKind::Century => (MAJOR_TICK_HEIGHT, ThemeToken::YearTickMajor),
            TickKind::Decade => (TICK_HEIGHT, ThemeToken::YearTick),
            TickKind::Current => (TICK_HEIGHT, ThemeToken::CurrentYear),
        };
        commands.push(RenderCommand::DrawLine {
            from: Point::new(tick.x, y),
            to: Point::new(tick.x, y + height),
            color: color.into(),
            width: 1.0,
            key: None,
        });
    }
    commands.push(RenderCommand::EndGroup);
    commands
}

/// Year labels under the ticks. Labels keep their size when zoomed.
pub fn label_commands(axis: &YearAxis, ticks: &[YearTick]) -> Vec<RenderCommand> {
    ticks
        .iter()
        .map(|tick| {
            let (tick_height, color, bold) = match tick.kind {
                TickKind::Century => (MAJOR_TICK_HEIGHT, ThemeToken::YearLabelMajor, true),
                TickKind::Decade => (TICK_HEIGHT, ThemeToken::YearLabel, false),
                TickKind::Current => (TICK_HEIGHT, ThemeToken::CurrentYear, true),
            };
            RenderCommand::DrawText {
                position: Point::new(
                    tick.x,
                    axis.axis_y() + tick_height + LABEL_OFFSET_Y + LABEL_FONT_SIZE * 0.5,
                ),
                text: SharedStr::from(tick.year.to_string()),
                color: color.into(),
                font_size: LABEL_FONT_SIZE,
                align: TextAlign::Center,
                baseline: TextBaseline::Middle,
                bold,
                scale_invariant: true,
            }
        })
        .collect()
}
