use crate::config::{CounterFormat, MeterConfig};

/// Gap kept between the left edge and the boundary at 0%.
pub const LEFT_PADDING: f32 = 8.0;

const BAR_CELLS: usize = 10;
const BAR_FILLED: char = '█';
const BAR_EMPTY: char = '░';

/// Result of mapping one requested progress value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub progress: f32,
    pub target_offset: f32,
    pub counter: String,
}

/// Turns a progress percentage into a boundary offset and counter text.
#[derive(Debug, Clone)]
pub struct ProgressMapper {
    goal_amount: f32,
    travel: f32,
    format: CounterFormat,
}

impl ProgressMapper {
    pub fn new(config: &MeterConfig) -> Self {
        Self {
            goal_amount: config.goal_amount,
            travel: config.width as f32 - config.wave_height,
            format: config.counter_format,
        }
    }

    pub fn map(&self, requested: f32) -> ProgressUpdate {
        let progress = clamp_progress(requested);
        ProgressUpdate {
            progress,
            target_offset: self.target_offset(progress),
            counter: format_counter(progress, self.goal_amount, self.format),
        }
    }

    pub fn target_offset(&self, progress: f32) -> f32 {
        let percent_of_goal = progress / self.goal_amount * 100.0;
        percent_of_goal / 100.0 * self.travel + LEFT_PADDING
    }
}

/// Clamps into `0..=100`; NaN and -0 count as 0.
pub fn clamp_progress(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        // adding +0 turns -0 into +0
        value.clamp(0.0, 100.0) + 0.0
    }
}

pub fn format_counter(progress: f32, goal_amount: f32, format: CounterFormat) -> String {
    match format {
        CounterFormat::Percentage => format!("{}%", progress),
        CounterFormat::Fraction => format!("{} / {}", progress, goal_amount),
        CounterFormat::TextBar => text_bar(progress),
    }
}

/// Ten-cell bar; partially reached cells round down.
fn text_bar(progress: f32) -> String {
    let filled = ((progress / 10.0).floor() as usize).min(BAR_CELLS);
    let mut bar = String::with_capacity(2 + BAR_CELLS * BAR_FILLED.len_utf8());
    bar.push('[');
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(BAR_CELLS - filled));
    bar.push(']');
    bar
}
