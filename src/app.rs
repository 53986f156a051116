use log::{info, warn};
use wavefill::{Config, FrameTarget, RenderSink, SkiaCanvas, WaveError, WaveProgress};

/// Progress change requested from outside the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set(f32),
    Change(f32),
    Reset,
    Quit,
}

impl Command {
    /// Accepts `set <n>`, `add <n>`, `+<n>`, `-<n>`, `reset` and `quit`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let command = match (words.next()?, words.next()) {
            ("set", Some(value)) => Command::Set(value.parse().ok()?),
            ("add", Some(value)) => Command::Change(value.parse().ok()?),
            ("reset", None) => Command::Reset,
            ("quit" | "exit", None) => Command::Quit,
            (delta, None) if delta.starts_with('+') || delta.starts_with('-') => {
                Command::Change(delta.parse().ok()?)
            }
            _ => return None,
        };
        words.next().is_none().then_some(command)
    }
}

/// Sink backing the meter with an in-memory pixmap and printing the counter.
pub struct HostSink {
    surface_id: String,
    last_counter: Option<String>,
}

impl HostSink {
    pub fn new(surface_id: &str) -> Self {
        Self {
            surface_id: surface_id.to_string(),
            last_counter: None,
        }
    }

    pub fn last_counter(&self) -> Option<&str> {
        self.last_counter.as_deref()
    }
}

impl RenderSink for HostSink {
    type Surface = SkiaCanvas;

    fn resolve_surface(&mut self, id: &str, width: u32, height: u32) -> Option<SkiaCanvas> {
        if id != self.surface_id {
            return None;
        }
        SkiaCanvas::new(width, height)
    }

    fn write_counter_text(&mut self, text: &str) {
        info!("Counter: {}", text);
        println!("{}", text);
        self.last_counter = Some(text.to_string());
    }
}

pub struct App {
    pub meter: WaveProgress<HostSink>,
    pub running: bool,
    dirty: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, WaveError> {
        let sink = HostSink::new(&config.surface_id);
        let meter = WaveProgress::new(sink, &config.surface_id, config.meter.clone())?;
        Ok(Self {
            meter,
            running: true,
            dirty: false,
        })
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Set(value) => self.meter.set_progress(value),
            Command::Change(delta) => self.meter.change_progress(delta),
            Command::Reset => self.meter.reset_progress(),
            Command::Quit => {
                info!("Quit requested");
                self.running = false;
            }
        }
    }

    /// True once per repaint that has not been presented yet.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl FrameTarget for App {
    fn frame(&mut self) {
        if !self.running {
            warn!("Frame requested after quit");
            return;
        }
        self.meter.frame();
        self.dirty = true;
    }
}
