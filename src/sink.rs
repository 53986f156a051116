use crate::gfx::draw::DrawContext;

/// Host-side collaborator the engine draws and reports through.
///
/// Keeps the engine free of any global display lookups: a host hands one of
/// these in at construction and the engine never reaches past it.
pub trait RenderSink {
    type Surface: DrawContext;

    /// Looks up the drawing surface named `id`, sized `width` x `height`.
    fn resolve_surface(&mut self, id: &str, width: u32, height: u32) -> Option<Self::Surface>;

    /// Shows the formatted counter. Sinks without a text display ignore it.
    fn write_counter_text(&mut self, text: &str);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use crate::gfx::draw::recording::RecordingCanvas;

    /// Resolves only the surfaces it was told about and keeps every counter
    /// string it receives.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub surfaces: Vec<String>,
        pub counters: Vec<String>,
    }

    impl RecordingSink {
        pub fn with_surface(id: &str) -> Self {
            Self {
                surfaces: vec![id.to_string()],
                counters: Vec::new(),
            }
        }

        pub fn last_counter(&self) -> Option<&str> {
            self.counters.last().map(String::as_str)
        }
    }

    impl RenderSink for RecordingSink {
        type Surface = RecordingCanvas;

        fn resolve_surface(&mut self, id: &str, width: u32, height: u32) -> Option<RecordingCanvas> {
            self.surfaces
                .iter()
                .any(|known| known == id)
                .then(|| RecordingCanvas::new(width, height))
        }

        fn write_counter_text(&mut self, text: &str) {
            self.counters.push(text.to_string());
        }
    }
}
