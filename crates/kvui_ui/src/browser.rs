use kvui_core::{Backend, KeyType, KvError};

use crate::{
    Effect, InputEvent, Layout, NavigationState, Pane, PaneId, PaneSet, Pipeline, Screen,
    Transition, transition,
};

/// Whether the control loop keeps running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the backend, the navigation state and the pane buffers, and executes
/// the effects requested by [`transition`].
///
/// All mutation goes through `&mut self`, so callers serialize input and
/// timer-driven redraws simply by owning the browser on one thread.
pub struct Browser {
    backend: Box<dyn Backend>,
    state: NavigationState,
    screen: PaneSet,
}

impl Browser {
    pub fn new(backend: Box<dyn Backend>, width: u16, height: u16) -> Self {
        let mut screen = PaneSet::new(width, height);
        Layout::derive(width, height, KeyType::Invalid).apply(&mut screen);

        Self {
            backend,
            state: NavigationState::new(),
            screen,
        }
    }

    /// First full render.
    pub fn start(&mut self) {
        log::info!("browsing {} backend", self.backend.kind());
        self.render_tree();
        self.refresh_status();
    }

    pub fn handle(&mut self, event: InputEvent) -> Flow {
        let highlighted = self
            .screen
            .pane(self.state.view().pane())
            .and_then(|pane| pane.current_line())
            .map(str::to_string);

        let Transition { state, effects } =
            transition(&self.state, event, highlighted.as_deref());
        self.state = state;

        let mut flow = Flow::Continue;
        for effect in effects {
            match effect {
                Effect::MoveCursor { pane, delta } => {
                    if let Some(pane) = self.screen.pane_mut(pane) {
                        pane.move_cursor(delta);
                    }
                }
                Effect::SelectDatabase(index) => {
                    log::debug!("selecting database {index}");
                    if let Err(error) = self.backend.select_database(index) {
                        self.surface(error);
                    }
                }
                Effect::Render(PaneId::Tree) => self.render_tree(),
                Effect::Render(PaneId::Value | PaneId::SubValue) => self.render_value(),
                Effect::Render(PaneId::Status) => self.refresh_status(),
                Effect::Quit => flow = Flow::Quit,
            }
        }
        flow
    }

    /// Status pane only; driven by the periodic ticker.
    pub fn refresh_status(&mut self) {
        self.pipeline().render_status();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen.resize(width, height);
        self.pipeline().relayout();
        self.render_tree();
        self.refresh_status();
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn screen(&self) -> &PaneSet {
        &self.screen
    }

    pub fn focused(&self) -> PaneId {
        self.state.view().pane()
    }

    pub fn shutdown(self) -> Result<(), KvError> {
        log::info!("closing {} backend", self.backend.kind());
        self.backend.close()
    }

    fn pipeline(&mut self) -> Pipeline<'_> {
        Pipeline::new(self.backend.as_ref(), &mut self.state, &mut self.screen)
    }

    // The value pane follows the tree selection, so it is re-rendered after
    // every successful tree render.
    fn render_tree(&mut self) {
        match self.pipeline().render_tree() {
            Ok(()) => self.render_value(),
            Err(error) => self.surface(error),
        }
    }

    fn render_value(&mut self) {
        if let Err(error) = self.pipeline().render_value() {
            self.surface(error);
        }
    }

    fn surface(&mut self, error: KvError) {
        log::warn!("{error}");
        self.state.record_error(error);
        self.refresh_status();
    }
}
