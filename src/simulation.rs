use crate::{
    Automaton, CellState, Config, ConfigError, CycleDirection, EditError, EditTool, GridPos,
    RateChange, ScreenRect, StepScheduler, Stroke, Viewport, VisibleCell,
};
use glam::DVec2;
use log::trace;

/// One input request for the core. These are the only ways the outside world changes it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    TogglePause,
    SingleStep,
    ChangeRate(RateChange),
    ResetElectrified,
    Clear,
    /// Move the camera by screen pixels.
    Pan { dx: f64, dy: f64 },
    Zoom { steps: i32 },
    /// Zoom around a screen point.
    ZoomAt { steps: i32, x: f64, y: f64 },
    /// Pointer moved to a screen position, or left the window.
    MouseMoved(Option<(f64, f64)>),
    StrokeBegin(EditTool),
    StrokeEnd,
    Resize { width: u32, height: u32 },
    Place { pos: GridPos, state: CellState },
    Erase(GridPos),
    Cycle { pos: GridPos, direction: CycleDirection },
}

/// What the renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Generations advanced during this tick.
    pub generations_advanced: u32,
    /// Generation count after this tick.
    pub generation: u64,
    pub visible: Vec<VisibleCell>,
    /// Outline of the cell under the pointer.
    pub highlight: Option<ScreenRect>,
}

/// The engine, camera and clock driven together, one tick per rendered frame.
#[derive(Clone, Debug)]
pub struct Simulation {
    automaton: Automaton,
    viewport: Viewport,
    scheduler: StepScheduler,
    stroke: Stroke,
}

impl Simulation {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Simulation {
            automaton: Automaton::new(),
            viewport: Viewport::new(config),
            scheduler: StepScheduler::new(&config.scheduler),
            stroke: Stroke::new(),
        })
    }

    #[inline]
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn scheduler(&self) -> &StepScheduler {
        &self.scheduler
    }

    /// Apply one input request.
    pub fn apply(&mut self, command: Command) -> Result<(), EditError> {
        trace!("command {:?}", command);
        match command {
            Command::TogglePause => self.scheduler.toggle(),
            Command::SingleStep => self.scheduler.single_step(&mut self.automaton),
            Command::ChangeRate(change) => {
                self.scheduler.set_rate(change);
            }
            Command::ResetElectrified => self.automaton.reset_electrified(),
            Command::Clear => self.automaton.clear(),
            Command::Pan { dx, dy } => {
                self.viewport.pan_by(DVec2::new(dx, dy));
                self.paint();
            }
            Command::Zoom { steps } => {
                if self.viewport.zoom_by(steps) {
                    self.paint();
                }
            }
            Command::ZoomAt { steps, x, y } => {
                if self.viewport.zoom_at(steps, DVec2::new(x, y)) {
                    self.paint();
                }
            }
            Command::MouseMoved(position) => {
                self.viewport
                    .set_mouse_position(position.map(|(x, y)| DVec2::new(x, y)));
                self.paint();
            }
            Command::StrokeBegin(tool) => {
                self.stroke.begin(tool);
                self.paint();
            }
            Command::StrokeEnd => self.stroke.end(),
            Command::Resize { width, height } => self.viewport.resize((width, height)),
            Command::Place { pos, state } => self.automaton.place(pos, state)?,
            Command::Erase(pos) => self.automaton.erase(pos)?,
            Command::Cycle { pos, direction } => {
                self.automaton.cycle_state(pos, direction)?;
            }
        }
        Ok(())
    }

    /// Edit the cell under the pointer if a stroke is in progress. Called whenever the pointer or
    /// the camera moves, so a held button keeps painting while the world slides underneath it.
    fn paint(&mut self) {
        if !self.stroke.is_active() {
            return;
        }
        if let Some(pos) = self.viewport.mouse_grid_position() {
            self.stroke.apply(&mut self.automaton, pos);
        }
    }

    /// Run due generations for `dt` seconds of wall time and gather what is visible.
    pub fn tick(&mut self, dt: f64) -> Frame {
        let generations_advanced = self.scheduler.update(dt, &mut self.automaton);
        self.viewport.refresh(self.automaton.grid_mut());
        Frame {
            generations_advanced,
            generation: self.automaton.generation(),
            visible: self.viewport.visible_cells(self.automaton.grid()),
            highlight: self.viewport.highlight_rect(),
        }
    }
}
