//! Per-frame update and draw cycle, independent of the windowing backend.

use cgmath::Point3;
use log::{debug, trace};

use crate::camera::{Camera, CameraController};
use crate::geometry::{CUBE_EDGES, Rgba, ScreenPoint, cube_vertices};
use crate::input::{InputEvent, KeyState, Poll, poll_input};
use crate::projection::Projector;
use crate::settings::Settings;

/// Drawing surface the frame loop renders into.
///
/// Implementations are expected not to fail once created; any recoverable
/// backend problem is handled (and logged) internally.
pub trait Canvas {
    fn clear(&mut self, color: Rgba);
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgba);
    fn present(&mut self);
}

/// Draws one line per `(a, b)` index pair into `points`.
pub fn draw_edges<C: Canvas + ?Sized>(
    canvas: &mut C,
    points: &[ScreenPoint],
    edges: &[(usize, usize)],
    color: Rgba,
) {
    for &(a, b) in edges {
        canvas.draw_line(points[a], points[b], color);
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

pub struct FrameLoop {
    camera: Camera,
    controller: CameraController,
    projector: Projector,
    keys: KeyState,
    cube: [Point3<f32>; 8],
    background: Rgba,
    edge_color: Rgba,
    quit_requested: bool,
    state: LoopState,
}

impl FrameLoop {
    pub fn new(settings: &Settings) -> Self {
        Self {
            camera: Camera::default(),
            controller: CameraController::new(settings.move_speed, settings.rot_speed),
            projector: Projector::new(settings.screen_center(), settings.fov),
            keys: KeyState::default(),
            cube: cube_vertices(),
            background: settings.background,
            edge_color: settings.edge_color,
            quit_requested: false,
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    /// Whether a quit signal arrived; the loop terminates at the end of the current frame.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Feeds one input event. Once quit has been requested every further event is dropped.
    pub fn handle_input(&mut self, event: InputEvent) -> Poll {
        self.poll(std::iter::once(event))
    }

    fn poll<I>(&mut self, events: I) -> Poll
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if self.quit_requested || self.state == LoopState::Terminated {
            trace!("Dropping input received after quit");
            return Poll::default();
        }
        let poll = poll_input(&mut self.keys, events);
        self.quit_requested |= poll.quit;
        poll
    }

    /// Updates the camera from the held keys, then clears, draws and presents one frame.
    ///
    /// Returns [`LoopState::Terminated`] after the frame in which quit was requested.
    pub fn run_frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> LoopState {
        if self.state == LoopState::Terminated {
            return self.state;
        }

        if self.keys.any_held() {
            debug!("[Debug] {}", self.camera);
        }
        self.controller.update_camera(&self.keys, &mut self.camera);

        canvas.clear(self.background);
        let projected = self
            .cube
            .map(|vertex| self.projector.project(vertex, &self.camera));
        draw_edges(canvas, &projected, &CUBE_EDGES, self.edge_color);
        canvas.present();

        if self.quit_requested {
            self.state = LoopState::Terminated;
        }
        self.state
    }

    /// One full iteration: drain `events`, then run the frame.
    pub fn iterate<C, I>(&mut self, events: I, canvas: &mut C) -> LoopState
    where
        C: Canvas + ?Sized,
        I: IntoIterator<Item = InputEvent>,
    {
        self.poll(events);
        self.run_frame(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ControlKey;

    #[derive(Default)]
    struct Recorder {
        clears: Vec<Rgba>,
        lines: Vec<(ScreenPoint, ScreenPoint, Rgba)>,
        presents: usize,
    }

    impl Canvas for Recorder {
        fn clear(&mut self, color: Rgba) {
            self.clears.push(color);
        }
        fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgba) {
            self.lines.push((from, to, color));
        }
        fn present(&mut self) {
            self.presents += 1;
        }
    }

    #[test]
    fn draw_edges_follows_the_table_order() {
        let points: Vec<_> = (0..4).map(|i| ScreenPoint::new(i, -i)).collect();
        let mut canvas = Recorder::default();
        let color = Rgba::rgb(1, 2, 3);
        draw_edges(&mut canvas, &points, &[(0, 1), (3, 2)], color);
        assert_eq!(
            canvas.lines,
            vec![(points[0], points[1], color), (points[3], points[2], color)]
        );
    }

    #[test]
    fn one_frame_clears_draws_twelve_edges_and_presents() {
        let settings = Settings::default();
        let mut frame_loop = FrameLoop::new(&settings);
        let mut canvas = Recorder::default();

        assert_eq!(frame_loop.run_frame(&mut canvas), LoopState::Running);
        assert_eq!(canvas.clears, vec![settings.background]);
        assert_eq!(canvas.lines.len(), 12);
        assert!(canvas.lines.iter().all(|l| l.2 == settings.edge_color));
        assert_eq!(canvas.presents, 1);
    }

    #[test]
    fn initial_view_matches_hand_projection() {
        let mut frame_loop = FrameLoop::new(&Settings::default());
        let mut canvas = Recorder::default();
        frame_loop.run_frame(&mut canvas);

        // vertex 0 is (-100, -100, -100): factor = 500 / 400 = 1.25
        // vertex 1 is (100, -100, -100)
        let (from, to, _) = canvas.lines[0];
        assert_eq!(from, ScreenPoint::new(515, 235));
        assert_eq!(to, ScreenPoint::new(765, 235));
    }

    #[test]
    fn held_key_moves_camera_before_drawing() {
        let mut frame_loop = FrameLoop::new(&Settings::default());
        let mut canvas = Recorder::default();
        frame_loop.iterate(
            [InputEvent::Key { key: ControlKey::Ascend, pressed: true }],
            &mut canvas,
        );
        assert_eq!(frame_loop.camera().position, Point3::new(0.0, -16.0, 0.0));
        assert!(frame_loop.keys().is_held(ControlKey::Ascend));
    }

    #[test]
    fn terminated_loop_ignores_further_frames() {
        let mut frame_loop = FrameLoop::new(&Settings::default());
        let mut canvas = Recorder::default();
        assert_eq!(
            frame_loop.iterate([InputEvent::Quit], &mut canvas),
            LoopState::Terminated
        );
        assert_eq!(frame_loop.run_frame(&mut canvas), LoopState::Terminated);
        assert_eq!(canvas.presents, 1);
    }
}
