use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use log::{debug, info};
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

pub mod camera;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod projection;
pub mod renderer;
pub mod settings;

use frame::{FrameLoop, LoopState};
use input::InputEvent;
use renderer::Renderer;
use settings::Settings;

pub struct App {
    settings: Settings,
    frame_loop: FrameLoop,
    // field order is the teardown order: drawing surface, then window
    renderer: Option<Renderer>,
    window: Option<Arc<Window>>,
    next_frame: Instant,
    init_error: Option<anyhow::Error>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let frame_loop = FrameLoop::new(&settings);
        Self {
            settings,
            frame_loop,
            renderer: None,
            window: None,
            next_frame: Instant::now(),
            init_error: None,
        }
    }

    fn window_attributes(&self, event_loop: &ActiveEventLoop) -> WindowAttributes {
        let (width, height) = (self.settings.width, self.settings.height);
        let mut attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(false);

        if let Some(monitor) = event_loop.primary_monitor() {
            let origin = monitor.position();
            let screen = monitor.size();
            let x = origin.x + (screen.width as i32 - width as i32) / 2;
            let y = origin.y + (screen.height as i32 - height as i32) / 2;
            attributes = attributes.with_position(PhysicalPosition::new(x, y));
        }
        attributes
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = Arc::new(
            event_loop
                .create_window(self.window_attributes(event_loop))
                .context("Couldn't create window")?,
        );
        let renderer = pollster::block_on(Renderer::new(window.clone()))
            .context("Couldn't create renderer")?;

        info!(
            "Window ready: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );
        self.renderer = Some(renderer);
        self.window = Some(window);
        self.next_frame = Instant::now();
        Ok(())
    }

    /// Releases the drawing surface, then the window.
    fn teardown(&mut self) {
        if self.renderer.take().is_some() {
            debug!("Renderer released");
        }
        if self.window.take().is_some() {
            debug!("Window released");
        }
    }

    /// Consumes the app after the event loop returned, surfacing any init failure.
    pub fn finish(mut self) -> anyhow::Result<()> {
        self.teardown();
        match self.init_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::Resized(size) = event {
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.resize(size.width, size.height);
            }
            return;
        }
        if let Some(input) = InputEvent::from_window_event(&event) {
            self.frame_loop.handle_input(input);
        }
    }

    // Called once the pending events of this loop iteration have been delivered.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if Instant::now() < self.next_frame {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
            return;
        }

        match self.frame_loop.run_frame(renderer) {
            LoopState::Terminated => event_loop.exit(),
            LoopState::Running => {
                // the delay starts after presenting, so frame time is processing + delay
                self.next_frame = Instant::now() + self.settings.frame_delay;
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,wirecube=debug"))
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    run_with(Settings::default())
}

pub fn run_with(settings: Settings) -> anyhow::Result<()> {
    init_logger();

    let event_loop = EventLoop::new().context("Couldn't initialize the event loop")?;
    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    app.finish()
}
