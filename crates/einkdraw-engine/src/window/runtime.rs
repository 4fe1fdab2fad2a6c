use anyhow::{Context, Result};
use einkdraw_core::time::Clock;
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId, WindowLevel};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{map_key, Modifiers, PointerTranslator};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Request a transparent surface so the window can sit over other content.
    pub transparent: bool,
    pub always_on_top: bool,
    pub decorations: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "einkdraw".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            transparent: false,
            always_on_top: false,
            decorations: true,
        }
    }
}

impl RuntimeConfig {
    fn attributes(&self) -> winit::window::WindowAttributes {
        let level = if self.always_on_top {
            WindowLevel::AlwaysOnTop
        } else {
            WindowLevel::Normal
        };
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size)
            .with_transparent(self.transparent)
            .with_decorations(self.decorations)
            .with_window_level(level)
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    ///
    /// Pointer events are stamped with `clock`, which should be the same time
    /// base the app's drawing surface reads.
    pub fn run<A, C>(config: RuntimeConfig, gpu_init: GpuInit, clock: C, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
        C: 'static + Clock,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);
        let mut state = AppState::new(config, gpu_init, clock, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(err) = state.failure.take() {
            return Err(err);
        }
        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A, C> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    clock: C,
    app: A,

    window: Option<WindowEntry>,
    translator: PointerTranslator,
    modifiers: Modifiers,
    failure: Option<anyhow::Error>,
}

impl<A, C> AppState<A, C>
where
    A: CoreApp + 'static,
    C: Clock + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, clock: C, app: A) -> Self {
        Self {
            config,
            gpu_init,
            clock,
            app,
            window: None,
            translator: PointerTranslator::new(),
            modifiers: Modifiers::default(),
            failure: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let window = event_loop
            .create_window(self.config.attributes())
            .context("failed to create window")?;
        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()
    }

    fn request_redraw(&self) {
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, control: AppControl) {
        match control {
            AppControl::Continue => {}
            AppControl::Redraw => self.request_redraw(),
            AppControl::Exit => {
                log::info!("exit requested");
                event_loop.exit();
            }
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn render_frame(&mut self) -> AppControl {
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return AppControl::Continue;
        };
        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx { window: fields.window },
                gpu: fields.gpu,
            };
            app.on_frame(&mut ctx)
        })
    }
}

impl<A, C> ApplicationHandler for AppState<A, C>
where
    A: CoreApp + 'static,
    C: Clock + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                log::info!("window \"{}\" ready", self.config.title);
                self.window = Some(entry);
                self.request_redraw();
            }
            Err(e) => self.fail(event_loop, e.context("failed to create initial window")),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.window.as_ref() else {
            return;
        };
        let scale_factor = entry.with_window(|w| w.scale_factor());

        let t = self.clock.now_ms();
        if let Some(pointer) = self.translator.translate(&event, scale_factor, t) {
            let control = self.app.on_pointer(pointer);
            self.apply(event_loop, control);
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::ModifiersChanged(m) => {
                self.modifiers = Modifiers::from(m.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.state == ElementState::Pressed {
                    let key = map_key(key_event.physical_key);
                    let control = self.app.on_key(key, self.modifiers);
                    self.apply(event_loop, control);
                }
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                }
                self.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let control = self.render_frame();
                self.apply(event_loop, control);
            }

            _ => {}
        }
    }
}
