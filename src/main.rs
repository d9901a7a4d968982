use anyhow::{anyhow, Context, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, warn};
use raw_window_handle::HasRawWindowHandle;
use std::{ffi::CString, num::NonZeroU32, process, ptr};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

use glprimer::{
    config::{default_config_path, AppConfig},
    utils::init_logging,
    GlApi, NativeGl, Renderer, Scene,
};

/// Window, context and surface. Declared before anything that draws, so it
/// is dropped last.
struct App {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    gl: NativeGl,
}

impl App {
    fn new(config: &AppConfig) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|e| anyhow!("Failed to create window: {}", e))?;

        let window = window.context("Display builder returned no window")?;
        let raw_window_handle = window.raw_window_handle();

        let profile = if config.context.core_profile {
            GlProfile::Core
        } else {
            GlProfile::Compatibility
        };
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                config.context.major,
                config.context.minor,
            ))))
            .with_profile(profile)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("Failed to create OpenGL context")?;

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .context("Failed to create GL surface")?;

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        if config.window.vsync {
            if let Err(e) = gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN)) {
                warn!("Failed to enable vsync: {}", e);
            }
        }

        // Load OpenGL functions
        let gl = NativeGl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
            Err(_) => ptr::null(),
        });

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                gl,
            },
            event_loop,
        ))
    }

    fn resize(&self, renderer: &Renderer<'_, NativeGl>, width: u32, height: u32) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.gl_surface.resize(&self.gl_context, w, h);
            renderer.resize(width, height);
        }
    }
}

fn run(config: &AppConfig) -> Result<()> {
    let (app, event_loop) = App::new(config)?;
    info!("GL_VERSION: {}", app.gl.version());

    let renderer = Renderer::new(&app.gl);
    let size = app.window.inner_size();
    renderer.resize(size.width, size.height);

    let mut scene = Scene::build(&app.gl, config.lesson, config)
        .with_context(|| format!("Failed to build lesson '{}'", config.lesson))?;

    event_loop.run(|event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => app.resize(&renderer, size.width, size.height),
            WindowEvent::RedrawRequested => {
                if let Err(e) = scene.render(&renderer) {
                    error!("{}", e);
                }
                if let Err(e) = app.gl_surface.swap_buffers(&app.gl_context) {
                    error!("Failed to swap buffers: {}", e);
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => app.window.request_redraw(),
        _ => {}
    })?;

    info!("Window closed");
    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let path = default_config_path()?;
    AppConfig::load_or_default(&path).with_context(|| format!("Failed to load {}", path.display()))
}

fn main() {
    let config = load_config();
    let level = config.as_ref().map_or("info", |config| config.log_level.as_str());
    if let Err(e) = init_logging(level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            process::exit(-1);
        }
    };

    info!("Starting lesson '{}'", config.lesson);
    if let Err(e) = run(&config) {
        error!("{:#}", e);
        process::exit(-1);
    }
}
