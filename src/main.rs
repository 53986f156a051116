mod app;
mod wayland;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use app::{App, Command};
use calloop::channel::{self, Sender};
use calloop::EventLoop;
use log::{info, warn};
use wavefill::{Config, FrameLoop};
use wayland::shm::ShmBuffer;
use wayland::WaylandState;
use wayland_client::backend::WaylandError;
use wayland_client::{Connection, EventQueue};
use wayland_protocols_wlr::layer_shell::v1::client::zwlr_layer_shell_v1;

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting wavefill...");

    let mut config_path = None;
    let mut write_config = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--write-config" => write_config = true,
            _ => config_path = Some(PathBuf::from(arg)),
        }
    }
    let config_path = match config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };

    let config = Config::load_from(&config_path).unwrap_or_else(|e| {
        warn!("Could not load {}: {}", config_path.display(), e);
        Config::default()
    });
    if write_config {
        config.save_to(&config_path)?;
        info!("Wrote {}", config_path.display());
        return Ok(());
    }

    let mut app = App::new(&config)?;
    let (width, height) = (config.meter.width, config.meter.height);

    // Connect to Wayland
    let conn = Connection::connect_to_env()?;
    let display = conn.display();

    let mut event_queue = conn.new_event_queue();
    let qh = event_queue.handle();
    let _registry = display.get_registry(&qh, ());

    let mut state = WaylandState::new();
    event_queue.roundtrip(&mut state)?;

    let (Some(compositor), Some(layer_shell), Some(shm)) = (
        state.compositor.clone(),
        state.layer_shell.clone(),
        state.shm.clone(),
    ) else {
        bail!(
            "Compositor is missing {}",
            state.missing_globals().join(", ")
        );
    };

    let surface = compositor.create_surface(&qh, ());
    let layer_surface = layer_shell.get_layer_surface(
        &surface,
        None,
        zwlr_layer_shell_v1::Layer::Overlay,
        config.surface_id.clone(),
        &qh,
        (),
    );
    layer_surface.set_anchor(wayland::layer_anchor(config.position.anchor));
    layer_surface.set_exclusive_zone(config.position.exclusive_zone);
    let margins = &config.margins;
    layer_surface.set_margin(
        margins.top as i32,
        margins.right as i32,
        margins.bottom as i32,
        margins.left as i32,
    );
    layer_surface.set_size(width, height);
    surface.commit();
    state.layer_surface = Some(layer_surface);

    info!("Waiting for surface configuration...");
    while !state.configured {
        event_queue.blocking_dispatch(&mut state)?;
    }

    let mut shm_buffer = ShmBuffer::new(&shm, width, height, &qh)?;

    let mut event_loop: EventLoop<App> = EventLoop::try_new()?;
    let (sender, commands) = channel::channel::<Command>();
    event_loop
        .handle()
        .insert_source(commands, |event, _, app: &mut App| match event {
            channel::Event::Msg(command) => app.handle_command(command),
            channel::Event::Closed => app.handle_command(Command::Quit),
        })
        .map_err(|e| anyhow!("Failed to register command channel: {}", e.error))?;
    spawn_stdin_reader(sender);

    let mut frame_loop = FrameLoop::start(
        &event_loop.handle(),
        FrameLoop::<App>::interval_for(config.fps_cap),
    )?;

    info!("Starting main loop...");
    while state.running && app.running {
        event_loop.dispatch(Some(frame_loop.interval()), &mut app)?;

        if app.take_dirty() && !state.buffer_busy {
            app.meter.surface().write_argb8888(shm_buffer.pixels_mut());
            surface.attach(Some(shm_buffer.wl_buffer()), 0, 0);
            surface.damage(0, 0, width as i32, height as i32);
            surface.commit();
            state.buffer_busy = true;
        }

        event_queue.flush()?;
        read_events(&event_queue)?;
        event_queue.dispatch_pending(&mut state)?;
    }

    frame_loop.stop();
    drop(shm_buffer);
    if let Some(layer_surface) = state.layer_surface.take() {
        layer_surface.destroy();
    }
    surface.destroy();
    event_queue.flush()?;

    info!("Exiting");
    Ok(())
}

/// Pulls whatever the compositor has sent without blocking the frame loop.
fn read_events(event_queue: &EventQueue<WaylandState>) -> Result<()> {
    if let Some(guard) = event_queue.prepare_read() {
        match guard.read() {
            Ok(_) => {}
            Err(WaylandError::Io(e)) if e.kind() == std::io::ErrorKind::WouldBlock => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Forwards stdin commands to the loop thread; EOF closes the channel.
fn spawn_stdin_reader(sender: Sender<Command>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match Command::parse(&line) {
                Some(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => warn!("Ignoring unrecognized command: {}", line.trim()),
            }
        }
    });
}
