// SPDX-License-Identifier: MPL-2.0
//! Headless demo: opens a gallery of image files, sizes each one from its
//! header and cycles once through the gallery.

use flexi_logger::Logger;
use iced_core::keyboard::{Key, Modifiers};
use iced_core::Size;
use lens_overlay::config::{self, OverlayConfig, Settings};
use lens_overlay::media::{probe, ImageModel};
use lens_overlay::ui::gesture::InputEvent;
use lens_overlay::ui::navigation::{Direction, NavigationEvent};
use lens_overlay::ui::overlay::{
    ActionButton, HeadlessSurface, KeyShortcut, Notification, OverlaySession,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Instant;

const USAGE: &str = "\
Usage: lens_overlay [OPTIONS] IMAGE...

Options:
  --viewport WxH   Viewport size in pixels (default 1280x800)
  --config PATH    Settings file (default: platform config dir)
  --start N        Index of the first image shown (default 0)
  --read-only      Hide actions that are not available in read-only mode
  --debug          Enable overlay diagnostics
  -h, --help       Print this help";

struct Args {
    viewport: Size,
    config: Option<PathBuf>,
    start: usize,
    read_only: bool,
    debug: bool,
    paths: Vec<PathBuf>,
}

fn parse_viewport(value: &str) -> Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {value}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| *v > 0.0)
            .ok_or_else(|| format!("invalid viewport dimension: {part}"))
    };
    Ok(Size::new(parse(width)?, parse(height)?))
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        viewport: args
            .opt_value_from_fn("--viewport", parse_viewport)?
            .unwrap_or(Size::new(1280.0, 800.0)),
        config: args.opt_value_from_str("--config")?,
        start: args.opt_value_from_str("--start")?.unwrap_or(0),
        read_only: args.contains("--read-only"),
        debug: args.contains("--debug"),
        paths: args.finish().into_iter().map(PathBuf::from).collect(),
    };
    Ok(Some(parsed))
}

fn load_settings(path: Option<&Path>) -> Settings {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        log::warn!("using default settings: {err}");
        Settings::default()
    })
}

fn image_for(path: &Path) -> ImageModel {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    ImageModel::new(path.display().to_string(), name.clone()).with_data("file_name", name)
}

/// Answers the session's pending natural-size lookup from the file on disk.
async fn resolve_sizing(session: &mut OverlaySession<HeadlessSurface>) {
    let Some(request) = session.surface().last_sizing_request().cloned() else {
        return;
    };
    if session.pending_sizing() != Some(request.ticket) {
        return;
    }
    let natural = probe::natural_size_async(PathBuf::from(&request.url)).await;
    session.complete_sizing(request.ticket, natural);
}

fn print_frame(session: &OverlaySession<HeadlessSurface>) {
    let Some(frame) = session.surface().current_frame() else {
        return;
    };
    let position = frame
        .gallery
        .map(|p| format!("{}/{}", p.index + 1, p.total))
        .unwrap_or_default();
    match session.dimensions() {
        Some(dimensions) => println!(
            "{position} {} -> {}x{} ({})",
            frame.image.url,
            dimensions.width,
            dimensions.height,
            dimensions.aspect_class.class_name()
        ),
        None => println!("{position} {} -> not sized", frame.image.url),
    }
}

fn print_notification(notification: &Notification) {
    match notification {
        Notification::Navigate(event) => println!(
            "{}: {} {} -> {} (cycled: {})",
            notification.name(),
            event.direction.as_str(),
            event.previous_index,
            event.current_index,
            event.cycled
        ),
        Notification::Close { image } => println!(
            "{}: {}",
            notification.name(),
            image.as_ref().map_or("-", |image| image.url.as_str())
        ),
        Notification::CustomButtonClick {
            button_id, image, ..
        } => println!(
            "{}: {} on {}",
            notification.name(),
            button_id,
            image.as_ref().map_or("-", |image| image.url.as_str())
        ),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let level = if args.debug { "debug" } else { "warn" };
    let _logger = match Logger::try_with_env_or_str(level).and_then(|logger| logger.start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    };

    if args.paths.is_empty() {
        eprintln!("No images given\n\n{USAGE}");
        return ExitCode::FAILURE;
    }

    let mut overlay_config = OverlayConfig::from(load_settings(args.config.as_deref()));
    overlay_config.read_only |= args.read_only;
    overlay_config.debug |= args.debug;
    overlay_config.on_image_switch = Some(Rc::new(|event: &NavigationEvent| {
        log::info!("switched to {}", event.current_image.url);
    }));
    let overlay_config = overlay_config
        .with_button(
            ActionButton::new("info", "Info")
                .title("Show image info")
                .shortcut(KeyShortcut::new("i"))
                .on_click(|image, _| {
                    if let Some(image) = image {
                        println!("info: {} {:?}", image.url, image.data);
                    }
                }),
        )
        .with_button(
            ActionButton::new("delete", "Delete")
                .hidden_in_read_only()
                .shortcut(KeyShortcut::new("Delete")),
        );

    let images: Vec<ImageModel> = args.paths.iter().map(|path| image_for(path)).collect();
    let count = images.len();
    let mut session = OverlaySession::new(HeadlessSurface::new(args.viewport), overlay_config);
    if !session.show_gallery(images, args.start) {
        eprintln!("Could not open the gallery");
        return ExitCode::FAILURE;
    }

    for _ in 0..count {
        resolve_sizing(&mut session).await;
        print_frame(&session);
        session.navigate(Direction::Next);
    }
    resolve_sizing(&mut session).await;
    print_frame(&session);

    session.handle_input(
        InputEvent::KeyPressed {
            key: Key::Character("i".into()),
            modifiers: Modifiers::empty(),
        },
        Instant::now(),
    );

    for notification in session.take_notifications() {
        print_notification(&notification);
    }
    session.destroy();
    ExitCode::SUCCESS
}
