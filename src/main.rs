use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{sync_channel, SyncSender, TrySendError};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use waste_sorter::classify_session::main::ClassifySession;
use waste_sorter::config::Config;
use waste_sorter::device_camera::impl_fake::DeviceCameraFake;
use waste_sorter::device_camera::impl_image_folder::DeviceCameraImageFolder;
use waste_sorter::device_camera::interface::DeviceCamera;
use waste_sorter::file_source::read_image;
use waste_sorter::image_classifier::impl_tract::ClassifierBackendTract;
use waste_sorter::inference_engine::InferenceEngine;
use waste_sorter::model_loader::ModelLoader;
use waste_sorter::model_source::impl_directory::ModelSourceDirectory;
use waste_sorter::model_source::impl_http::ModelSourceHttp;
use waste_sorter::model_source::interface::ModelSource;
use waste_sorter::view_sink::impl_console::ViewSinkConsole;

#[derive(Parser, Debug)]
#[command(
    name = "waste-sorter",
    about = "Classify waste images from a camera or uploaded files"
)]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model base URL or directory, overrides the config
    #[arg(long)]
    model: Option<String>,

    /// Folder of images to use as the camera feed
    #[arg(long)]
    camera_dir: Option<PathBuf>,

    #[arg(long)]
    augment: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Hide the category panel
    #[arg(long)]
    no_panel: bool,

    #[arg(long)]
    tick_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Camera,
    Stop,
    Upload(PathBuf),
    Retry,
    Quit,
}

enum Input {
    Command(Command),
    Tick,
    Closed,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

    match word {
        "camera" => Some(Command::Camera),
        "stop" => Some(Command::Stop),
        "upload" if !rest.trim().is_empty() => Some(Command::Upload(PathBuf::from(rest.trim()))),
        "retry" => Some(Command::Retry),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn load_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(model) = &args.model {
        config.model_location = model.clone();
    }
    if args.augment {
        config.augmentation.enabled = true;
    }
    if args.seed.is_some() {
        config.augmentation.seed = args.seed;
    }
    if args.no_panel {
        config.render_panel = false;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.tick_rate_ms = tick_ms;
    }

    Ok(config)
}

fn spawn_stdin(sender: SyncSender<Input>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(command) => {
                    if sender.send(Input::Command(command)).is_err() {
                        return;
                    }
                }
                None if line.trim().is_empty() => {}
                None => warn!("Unknown command: {}", line.trim()),
            }
        }
        let _ = sender.send(Input::Closed);
    });
}

/// Ticks that find the queue full are dropped.
fn spawn_ticker(sender: SyncSender<Input>, tick_rate: Duration) {
    std::thread::spawn(move || loop {
        std::thread::sleep(tick_rate);
        if let Err(TrySendError::Disconnected(_)) = sender.try_send(Input::Tick) {
            break;
        }
    });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let source: Box<dyn ModelSource> = if config.model_is_remote() {
        Box::new(ModelSourceHttp::new(&config.model_location))
    } else {
        Box::new(ModelSourceDirectory::new(&config.model_location))
    };
    let engine = InferenceEngine::new(ModelLoader::new(source, Box::new(ClassifierBackendTract)));

    let camera: Box<dyn DeviceCamera> = match &args.camera_dir {
        Some(dir) => Box::new(DeviceCameraImageFolder::new(dir.clone())),
        None => {
            warn!("No --camera-dir given, the camera shows a synthetic feed");
            Box::new(DeviceCameraFake::new())
        }
    };

    let mut session = ClassifySession::new(
        config.clone(),
        engine,
        camera,
        Box::new(ViewSinkConsole::new()),
    );

    let (sender, receiver) = sync_channel(4);
    spawn_stdin(sender.clone());
    spawn_ticker(sender, config.tick_rate());

    session.start();
    info!("Commands: camera | stop | upload <path> | retry | quit");

    for input in receiver {
        match input {
            Input::Tick => {
                session.tick();
            }
            Input::Command(Command::Camera) => {
                session.request_camera();
            }
            Input::Command(Command::Stop) => {
                session.stop_camera();
            }
            Input::Command(Command::Upload(path)) => match read_image(&path) {
                Ok(frame) => {
                    session.request_upload(frame);
                }
                Err(error) => warn!(%error, "Could not open image"),
            },
            Input::Command(Command::Retry) => {
                session.retry_model();
            }
            Input::Command(Command::Quit) | Input::Closed => break,
        }
    }

    session.stop_camera();
    info!("Bye");
    Ok(())
}
