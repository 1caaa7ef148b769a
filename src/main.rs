use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::PathBuf;
use std::{io, time::Duration};
use tokio::sync::mpsc;

use tarang::api::YoutubeClient;
use tarang::app::cli::Args;
use tarang::app::config::{self, AppConfig};
use tarang::app::events::AppEvent;
use tarang::app::input_handler;
use tarang::app::App;
use tarang::library;
use tarang::player::{
    Coordinator, EngineEvent, EngineState, LocalEngine, PlaybackEngine, RemoteEngine,
};
use tarang::ui;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    let user_config = AppConfig::load();
    let music_dir: PathBuf = args
        .music_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&user_config.music_directory));
    let region = args
        .region
        .clone()
        .unwrap_or_else(|| user_config.region.clone());
    let api_key = config::youtube_api_key(&user_config);

    // Logs go to a file; stdout belongs to the UI.
    let log_file = tracing_appender::rolling::never(AppConfig::get_config_dir(), "tarang.log");
    let (log_writer, _log_guard) = tracing_appender::non_blocking(log_file);
    tracing_subscriber::fmt()
        .with_writer(log_writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .init();
    tracing::info!("tarang {} starting", env!("CARGO_PKG_VERSION"));

    // WINDOW TITLE (For Yabai/Amethyst) 🏷️
    print!("\x1b]2;Tarang\x07");

    // Panics must restore the terminal before the report prints.
    let report_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        report_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut app = App::new(
        user_config.keys.clone(),
        music_dir.display().to_string(),
        region.clone(),
        api_key.is_some(),
    );

    // Engine Setup 🎛️ Either one may be missing (no audio device, no
    // mpv on PATH); its backend degrades instead of killing startup.
    let local_engine: Option<Box<dyn PlaybackEngine>> = match LocalEngine::new(tx.clone()) {
        Ok(engine) => Some(Box::new(engine)),
        Err(e) => {
            tracing::error!("Local engine unavailable: {e:#}");
            app.show_toast("🔇 No audio device: local playback disabled");
            None
        }
    };
    let remote_engine: Option<Box<dyn PlaybackEngine>> = match RemoteEngine::spawn(tx.clone()).await
    {
        Ok(engine) => Some(Box::new(engine)),
        Err(e) => {
            tracing::error!("Remote engine unavailable: {e:#}");
            app.show_toast("📡 mpv not found: YouTube playback disabled");
            None
        }
    };
    let mut coordinator = Coordinator::new(local_engine, remote_engine, tx.clone());

    // Performance Optimization: Global HTTP Client (Reused)
    let http = reqwest::Client::builder()
        .user_agent(concat!("tarang/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default();
    let client = YoutubeClient::new(http, api_key);

    // Library Scan Task 📂 walkdir blocks, so it stays off the runtime.
    {
        let tx_scan = tx.clone();
        let scan_dir = music_dir.clone();
        tokio::task::spawn_blocking(move || {
            let songs = library::scan_music_directory(&scan_dir);
            let _ = tx_scan.send(AppEvent::LibraryScanned(songs));
        });
    }

    // Files handed over on the command line jump straight into the queue.
    let startup_songs = library::songs_from_files(&args.files);
    if !startup_songs.is_empty() {
        let added = app.queue.append(startup_songs);
        tracing::info!("Queued {added} songs from the command line");
        app.refresh_discover();
        input_handler::apply_selection(&mut app, &mut coordinator);
    }

    // Trending Fetch Task 📈 only worth a round-trip when a key exists;
    // without one the Discover view shows the remediation hint instead.
    if client.has_credential() {
        let client_trending = client.clone();
        let tx_trending = tx.clone();
        let trending_region = region.clone();
        tokio::spawn(async move {
            match client_trending.trending(&trending_region).await {
                Ok(songs) => {
                    let _ = tx_trending.send(AppEvent::TrendingResults {
                        region: trending_region,
                        songs,
                    });
                }
                Err(e) => tracing::warn!("Trending fetch failed: {e}"),
            }
        });
    }

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).is_err() {
                break;
            }
        }
    });

    // 2. Animation Tick Task ⚡
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        // 60 FPS Update Rate (approx 16ms)
        let mut interval = tokio::time::interval(Duration::from_millis(16));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    loop {
        terminal.draw(|f| ui::ui(f, &mut app))?;

        let Some(event) = rx.recv().await else { break };
        match event {
            AppEvent::Input(Event::Key(key)) => {
                input_handler::handle_key(key, &mut app, &mut coordinator, &client, &tx);
            }
            AppEvent::Input(_) => {}
            AppEvent::Engine(engine_event) => {
                // Stale events (an abandoned load, a replaced engine) are
                // dropped inside; only applied ones drive the queue.
                if coordinator.on_engine_event(&engine_event) {
                    match &engine_event {
                        EngineEvent::StateChanged {
                            state: EngineState::Ended,
                            ..
                        } => {
                            app.queue.next();
                            input_handler::apply_selection(&mut app, &mut coordinator);
                        }
                        EngineEvent::LoadFailed { reason, .. } => {
                            app.show_toast(&format!("⚠ Playback failed: {reason}"));
                        }
                        _ => {}
                    }
                }
            }
            AppEvent::RemotePoll => coordinator.on_remote_poll(),
            AppEvent::LibraryScanned(songs) => {
                let count = songs.len();
                tracing::info!("Library scan finished: {count} songs");
                app.set_library(songs);
                if count > 0 {
                    app.show_toast(&format!("📂 Library ready: {count} songs"));
                }
            }
            AppEvent::SearchResults { query, songs } => {
                app.search_in_flight = false;
                app.search_selected = 0;
                if songs.is_empty() {
                    app.show_toast(&format!("No results for \"{query}\""));
                }
                app.search_results = songs;
            }
            AppEvent::TrendingResults { region, songs } => {
                tracing::info!("Trending loaded: {} songs for {region}", songs.len());
                app.set_trending(songs);
            }
            AppEvent::CredentialMissing { message } => {
                app.search_in_flight = false;
                app.credential_notice = Some(message);
            }
            AppEvent::Tick => {
                app.on_tick();
                coordinator.on_tick();
            }
        }

        // Every event may have moved the transport; refresh the snapshot
        // the next frame draws from.
        app.playback = coordinator.snapshot();

        if !app.is_running {
            break;
        }
    }

    coordinator.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("clean exit");
    Ok(())
}
