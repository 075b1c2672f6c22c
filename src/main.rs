use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hatchling::assets::AssetCatalog;
use hatchling::audio::{AudioRequest, TrackId};
use hatchling::display;
use hatchling::game::Game;
use hatchling::input::{InputRouter, RawEvent};
use hatchling::render;
use hatchling::score::{default_score_path, ScoreBoard};

const FRAME: Duration = Duration::from_micros(16_667); // 60 FPS

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "hatchling", about = "A grid snake arcade game")]
struct Args {
    /// Trade animation fidelity for memory (single-board builds).
    #[arg(long)]
    low_memory: bool,

    /// High-score file location.
    #[arg(long)]
    scores: Option<PathBuf>,
}

// ── Exclusive capture ─────────────────────────────────────────────────────────

/// Owns the terminal's exclusive-input acquisition: raw mode, alternate
/// screen, hidden cursor and (where supported) keyboard enhancement
/// flags.  `Drop` restores the terminal, so every exit path, including
/// a panic unwinding through `main`, gives the host back its input.
struct TerminalCapture {
    keyboard_enhanced: bool,
    active: bool,
}

impl TerminalCapture {
    fn acquire<W: Write>(out: &mut W) -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Key-release events come only from enhancement-capable
        // terminals; others fall back gracefully.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

        Ok(Self {
            keyboard_enhanced,
            active: true,
        })
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for TerminalCapture {
    fn drop(&mut self) {
        self.release();
    }
}

// ── Audio sink ────────────────────────────────────────────────────────────────

/// Stand-in for a real mixer: effects are logged, tracks "play" for a
/// nominal duration so the rotation advances exactly as it would with
/// audio hardware attached.
struct SilentAudio {
    current: Option<(TrackId, Instant)>,
}

impl SilentAudio {
    fn new() -> Self {
        Self { current: None }
    }

    fn track_length(track: TrackId) -> Duration {
        match track {
            TrackId::GameOver => Duration::from_secs(20),
            _ => Duration::from_secs(75),
        }
    }

    fn handle(&mut self, request: AudioRequest) {
        match request {
            AudioRequest::PlayTrack(track) => {
                debug!(file = track.file_name(), "play track");
                self.current = Some((track, Instant::now()));
            }
            AudioRequest::PlayEffect(effect) => {
                debug!(?effect, "play effect");
            }
        }
    }

    /// Once-per-frame poll; reports a track that has run its length.
    fn poll_finished(&mut self) -> Option<TrackId> {
        let (track, started) = self.current?;
        if started.elapsed() >= Self::track_length(track) {
            self.current = None;
            Some(track)
        } else {
            None
        }
    }
}

// ── Event translation ─────────────────────────────────────────────────────────

/// Terminal events to the router's raw vocabulary.  Only key presses
/// matter; releases and repeats are drained and dropped.
fn to_raw_event(event: Event) -> Option<RawEvent> {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => Some(RawEvent::KeyDown(code)),
        _ => None,
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hatchling=info".into()),
        )
        .init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    let mut router = InputRouter::new();
    let mut capture = match TerminalCapture::acquire(&mut out) {
        Ok(capture) => {
            router.claim_capture(true);
            Some(capture)
        }
        Err(err) => {
            // Degraded but playable: no exclusivity guarantee.
            warn!(%err, "could not acquire exclusive terminal capture");
            router.claim_capture(false);
            None
        }
    };

    // Dedicate a thread to blocking event reads so the frame loop
    // never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
            Err(_) => break,
        }
    });

    let scoreboard = ScoreBoard::load(args.scores.unwrap_or_else(default_score_path));
    let catalog = AssetCatalog::new(args.low_memory);
    let mut game = Game::new(scoreboard);
    game.begin_soundtrack();

    let result = run(&mut out, &rx, &mut game, &mut router, &catalog);

    // Exit contract: release capture before the process ends.  The
    // guard's Drop covers panic unwinding; this covers the normal path.
    router.release_capture();
    if let Some(capture) = capture.as_mut() {
        capture.release();
    }

    result
}

// ── Frame loop ────────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    game: &mut Game,
    router: &mut InputRouter,
    catalog: &AssetCatalog,
) -> std::io::Result<()> {
    let mut audio = SilentAudio::new();

    loop {
        let frame_start = Instant::now();

        // Cooperative quit: score writes happen at insert time, and the
        // caller releases capture as soon as this loop returns.
        if game.should_quit() {
            break;
        }

        router.set_text_mode(game.wants_text_input());

        // Drain all pending input (non-blocking).
        while let Ok(event) = rx.try_recv() {
            if let Some(raw) = to_raw_event(event) {
                if let Some(command) = router.translate(raw) {
                    game.apply(command);
                }
            }
        }

        game.advance_frame();

        // Audio: requests out, track-end poll in, once per frame.
        for request in game.drain_audio() {
            audio.handle(request);
        }
        if let Some(track) = audio.poll_finished() {
            debug!(file = track.file_name(), "track finished");
            game.notify_track_finished();
        }

        display::render(out, &render::draw_list(game, catalog))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
    Ok(())
}
