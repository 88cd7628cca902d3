use anyhow::Result;
use log::{info, warn};
use std::time::Duration;
use sunpath::app::{App, Section, UiEvent};
use sunpath::timer::{Clock, SystemClock};
use sunpath::{Config, SessionStatus, TimelineEvent};

fn main() -> Result<()> {
    env_logger::init();
    println!("Starting sunpath...");

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Falling back to default config: {:#}", e);
        Config::default()
    });
    let mut app = App::new(config)?;
    app.handle_event(UiEvent::Resize {
        width: 1280.0,
        height: 800.0,
    });

    match std::env::args().nth(1).as_deref() {
        Some("scroll") => run_scroll(&mut app),
        Some("relax") | None => run_relax(&mut app),
        Some(other) => anyhow::bail!("unknown mode {other:?}, expected `relax` or `scroll`"),
    }
}

fn run_relax(app: &mut App) -> Result<()> {
    let clock = SystemClock::new();
    let _sub = app.breathing.subscribe(|event| match event {
        TimelineEvent::StatusChanged { from, to, at_ms } => {
            println!("[{at_ms:>6}ms] {from:?} -> {to:?}");
        }
        TimelineEvent::PhaseChanged { phase, cycle } => {
            println!("          cycle {} {:?}", cycle + 1, phase);
        }
        TimelineEvent::NarrativeChanged(band) => {
            println!("          narrative band {band}");
        }
        TimelineEvent::Breath(_) => {}
    });

    app.update(clock.now_ms());
    app.handle_event(UiEvent::StartSession);
    info!(
        "Session runs {}ms after a {}ms lead-in",
        app.breathing.total_ms(),
        app.config.breathing.prepare_ms
    );

    let frame = Duration::from_millis(app.config.breathing.poll_interval_ms);
    let mut last_bar = usize::MAX;
    while app.session_status() != SessionStatus::Done {
        let now = clock.now_ms();
        app.update(now);

        if let Some(sample) = app.breathing.last_sample() {
            let bar = (sample.progress * 30.0).round() as usize;
            if bar != last_bar {
                last_bar = bar;
                let scale = app.breathing.sphere_scale(now);
                println!("          |{:<30}| sphere {:.2}", "#".repeat(bar), scale);
            }
        }

        std::thread::sleep(frame);
    }

    println!("Session complete.");
    Ok(())
}

fn run_scroll(app: &mut App) -> Result<()> {
    let viewport_h = app.viewport[1];

    println!("-- education --");
    let start = viewport_h * app.road.window().start_fraction;
    let end = app.road.window().end_offset;
    let steps = 20;
    for i in 0..=steps {
        let top = start - (start - end) * i as f64 / steps as f64;
        app.handle_event(UiEvent::Scroll {
            section: Section::Education,
            top,
            height: 500.0,
        });
        let frame = app.education_frame();
        println!(
            "top {:>7.1} progress {:.2} marker ({:>7.1}, {:>6.1}) heading {:>6.1} active {:?}",
            top,
            frame.progress.get(),
            frame.marker.x,
            frame.marker.y,
            frame.heading_deg,
            frame.active
        );
    }
    let frame = app.education_frame();
    println!("travelled: {}", frame.travelled.to_svg_path());
    println!("remaining: {}", frame.remaining.to_svg_path());

    println!("-- about --");
    let height = app.carousel.section_height();
    let scrollable = height - viewport_h;
    for i in 0..=steps {
        let top = -scrollable * i as f64 / steps as f64;
        app.handle_event(UiEvent::Scroll {
            section: Section::About,
            top,
            height,
        });
        let progress = app.about_progress();
        let opacities: Vec<String> = app
            .about_weights()
            .iter()
            .map(|w| format!("{:.2}", w.opacity))
            .collect();
        println!(
            "progress {:.2} focused {:?} opacity [{}]",
            progress.get(),
            app.carousel.focused(progress),
            opacities.join(", ")
        );
    }

    Ok(())
}
