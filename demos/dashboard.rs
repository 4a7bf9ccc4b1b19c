//! # Dashboard Demo
//!
//! A larger screen combining most widgets:
//! - Resource bars and a progress spinner fed by a background task
//! - A process table, an event list and a scrolling log
//! - Help and About modals that trap focus while open
//!
//! Run with: `cargo run --example dashboard`
//! Set `WEFT_LOG=weft.log` to write runtime diagnostics to a file.

use std::time::Duration;

use weft::prelude::*;
use weft::{Runtime, RuntimeOptions};

#[derive(Clone)]
struct Stats {
    cpu: u16,
    memory: u16,
    disk: u16,
    progress: f32,
    log: Vec<String>,
}

#[derive(Clone)]
struct App {
    stats: Shared<Stats>,
    event: Shared<usize>,
    log_offset: Shared<usize>,
    show_help: Shared<bool>,
    show_about: Shared<bool>,
}

const EVENTS: [&str; 6] = [
    "System started successfully",
    "Network connection established",
    "Background task completed",
    "Cache cleaned (2.3 GB freed)",
    "Update check completed",
    "Backup scheduled for 02:00",
];

fn stat_bar(label: &str, percent: u16, color: Color) -> Node {
    let filled = usize::from(percent.min(100)) * 20 / 100;
    let bar = format!("{}{}", "=".repeat(filled), "-".repeat(20 - filled));
    hstack([
        text(format!("{label:<8}[")),
        text(bar).fg(color),
        text("] "),
        text(format!("{percent:>3}%")).bold(),
    ])
}

impl App {
    fn view(&self) -> Node {
        let stats = self.stats.get();

        let resources = Stack::vertical([
            text("System Resources").fg(Color::Yellow),
            stat_bar("CPU", stats.cpu, Color::Green),
            stat_bar("Memory", stats.memory, Color::Yellow),
            stat_bar("Disk", stats.disk, Color::Red),
            Spinner::new()
                .with_style(SpinnerStyle::Dots)
                .with_label("Indexing")
                .with_progress(stats.progress)
                .build()
                .fg(Color::Cyan),
        ])
        .build();

        let processes = Table::new(["PID", "Name", "CPU%"])
            .with_rows([["1", "init", "0.1"], ["412", "sshd", "0.4"], ["977", "postgres", "12.5"]])
            .build()
            .unwrap_or_else(|e| text(e.to_string()));

        let events = List::new(EVENTS, self.event.clone())
            .with_max_visible(4)
            .build()
            .unwrap_or_else(|e| text(e.to_string()));

        let log = ScrollView::new(
            vstack(stats.log.iter().map(|line| text(line.clone()).dim())),
            self.log_offset.clone(),
        )
        .with_max_height(5)
        .build();

        let (help, about) = (self.show_help.clone(), self.show_about.clone());
        let buttons = Stack::horizontal([
            button("Help", move || help.set(true)),
            button("About", move || about.set(true)),
        ])
        .with_spacing(2)
        .build();

        let help_modal = Modal::new(
            self.show_help.clone(),
            vstack([
                text("Navigation").fg(Color::LightGreen),
                text("  tab / shift+tab  move focus"),
                text("  up / down        scroll or select"),
                text("  enter            activate"),
                text("  q                quit"),
                spacer(),
                text("Press any key to close").dim(),
            ]),
        )
        .with_title("Help")
        .build();

        let about_close = self.show_about.clone();
        let about_modal = Modal::new(
            self.show_about.clone(),
            Stack::vertical([
                text("weft").bold().fg(Color::Cyan),
                text("A retained-mode TUI runtime"),
                button("Close", move || about_close.set(false)),
            ])
            .with_align(Align::Center)
            .build(),
        )
        .with_title("About")
        .build();

        Stack::vertical([
            text("=== System Dashboard ===").bold().fg(Color::LightCyan),
            Stack::horizontal([resources, processes]).with_spacing(4).build(),
            Stack::horizontal([
                vstack([text("Recent Events").fg(Color::Yellow), events]),
                vstack([text("Log").fg(Color::Yellow), log]),
            ])
            .with_spacing(4)
            .build(),
            buttons,
            help_modal,
            about_modal,
        ])
        .with_spacing(1)
        .build()
    }
}

#[weft::tokio::main]
async fn main() -> Result<(), weft::RuntimeError> {
    let options = RuntimeOptions {
        log_file: std::env::var_os("WEFT_LOG").map(Into::into),
        ..RuntimeOptions::default()
    };
    let mut runtime = Runtime::with_options(options)?;

    let app = App {
        stats: Shared::new(Stats {
            cpu: 42,
            memory: 68,
            disk: 73,
            progress: 0.0,
            log: vec!["boot ok".into()],
        }),
        event: Shared::new(0),
        log_offset: Shared::new(0),
        show_help: Shared::new(false),
        show_about: Shared::new(false),
    };

    // Simulated telemetry.
    let stats = app.stats.clone();
    let render = runtime.render_handle();
    weft::tokio::spawn(async move {
        let mut interval = weft::tokio::time::interval(Duration::from_millis(500));
        let mut tick: u16 = 0;
        loop {
            interval.tick().await;
            tick = tick.wrapping_add(1);
            stats.update(|s| {
                s.cpu = 20 + (tick % 10) * 7;
                s.memory = 60 + (tick % 10) * 3;
                s.progress = (s.progress + 0.02) % 1.0;
                if tick % 4 == 0 {
                    s.log.push(format!("sample {tick}: cpu {}%", s.cpu));
                }
            });
            render.request_render();
        }
    });

    runtime.set_root(move || Some(app.view()));
    runtime.run().await
}
