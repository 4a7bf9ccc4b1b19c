//! # Toasts Demo
//!
//! Notifications that slide in from each edge:
//! - Each button raises a toast at a different anchor
//! - Close actions post messages on a channel, collected by a background task
//! - The task wakes the UI through a [`RenderHandle`](weft::RenderHandle)
//!
//! Run with: `cargo run --example toasts`

use std::time::Duration;

use weft::prelude::*;
use weft::tokio::sync::mpsc;
use weft::{Runtime, RuntimeOptions};

const ANCHORS: [(&str, ToastPosition); 4] = [
    ("Top", ToastPosition::Top),
    ("Bottom", ToastPosition::Bottom),
    ("Top right", ToastPosition::TopRight),
    ("Bottom right", ToastPosition::BottomRight),
];

#[weft::tokio::main]
async fn main() -> Result<(), weft::RuntimeError> {
    let options = RuntimeOptions {
        log_file: std::env::var_os("WEFT_LOG").map(Into::into),
        ..RuntimeOptions::default()
    };
    let mut runtime = Runtime::with_options(options)?;

    let flags: Vec<Shared<bool>> = ANCHORS.iter().map(|_| Shared::new(false)).collect();
    let sticky = Shared::new(false);
    let closed = Shared::new(Vec::<String>::new());

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let render = runtime.render_handle();
    let log = closed.clone();
    weft::tokio::spawn(async move {
        while let Some(name) = rx.recv().await {
            log.update(|l| l.push(format!("{name} toast closed")));
            render.request_render();
        }
    });

    runtime.set_root(move || {
        let buttons = ANCHORS.iter().zip(&flags).map(|((name, _), flag)| {
            let flag = flag.clone();
            button(*name, move || flag.set(true))
        });
        let toggle = sticky.clone();
        let controls = Stack::horizontal(buttons)
            .with_spacing(1)
            .with_child(button("Sticky", move || toggle.update(|v| *v = !*v)))
            .build();

        let history = closed.with(|l| l.iter().rev().take(5).cloned().collect::<Vec<_>>());
        let mut children = vec![
            text("Toasts").bold().fg(Color::Cyan),
            controls,
            text("Recently closed:").fg(Color::Yellow),
        ];
        children.extend(history.into_iter().map(|line| text(format!("  {line}")).dim()));

        for ((name, position), flag) in ANCHORS.iter().zip(&flags) {
            children.push(
                Toast::new(format!("{name} toast"), flag.clone())
                    .with_position(*position)
                    .with_auto_dismiss(Duration::from_millis(1500))
                    .on_close(Callback::post(tx.clone(), (*name).to_owned()))
                    .build()
                    .colors(Color::Black, Color::LightGreen),
            );
        }
        children.push(
            Toast::new("Sticky: press Sticky again to dismiss", sticky.clone())
                .with_position(ToastPosition::Top)
                .sticky()
                .build()
                .reversed(),
        );

        Some(pad(Stack::vertical(children).with_spacing(1).build(), 1))
    });
    runtime.run().await
}
