//! # Counter Demo
//!
//! The smallest weft application:
//! - State lives in a [`Shared`] handle outside the tree
//! - The root builder returns a fresh tree every frame
//! - Buttons mutate state through closures
//!
//! Run with: `cargo run --example counter`

use weft::prelude::*;
use weft::Keymap;

#[weft::tokio::main]
async fn main() -> Result<(), weft::RuntimeError> {
    let count = Shared::new(0i64);
    let help = Keymap::default().help_line();

    weft::run(move || {
        let value = count.get();
        let color = match value {
            n if n > 0 => Color::Green,
            n if n < 0 => Color::Red,
            _ => Color::White,
        };
        let (inc, dec, reset) = (count.clone(), count.clone(), count.clone());

        Some(pad(
            Stack::vertical([
                text(" Counter ").fg(Color::Cyan).bold(),
                text(format!("Count: {value}")).fg(color).bold(),
                Stack::horizontal([
                    button("+1", move || inc.update(|n| *n += 1)),
                    button("-1", move || dec.update(|n| *n -= 1)),
                    button("reset", move || reset.set(0)),
                ])
                .with_spacing(2)
                .build(),
                text(help.clone()).dim(),
            ])
            .with_spacing(1)
            .build(),
            1,
        ))
    })
    .await
}
