//! # Todo Demo
//!
//! Text input, a list with a select action, and a modal confirmation:
//! - Type an item and press Enter on "Add"
//! - Enter on a list row marks it done
//! - "Clear all" asks for confirmation in a modal
//!
//! Run with: `cargo run --example todo`

use weft::prelude::*;

const MAX_TODOS: usize = 20;

#[derive(Clone)]
struct Todo {
    title: String,
    done: bool,
}

#[derive(Clone)]
struct App {
    todos: Shared<Vec<Todo>>,
    input: Shared<String>,
    selected: Shared<usize>,
    confirm_clear: Shared<bool>,
}

impl App {
    fn new() -> Self {
        Self {
            todos: Shared::new(Vec::new()),
            input: Shared::new(String::new()),
            selected: Shared::new(0),
            confirm_clear: Shared::new(false),
        }
    }

    fn add(&self) {
        let title = self.input.update(std::mem::take);
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        self.todos.update(|todos| {
            if todos.len() < MAX_TODOS {
                todos.push(Todo {
                    title: title.to_owned(),
                    done: false,
                });
            }
        });
    }

    fn toggle(&self, index: usize) {
        self.todos.update(|todos| {
            if let Some(todo) = todos.get_mut(index) {
                todo.done = !todo.done;
            }
        });
    }

    fn view(&self) -> Node {
        let todos = self.todos.get();
        let header = text(format!("TODO List ({}/{} items)", todos.len(), MAX_TODOS)).bold();

        let app = self.clone();
        let entry = Stack::horizontal([
            text("Add: "),
            TextInput::new(self.input.clone()).with_capacity(64).build(),
            button("Add", move || app.add()),
        ])
        .with_spacing(1)
        .build();

        let rows: Vec<String> = todos
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. [{}] {}", i + 1, if t.done { "x" } else { " " }, t.title))
            .collect();
        let app = self.clone();
        let items = List::new(rows, self.selected.clone())
            .with_max_visible(8)
            .on_select(move |i| app.toggle(i))
            .build()
            .unwrap_or_else(|_| text("No items yet. Add one above!").dim());

        let confirm = self.confirm_clear.clone();
        let (todos_handle, close) = (self.todos.clone(), self.confirm_clear.clone());
        let dialog = Modal::new(
            self.confirm_clear.clone(),
            Stack::horizontal([
                button("Delete all", move || {
                    todos_handle.set(Vec::new());
                    close.set(false);
                }),
                button("Keep", {
                    let close = self.confirm_clear.clone();
                    move || close.set(false)
                }),
            ])
            .with_spacing(2)
            .build(),
        )
        .with_title("Clear all items?")
        .build();

        Stack::vertical([
            header,
            entry,
            items,
            button("Clear all", move || confirm.set(true)),
            text("tab: next field • enter: add / toggle • q: quit").dim(),
            dialog,
        ])
        .with_spacing(1)
        .build()
    }
}

#[weft::tokio::main]
async fn main() -> Result<(), weft::RuntimeError> {
    let app = App::new();
    weft::run(move || Some(app.view())).await?;
    Ok(())
}
