use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::widgets::Block;
use ratatui::Terminal;
use tui_tree_table::{json::from_json, TreeNode, TreeTable, TreeTableState};

const DOCUMENT: &str = r#"{
    "device": {
        "vendor": "ACME",
        "Beh": [0, 1, 4],
        "measurements": {
            "phsA": [33.44, 55.44, 66.44],
            "phsB": [22.44, 66.44, 77.44],
            "phsC": [11.44, 33.44, 55.44]
        }
    },
    "revision": 7
}"#;

fn main() -> std::io::Result<()> {
    let json: serde_json::Value = serde_json::from_str(DOCUMENT).expect("demo document is valid");
    let tree = from_json("document", &json);

    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &tree);

    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, tree: &TreeNode) -> std::io::Result<()> {
    let mut state = TreeTableState::default();
    state.set_data(Some(tree));

    loop {
        terminal.draw(|frame| {
            let widget =
                TreeTable::new(Some(tree)).block(Block::bordered().title("JSON Tree Table"));
            frame.render_stateful_widget(widget, frame.size(), &mut state);
        })?;

        match crossterm::event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                _ => {}
            },
            Event::Mouse(mouse) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    if let Some(index) = usize::from(mouse.row).checked_sub(1) {
                        state.toggle_visible(Some(tree), index);
                    }
                }
            }
            _ => {}
        }
    }
}
