use std::rc::Rc;

use crossterm::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::widgets::Block;
use ratatui::Terminal;
use simplelog::{Config, LevelFilter, WriteLogger};
use tui_tree_table::{TreeNode, TreeTable, TreeTableEvent, TreeTableState, Value};

struct App {
    tree: TreeNode,
    state: TreeTableState,
}

impl App {
    fn new() -> Self {
        let tree = TreeNode::branch(
            "IED1",
            vec![
                TreeNode::branch(
                    "LD1",
                    vec![
                        TreeNode::branch(
                            "LLN0",
                            vec![TreeNode::values(
                                "Beh",
                                vec![
                                    Value::new(0),
                                    Value::editable(1, Rc::new(|| log::info!("edit Beh[1]"))),
                                    Value::new(4),
                                ],
                            )],
                        ),
                        TreeNode::branch(
                            "MMXU1",
                            vec![TreeNode::branch(
                                "A",
                                vec![
                                    TreeNode::values(
                                        "phsA",
                                        vec![
                                            Value::new(33.44),
                                            Value::editable(
                                                55.44,
                                                Rc::new(|| log::info!("edit phsA[1]")),
                                            ),
                                            Value::new(66.44),
                                        ],
                                    ),
                                    TreeNode::values(
                                        "phsB",
                                        vec![
                                            Value::new(22.44),
                                            Value::new(66.44),
                                            Value::new(77.44),
                                        ],
                                    ),
                                    TreeNode::values(
                                        "phsC",
                                        vec![
                                            Value::new(11.44),
                                            Value::new(33.44),
                                            Value::new(55.44),
                                        ],
                                    ),
                                ],
                            )],
                        )
                        .info("This is a logical node for measurement"),
                    ],
                ),
                // Declared but still empty: unfolding asks for its content
                TreeNode::branch("LD2", vec![]),
                TreeNode::branch("LD3", vec![]),
            ],
        );

        let mut state = TreeTableState::default();
        state.set_data(Some(&tree));
        Self { tree, state }
    }

    /// The lazy-load collaborator: populate a subtree the table asked for.
    fn populate(&mut self, event: &TreeTableEvent) {
        let TreeTableEvent::UnfoldRequested { path, node } = event;
        log::debug!("populating {:?} ({}) on demand", path, node.name);
        if let Some(node) = self.tree.node_at_mut(path) {
            node.add_child(TreeNode::branch(
                "LLN0",
                vec![TreeNode::values("Beh", vec![Value::new(0)])],
            ));
        }
    }
}

fn main() -> std::io::Result<()> {
    let _ = WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        std::fs::File::create("tree-table-demo.log")?,
    );

    // Terminal initialization
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // App
    let app = App::new();
    let res = run_app(&mut terminal, app);

    // restore terminal
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

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        terminal.draw(|frame| {
            let widget = TreeTable::new(Some(&app.tree)).block(
                Block::bordered()
                    .title("Tree Table")
                    .title_bottom("q quits · click toggles · right click edits"),
            );
            frame.render_stateful_widget(widget, frame.size(), &mut app.state);
        })?;

        match crossterm::event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(index) = clicked_row(mouse) {
                        app.state.toggle_visible(Some(&app.tree), index);
                    }
                }
                MouseEventKind::Down(MouseButton::Right) => {
                    if let Some(index) = clicked_row(mouse) {
                        edit_first_editable_cell(&app, index);
                    }
                }
                _ => {}
            },
            _ => {}
        }

        for event in app.state.drain_events() {
            app.populate(&event);
        }
    }
}

/// Visible row index of a click, accounting for the block border.
fn clicked_row(mouse: MouseEvent) -> Option<usize> {
    usize::from(mouse.row).checked_sub(1)
}

fn edit_first_editable_cell(app: &App, index: usize) {
    let visible = app.state.visible_rows(Some(&app.tree));
    if let Some(row) = visible.get(index) {
        let columns = app.state.max_leaf_columns();
        let _ = (0..columns).any(|column| row.activate_edit(column));
    }
}
