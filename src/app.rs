use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

use dropdown_tui::{Document, Dropdown, DropdownOption, DropdownProps, Hit, PointerEvent, Theme};

use crate::config::DemoConfig;

/// What the demo prints on exit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub title: String,
    pub value: String,
}

pub struct App {
    pub document: Document,
    pub dropdown: Dropdown<String>,
    pub theme: Theme,

    // Last value reported through the select callback
    selected: Rc<RefCell<Option<String>>>,

    // Shown in the info line
    pub status_message: Option<String>,

    pub should_quit: bool,
}

impl App {
    pub fn new(config: DemoConfig) -> Self {
        let document = Document::new();
        let selected = Rc::new(RefCell::new(None));

        let options: Vec<DropdownOption<String>> =
            config.options.into_iter().map(Into::into).collect();

        let sink = Rc::clone(&selected);
        let props = DropdownProps::new(config.label, options, move |value: &String| {
            tracing::info!("Selected {:?}", value);
            *sink.borrow_mut() = Some(value.clone());
        })
        .with_style(config.style);

        let dropdown = Dropdown::mount(&document, props);

        Self {
            document,
            dropdown,
            theme: Theme::load(&config.theme),
            selected,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);

        if let Some(pointer) = PointerEvent::from_mouse(&mouse) {
            // Document listeners see every press first, like a capture phase
            self.document.dispatch_pointer_down(&pointer);
            if pointer.button != MouseButton::Left {
                return;
            }
            if let Hit::Option(_) = self.dropdown.click(position) {
                self.status_message = Some(format!("Selected {}", self.dropdown.title()));
            }
            return;
        }

        if let MouseEventKind::Moved = mouse.kind {
            self.dropdown.hover(position);
        }
    }

    /// The chosen option, if the user picked one
    pub fn selection(&self) -> Option<Selection> {
        let value = self.selected.borrow().clone()?;
        Some(Selection {
            title: self.dropdown.title(),
            value,
        })
    }
}
