//! The dropdown/select component.
//!
//! A [`Dropdown`] is mounted on a [`Document`] with its [`DropdownProps`].
//! It shows a trigger carrying the current title and, while open, a list of
//! options below it. Clicking the trigger toggles the list, clicking an
//! option reports its value through `select` and closes the list, and a
//! pointer-down anywhere outside the last rendered bounds closes it too.

pub mod style;
pub mod view;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::document::{Document, InstanceId, Subscription};
use crate::event::PointerEvent;
use crate::theme::Theme;
use view::{DropdownView, OptionView, RenderedBounds, TriggerView};

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption<T> {
    pub title: String,
    pub value: T,
}

impl<T> DropdownOption<T> {
    pub fn new(title: impl Into<String>, value: T) -> Self {
        Self {
            title: title.into(),
            value,
        }
    }
}

/// Caller configuration, fixed for the lifetime of the mounted instance
pub struct DropdownProps<T> {
    /// Initial title shown on the trigger
    pub label: String,
    /// Entries in display order
    pub options: Vec<DropdownOption<T>>,
    /// Called once per option click with that option's value
    pub select: Box<dyn FnMut(&T)>,
    /// Whitespace separated style tokens patched over the trigger style
    pub style: String,
}

impl<T> DropdownProps<T> {
    pub fn new(
        label: impl Into<String>,
        options: Vec<DropdownOption<T>>,
        select: impl FnMut(&T) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            options,
            select: Box::new(select),
            style: String::new(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for DropdownProps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownProps")
            .field("label", &self.label)
            .field("options", &self.options)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

/// What a screen position lands on, per the last render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Trigger,
    Option(usize),
    /// Inside the list but not on an entry (border, empty list)
    List,
    Outside,
}

#[derive(Debug)]
struct ViewState {
    state: DropdownState,
    title: String,
    bounds: RenderedBounds,
    hovered: Option<usize>,
    chosen: Option<usize>,
}

impl ViewState {
    fn close(&mut self) {
        self.state = DropdownState::Closed;
        self.hovered = None;
        self.bounds.list = None;
        self.bounds.options.clear();
    }

    fn contains(&self, position: Position) -> bool {
        self.bounds.contains(position)
    }
}

pub struct Dropdown<T> {
    label: String,
    options: Vec<DropdownOption<T>>,
    select: Box<dyn FnMut(&T)>,
    style: String,
    view: Rc<RefCell<ViewState>>,
    subscription: Option<Subscription>,
}

impl<T> Dropdown<T> {
    /// Create the instance and subscribe its outside-click listener
    pub fn mount(document: &Document, props: DropdownProps<T>) -> Self {
        let DropdownProps {
            label,
            options,
            select,
            style,
        } = props;

        let view = Rc::new(RefCell::new(ViewState {
            state: DropdownState::Closed,
            title: label.clone(),
            bounds: RenderedBounds::default(),
            hovered: None,
            chosen: None,
        }));

        let subscription = document.subscribe(outside_click_listener(Rc::downgrade(&view)));
        tracing::debug!(
            "Mounted dropdown {} ({:?}, {} options)",
            subscription.id(),
            label,
            options.len()
        );

        Self {
            label,
            options,
            select,
            style,
            view,
            subscription: Some(subscription),
        }
    }

    /// Remove the listener and drop the instance
    pub fn unmount(self) {
        drop(self);
    }

    pub fn id(&self) -> Option<InstanceId> {
        self.subscription.as_ref().map(Subscription::id)
    }

    pub fn state(&self) -> DropdownState {
        self.view.borrow().state
    }

    pub fn is_open(&self) -> bool {
        self.state() == DropdownState::Open
    }

    /// Title currently shown on the trigger
    pub fn title(&self) -> String {
        self.view.borrow().title.clone()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[DropdownOption<T>] {
        &self.options
    }

    /// Index of the most recently chosen option
    pub fn chosen(&self) -> Option<usize> {
        self.view.borrow().chosen
    }

    pub fn hovered(&self) -> Option<usize> {
        self.view.borrow().hovered
    }

    /// Bounds recorded by the last [`Dropdown::render`]
    pub fn bounds(&self) -> RenderedBounds {
        self.view.borrow().bounds.clone()
    }

    pub fn click_trigger(&mut self) {
        let mut view = self.view.borrow_mut();
        match view.state {
            DropdownState::Closed => view.state = DropdownState::Open,
            DropdownState::Open => view.close(),
        }
        tracing::debug!("Dropdown {:?} toggled to {:?}", self.label, view.state);
    }

    /// Choose the option at `index`. Ignored unless the list is open.
    pub fn click_option(&mut self, index: usize) {
        let Some(option) = self.options.get(index) else {
            tracing::debug!("Ignoring click on missing option {}", index);
            return;
        };

        {
            let mut view = self.view.borrow_mut();
            if view.state != DropdownState::Open {
                return;
            }
            view.title = option.title.clone();
            view.chosen = Some(index);
            view.close();
        }

        tracing::debug!("Dropdown {:?} selected {:?}", self.label, option.title);
        // View state is released so the callback may drive the document
        (self.select)(&option.value);
    }

    /// Resolve a screen position against the last render
    pub fn hit(&self, position: Position) -> Hit {
        let view = self.view.borrow();
        let bounds = &view.bounds;

        if bounds.trigger.is_some_and(|r| r.contains(position)) {
            return Hit::Trigger;
        }
        if view.state == DropdownState::Open {
            if let Some(i) = bounds.options.iter().position(|r| r.contains(position)) {
                return Hit::Option(i);
            }
            if bounds.list.is_some_and(|r| r.contains(position)) {
                return Hit::List;
            }
        }
        Hit::Outside
    }

    /// Route a host click to the trigger or an option.
    ///
    /// Outside clicks are not handled here; the document listener closes
    /// the list on pointer-down.
    pub fn click(&mut self, position: Position) -> Hit {
        let hit = self.hit(position);
        match hit {
            Hit::Trigger => self.click_trigger(),
            Hit::Option(index) => self.click_option(index),
            Hit::List | Hit::Outside => {}
        }
        hit
    }

    /// Track the pointer for entry highlighting
    pub fn hover(&self, position: Position) {
        let hovered = match self.hit(position) {
            Hit::Option(index) => Some(index),
            _ => None,
        };
        self.view.borrow_mut().hovered = hovered;
    }

    /// Snapshot of what should be drawn
    pub fn view(&self) -> DropdownView {
        let view = self.view.borrow();
        let open = view.state == DropdownState::Open;

        let trigger = TriggerView {
            title: view.title.clone(),
            style: style::parse_style_tokens(&self.style),
            expanded: open,
        };

        let list = open.then(|| {
            self.options
                .iter()
                .enumerate()
                .map(|(key, option)| OptionView {
                    key,
                    title: option.title.clone(),
                    hovered: view.hovered == Some(key),
                    chosen: view.chosen == Some(key),
                })
                .collect()
        });

        DropdownView { trigger, list }
    }

    /// Draw into `buf` with the trigger filling `area`, and remember where
    /// everything landed for hit testing
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let bounds = self.view().render(area, buf, theme);
        self.view.borrow_mut().bounds = bounds;
    }
}

impl<T> Drop for Dropdown<T> {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            tracing::debug!("Unmounting dropdown {}", subscription.id());
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Dropdown<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("id", &self.id())
            .field("label", &self.label)
            .field("options", &self.options)
            .field("style", &self.style)
            .field("view", &self.view.borrow())
            .finish_non_exhaustive()
    }
}

fn outside_click_listener(view: Weak<RefCell<ViewState>>) -> impl FnMut(&PointerEvent) {
    move |event| {
        let Some(view) = view.upgrade() else {
            return;
        };
        let Ok(mut view) = view.try_borrow_mut() else {
            tracing::trace!("Dropdown view busy, skipping pointer-down");
            return;
        };
        if view.state == DropdownState::Open && !view.contains(event.position) {
            view.close();
            tracing::debug!("Outside click at ({}, {}) closed dropdown", event.position.x, event.position.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fruit_options() -> Vec<DropdownOption<i32>> {
        vec![
            DropdownOption::new("A", 1),
            DropdownOption::new("B", 2),
            DropdownOption::new("C", 3),
        ]
    }

    fn mount_recording(document: &Document) -> (Dropdown<i32>, Rc<RefCell<Vec<i32>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let props = DropdownProps::new("Pick one", fruit_options(), move |v: &i32| {
            sink.borrow_mut().push(*v)
        });
        (Dropdown::mount(document, props), calls)
    }

    fn screen() -> Buffer {
        Buffer::empty(Rect::new(0, 0, 30, 12))
    }

    const TRIGGER: Rect = Rect {
        x: 2,
        y: 1,
        width: 16,
        height: 3,
    };

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_initial_render() {
        let document = Document::new();
        let (dropdown, calls) = mount_recording(&document);
        let mut buf = screen();
        dropdown.render(TRIGGER, &mut buf, &Theme::default());

        assert_eq!(dropdown.state(), DropdownState::Closed);
        assert_eq!(dropdown.title(), "Pick one");
        assert!(dropdown.view().list.is_none());
        assert!(!dropdown.view().trigger.expanded);
        assert!(row_text(&buf, 2).contains("Pick one"));
        assert!(dropdown.bounds().list.is_none());
        assert!(calls.borrow().is_empty());
        assert_eq!(document.listener_count(), 1);
    }

    #[test]
    fn test_trigger_click_opens_list_in_order() {
        let document = Document::new();
        let (mut dropdown, _) = mount_recording(&document);
        dropdown.click_trigger();

        assert_eq!(dropdown.state(), DropdownState::Open);
        let view = dropdown.view();
        assert!(view.trigger.expanded);
        let list = view.list.expect("list is rendered while open");
        let titles: Vec<&str> = list.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        let keys: Vec<usize> = list.iter().map(|o| o.key).collect();
        assert_eq!(keys, [0, 1, 2]);

        let mut buf = screen();
        dropdown.render(TRIGGER, &mut buf, &Theme::default());
        assert_eq!(dropdown.bounds().options.len(), 3);
        // Trigger rows 1..4, list border on 4, entries on 5..8
        assert!(row_text(&buf, 5).contains('A'));
        assert!(row_text(&buf, 6).contains('B'));
        assert!(row_text(&buf, 7).contains('C'));
    }

    #[test]
    fn test_second_trigger_click_closes_and_removes_entries() {
        let document = Document::new();
        let (mut dropdown, _) = mount_recording(&document);
        let theme = Theme::default();

        dropdown.click_trigger();
        dropdown.render(TRIGGER, &mut screen(), &theme);
        dropdown.click_trigger();

        assert_eq!(dropdown.state(), DropdownState::Closed);
        assert!(dropdown.view().list.is_none());

        let mut buf = screen();
        dropdown.render(TRIGGER, &mut buf, &theme);
        assert!(dropdown.bounds().options.is_empty());
        for y in 4..buf.area.bottom() {
            assert_eq!(row_text(&buf, y).trim(), "");
        }
    }

    #[test]
    fn test_option_click_selects_and_closes() {
        let document = Document::new();
        let (mut dropdown, calls) = mount_recording(&document);
        dropdown.click_trigger();
        dropdown.click_option(1);

        assert_eq!(dropdown.title(), "B");
        assert_eq!(*calls.borrow(), vec![2]);
        assert_eq!(dropdown.state(), DropdownState::Closed);
        assert_eq!(dropdown.chosen(), Some(1));
    }

    #[test]
    fn test_option_click_while_closed_is_ignored() {
        let document = Document::new();
        let (mut dropdown, calls) = mount_recording(&document);
        dropdown.click_option(0);
        dropdown.click_trigger();
        dropdown.click_option(99);

        assert!(calls.borrow().is_empty());
        assert_eq!(dropdown.title(), "Pick one");
        assert_eq!(dropdown.state(), DropdownState::Open);
    }

    #[test]
    fn test_outside_pointer_down_closes_without_select() {
        let document = Document::new();
        let (mut dropdown, calls) = mount_recording(&document);
        dropdown.click_trigger();
        dropdown.render(TRIGGER, &mut screen(), &Theme::default());

        document.dispatch_pointer_down(&PointerEvent::at(28, 11));

        assert_eq!(dropdown.state(), DropdownState::Closed);
        assert!(calls.borrow().is_empty());
        assert_eq!(dropdown.title(), "Pick one");
    }

    #[test]
    fn test_inside_pointer_down_keeps_open() {
        let document = Document::new();
        let (mut dropdown, calls) = mount_recording(&document);
        dropdown.click_trigger();
        dropdown.render(TRIGGER, &mut screen(), &Theme::default());

        // Trigger border, list border, and an entry
        for (x, y) in [(2, 1), (2, 4), (5, 6)] {
            document.dispatch_pointer_down(&PointerEvent::at(x, y));
            assert_eq!(dropdown.state(), DropdownState::Open, "closed at ({x}, {y})");
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_click_routes_by_position() {
        let document = Document::new();
        let (mut dropdown, calls) = mount_recording(&document);
        let theme = Theme::default();
        dropdown.render(TRIGGER, &mut screen(), &theme);

        assert_eq!(dropdown.click(Position::new(5, 2)), Hit::Trigger);
        assert!(dropdown.is_open());
        dropdown.render(TRIGGER, &mut screen(), &theme);

        assert_eq!(dropdown.hit(Position::new(2, 4)), Hit::List);
        assert_eq!(dropdown.hit(Position::new(25, 10)), Hit::Outside);

        let pos = Position::new(5, 7);
        document.dispatch_pointer_down(&PointerEvent::at(pos.x, pos.y));
        assert_eq!(dropdown.click(pos), Hit::Option(2));

        assert_eq!(dropdown.title(), "C");
        assert_eq!(*calls.borrow(), vec![3]);
        assert!(!dropdown.is_open());
        // Closed list no longer answers hit tests
        assert_eq!(dropdown.hit(pos), Hit::Outside);
    }

    #[test]
    fn test_hover_highlights_entry() {
        let document = Document::new();
        let (mut dropdown, _) = mount_recording(&document);
        dropdown.click_trigger();
        dropdown.render(TRIGGER, &mut screen(), &Theme::default());

        dropdown.hover(Position::new(5, 6));
        assert_eq!(dropdown.hovered(), Some(1));
        let list = dropdown.view().list.unwrap();
        assert!(list[1].hovered && !list[0].hovered);

        dropdown.hover(Position::new(25, 10));
        assert_eq!(dropdown.hovered(), None);
    }

    #[test]
    fn test_unmount_while_open_removes_listener() {
        let document = Document::new();
        let (mut dropdown, calls) = mount_recording(&document);
        dropdown.click_trigger();
        let id = dropdown.id().unwrap();
        assert!(document.is_subscribed(id));

        dropdown.unmount();

        assert!(!document.is_subscribed(id));
        assert_eq!(document.listener_count(), 0);
        document.dispatch_pointer_down(&PointerEvent::at(28, 11));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_panic_while_open_removes_listener() {
        let document = Document::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let (mut dropdown, _) = mount_recording(&document);
            dropdown.click_trigger();
            assert_eq!(document.listener_count(), 1);
            panic!("host gave up mid-render");
        }));

        assert!(result.is_err());
        assert_eq!(document.listener_count(), 0);
        document.dispatch_pointer_down(&PointerEvent::at(28, 11));
    }

    #[test]
    fn test_repeated_outside_clicks_while_closed_are_noops() {
        let document = Document::new();
        let (dropdown, calls) = mount_recording(&document);
        dropdown.render(TRIGGER, &mut screen(), &Theme::default());

        for _ in 0..3 {
            document.dispatch_pointer_down(&PointerEvent::at(28, 11));
            assert_eq!(dropdown.state(), DropdownState::Closed);
        }
        assert_eq!(dropdown.title(), "Pick one");
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_empty_options_open_to_empty_list() {
        let document = Document::new();
        let mut dropdown = Dropdown::mount(
            &document,
            DropdownProps::new("Nothing", Vec::<DropdownOption<()>>::new(), |_| {}),
        );
        dropdown.click_trigger();
        dropdown.render(TRIGGER, &mut screen(), &Theme::default());

        assert!(dropdown.is_open());
        assert_eq!(dropdown.view().list.map(|l| l.len()), Some(0));
        assert!(dropdown.bounds().list.is_some());
        assert_eq!(dropdown.hit(Position::new(3, 4)), Hit::List);
    }

    #[test]
    fn test_one_listener_per_instance() {
        let document = Document::new();
        let (first, _) = mount_recording(&document);
        let (second, _) = mount_recording(&document);

        assert_eq!(document.listener_count(), 2);
        assert_ne!(first.id(), second.id());
        drop(first);
        assert_eq!(document.listener_count(), 1);
        drop(second);
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn test_select_may_dispatch_on_document() {
        let document = Document::new();
        let inner = document.clone();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut dropdown = Dropdown::mount(
            &document,
            DropdownProps::new("Pick", fruit_options(), move |_| {
                counter.set(counter.get() + 1);
                inner.dispatch_pointer_down(&PointerEvent::at(0, 0));
            }),
        );
        dropdown.click_trigger();
        dropdown.click_option(0);

        assert_eq!(calls.get(), 1);
        assert_eq!(dropdown.title(), "A");
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_caller_style_reaches_trigger() {
        let document = Document::new();
        let dropdown = Dropdown::mount(
            &document,
            DropdownProps::new("Styled", fruit_options(), |_| {}).with_style("bold fg:red"),
        );
        let style = dropdown.view().trigger.style;
        assert_eq!(style.fg, Some(ratatui::style::Color::Red));
        assert!(style.add_modifier.contains(ratatui::style::Modifier::BOLD));
    }
}
