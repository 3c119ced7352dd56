//! View tree for a dropdown and its rendering into a ratatui buffer.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;

/// Everything needed to draw one dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownView {
    pub trigger: TriggerView,
    /// Present only while open
    pub list: Option<Vec<OptionView>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerView {
    pub title: String,
    /// Caller style tokens, already parsed
    pub style: Style,
    /// Whether the list is showing (aria-expanded)
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    /// Positional index in the caller's options
    pub key: usize,
    pub title: String,
    pub hovered: bool,
    /// Last option the user picked (aria-selected)
    pub chosen: bool,
}

/// Screen areas occupied by the last render, clipped to the buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBounds {
    pub trigger: Option<Rect>,
    pub list: Option<Rect>,
    /// One row per visible entry, indexed like the options
    pub options: Vec<Rect>,
}

impl RenderedBounds {
    pub fn contains(&self, position: Position) -> bool {
        self.trigger.is_some_and(|r| r.contains(position))
            || self.list.is_some_and(|r| r.contains(position))
    }
}

impl DropdownView {
    /// Draw the trigger into `area` and the list, if any, next to it.
    ///
    /// The list opens below the trigger, or above it when there is more
    /// room there. Entries that don't fit are cut off.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) -> RenderedBounds {
        let mut bounds = RenderedBounds::default();

        let trigger_area = area.intersection(buf.area);
        if trigger_area.is_empty() {
            return bounds;
        }
        self.render_trigger(trigger_area, buf, theme);
        bounds.trigger = Some(trigger_area);

        let Some(entries) = &self.list else {
            return bounds;
        };

        let list_area = list_area(trigger_area, buf.area, entries.len());
        if list_area.is_empty() {
            return bounds;
        }

        Clear.render(list_area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));
        let inner = block.inner(list_area);
        block.render(list_area, buf);

        for (entry, y) in entries.iter().zip(inner.top()..inner.bottom()) {
            let row = Rect::new(inner.x, y, inner.width, 1);
            render_entry(entry, row, buf, theme);
            bounds.options.push(row);
        }
        bounds.list = Some(list_area);

        bounds
    }

    fn render_trigger(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let trigger = &self.trigger;
        let border_color = if trigger.expanded { theme.accent } else { theme.inactive };
        let base = Style::default().fg(theme.text);
        let style = base.patch(trigger.style);

        let arrow = if trigger.expanded { "▴" } else { "▾" };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .style(style);
        let inner = block.inner(area);

        // Title left, arrow pinned to the right edge
        let title_width = usize::from(inner.width.saturating_sub(2));
        let (title, used) = fit_width(&trigger.title, title_width);
        let pad = title_width - used;

        let line = Line::from(vec![
            Span::raw(title),
            Span::raw(" ".repeat(pad + 1)),
            Span::styled(arrow, Style::default().fg(border_color)),
        ]);

        Paragraph::new(line).block(block).render(area, buf);
    }
}

/// Longest prefix of `text` that fits in `columns`, and its width
fn fit_width(text: &str, columns: usize) -> (String, usize) {
    let mut fitted = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > columns {
            break;
        }
        fitted.push(c);
        used += w;
    }
    (fitted, used)
}

fn render_entry(entry: &OptionView, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let (marker, marker_color) = if entry.chosen {
        ("● ", theme.header)
    } else if entry.hovered {
        ("› ", theme.accent)
    } else {
        ("  ", theme.text_dim)
    };

    let row_style = if entry.hovered {
        Style::default().bg(theme.bg_selected).fg(theme.text)
    } else {
        Style::default().fg(theme.text)
    };
    let title_style = if entry.chosen {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Paragraph::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(marker_color)),
        Span::styled(entry.title.as_str(), title_style),
    ]))
    .style(row_style)
    .render(area, buf);
}

/// Where the list goes for a trigger at `trigger` inside `screen`
fn list_area(trigger: Rect, screen: Rect, entries: usize) -> Rect {
    let wanted = u16::try_from(entries).unwrap_or(u16::MAX).saturating_add(2);
    let below = screen.bottom().saturating_sub(trigger.bottom());
    let above = trigger.top().saturating_sub(screen.top());

    let area = if below >= wanted || below >= above {
        Rect::new(trigger.x, trigger.bottom(), trigger.width, wanted.min(below))
    } else {
        let height = wanted.min(above);
        Rect::new(trigger.x, trigger.top() - height, trigger.width, height)
    };
    area.intersection(screen)
}
