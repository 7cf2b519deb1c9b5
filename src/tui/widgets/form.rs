//! Reusable form widget: text inputs, choice selectors and checkboxes.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::theme::Palette;

/// Height of one field row, borders included.
const ROW_HEIGHT: u16 = 3;

/// How a [`FormField`] is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text typed character by character.
    Text,
    /// One of a fixed list of labels, cycled with Left/Right.
    /// An empty value means nothing is selected yet.
    Choice(Vec<&'static str>),
    /// A checkbox flipped with Space.
    Toggle,
}

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Display label shown in the field border.
    pub label: String,
    /// Current value. Toggles hold [`CHECKED`] or nothing.
    pub value: String,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Whether the field must be filled in on submit.
    pub required: bool,
    pub kind: FieldKind,
}

/// Value stored in a checked toggle.
pub const CHECKED: &str = "x";

impl FormField {
    /// Creates a new text field.
    pub fn new(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            error: None,
            required,
            kind: FieldKind::Text,
        }
    }

    /// Creates a choice field with nothing selected.
    pub fn choice(
        label: impl Into<String>,
        options: Vec<&'static str>,
        required: bool,
    ) -> Self {
        Self {
            kind: FieldKind::Choice(options),
            ..Self::new(label, required)
        }
    }

    /// Creates an unchecked toggle.
    pub fn toggle(label: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Toggle,
            ..Self::new(label, false)
        }
    }

    fn is_checked(&self) -> bool {
        self.value == CHECKED
    }
}

/// A multi-field form with focus management.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Creates a new form with the given fields. Focus starts on the first field.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to `index` if it is in bounds.
    pub fn set_focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = index;
        }
    }

    /// Moves focus to the last field.
    pub fn focus_last(&mut self) {
        self.focus = self.fields.len().saturating_sub(1);
    }

    /// Returns `true` when the focus is on the last field.
    pub fn is_last_focused(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Types a character into the focused field.
    ///
    /// Text fields append it; a space flips a toggle; choices ignore it.
    pub fn insert_char(&mut self, ch: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match field.kind {
            FieldKind::Text => field.value.push(ch),
            FieldKind::Toggle if ch == ' ' => {
                if field.is_checked() {
                    field.value.clear();
                } else {
                    field.value = CHECKED.to_string();
                }
            }
            FieldKind::Toggle | FieldKind::Choice(_) => {}
        }
    }

    /// Deletes the last character from the focused text field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.kind == FieldKind::Text
        {
            field.value.pop();
        }
    }

    /// Selects the next or previous option of the focused choice field.
    ///
    /// From an empty selection, forward picks the first option and backward
    /// the last.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        let FieldKind::Choice(options) = &field.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let next = match options.iter().position(|o| *o == field.value) {
            Some(pos) if forward => (pos + 1) % options.len(),
            Some(pos) => (pos + options.len() - 1) % options.len(),
            None if forward => 0,
            None => options.len() - 1,
        };
        field.value = options[next].to_string();
    }

    /// Sets an error message on a field by index.
    pub fn set_error(&mut self, index: usize, error: String) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(error);
        }
    }

    /// Clears all field errors.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Returns the value of the field at `index`, or an empty string if out of bounds.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Returns whether the toggle at `index` is checked.
    pub fn is_checked(&self, index: usize) -> bool {
        self.fields.get(index).is_some_and(FormField::is_checked)
    }

    /// Replaces the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Empties the field at `index`.
    pub fn clear_value(&mut self, index: usize) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value.clear();
        }
    }

    /// Resets all field values and errors.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.error = None;
        }
        self.focus = 0;
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Index of the first row to draw so the focused field is visible.
    fn scroll_offset(&self, visible_rows: usize) -> usize {
        if visible_rows == 0 {
            return self.focus;
        }
        (self.focus + 1).saturating_sub(visible_rows)
    }
}

fn field_text(field: &FormField) -> String {
    match field.kind {
        FieldKind::Text => field.value.clone(),
        FieldKind::Choice(_) if field.value.is_empty() => "◀ — ▶".to_string(),
        FieldKind::Choice(_) => format!("◀ {} ▶", field.value),
        FieldKind::Toggle if field.is_checked() => "[x]".to_string(),
        FieldKind::Toggle => "[ ]".to_string(),
    }
}

/// Renders a form within the given area.
///
/// `focused` is `false` when another part of the screen owns the input
/// focus; no field is highlighted then. Fields that do not fit are scrolled
/// so the focused one stays visible.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, focused: bool, palette: &Palette, frame: &mut Frame, area: Rect) {
    let visible = usize::from(area.height / ROW_HEIGHT);
    let offset = if focused { form.scroll_offset(visible) } else { 0 };
    let shown: Vec<(usize, &FormField)> = form
        .fields
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .collect();

    let constraints: Vec<Constraint> = shown
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();
    let rows = Layout::vertical(constraints).split(area);

    for (row, (i, field)) in rows.iter().zip(shown) {
        let is_focused = focused && i == form.focus;

        let border_color = if field.error.is_some() {
            palette.error
        } else if is_focused {
            palette.focus
        } else {
            palette.muted
        };

        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::styled(
            field_text(field),
            Style::default().fg(palette.text),
        )];
        if is_focused && field.kind == FieldKind::Text {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, *row);

        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(palette.error)));
            let err_area = Rect {
                x: row.x + 2,
                y: row.y + ROW_HEIGHT.saturating_sub(1),
                width: row.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_form() -> Form {
        Form::new(vec![
            FormField::new("Nom", true),
            FormField::choice("Sexe", vec!["Homme", "Femme"], true),
            FormField::toggle("Permis A"),
        ])
    }

    // --- Focus management ---

    #[test]
    fn focus_starts_at_zero() {
        let form = make_form();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_next_wraps() {
        let mut form = make_form();
        form.focus_next();
        form.focus_next();
        assert!(form.is_last_focused());
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_prev_wraps() {
        let mut form = make_form();
        form.focus_prev();
        assert_eq!(form.focus(), 2);
    }

    #[test]
    fn focus_next_empty_form_is_noop() {
        let mut form = Form::new(vec![]);
        form.focus_next();
        form.focus_prev();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn set_focus_ignores_out_of_bounds() {
        let mut form = make_form();
        form.set_focus(2);
        assert_eq!(form.focus(), 2);
        form.set_focus(9);
        assert_eq!(form.focus(), 2);
    }

    #[test]
    fn focus_last_moves_to_end() {
        let mut form = make_form();
        form.focus_last();
        assert_eq!(form.focus(), 2);
    }

    // --- Text ---

    #[test]
    fn insert_and_delete_on_text() {
        let mut form = make_form();
        form.insert_char('D');
        form.insert_char('o');
        form.delete_char();
        assert_eq!(form.value(0), "D");
    }

    #[test]
    fn delete_char_on_empty_is_noop() {
        let mut form = make_form();
        form.delete_char();
        assert_eq!(form.value(0), "");
    }

    // --- Choice ---

    #[test]
    fn choice_ignores_typing() {
        let mut form = make_form();
        form.set_focus(1);
        form.insert_char('H');
        form.delete_char();
        assert_eq!(form.value(1), "");
    }

    #[test]
    fn choice_forward_from_empty_picks_first() {
        let mut form = make_form();
        form.set_focus(1);
        form.cycle_choice(true);
        assert_eq!(form.value(1), "Homme");
        form.cycle_choice(true);
        assert_eq!(form.value(1), "Femme");
        form.cycle_choice(true);
        assert_eq!(form.value(1), "Homme");
    }

    #[test]
    fn choice_backward_from_empty_picks_last() {
        let mut form = make_form();
        form.set_focus(1);
        form.cycle_choice(false);
        assert_eq!(form.value(1), "Femme");
    }

    #[test]
    fn cycle_on_text_is_noop() {
        let mut form = make_form();
        form.cycle_choice(true);
        assert_eq!(form.value(0), "");
    }

    // --- Toggle ---

    #[test]
    fn space_flips_toggle() {
        let mut form = make_form();
        form.set_focus(2);
        form.insert_char(' ');
        assert!(form.is_checked(2));
        form.insert_char(' ');
        assert!(!form.is_checked(2));
    }

    #[test]
    fn other_chars_do_not_flip_toggle() {
        let mut form = make_form();
        form.set_focus(2);
        form.insert_char('x');
        assert!(!form.is_checked(2));
    }

    #[test]
    fn field_text_renders_each_kind() {
        let mut form = make_form();
        form.set_value(0, "Doe");
        form.set_value(1, "Femme");
        form.set_value(2, CHECKED);
        let texts: Vec<String> = form.fields().iter().map(field_text).collect();
        assert_eq!(texts, vec!["Doe", "◀ Femme ▶", "[x]"]);
    }

    // --- Errors and values ---

    #[test]
    fn set_and_clear_errors() {
        let mut form = make_form();
        assert!(!form.has_errors());
        form.set_error(0, "requis".into());
        assert!(form.has_errors());
        form.set_error(99, "ignored".into());
        form.clear_errors();
        assert!(!form.has_errors());
    }

    #[test]
    fn set_and_clear_value() {
        let mut form = make_form();
        form.set_value(0, "Doe");
        assert_eq!(form.value(0), "Doe");
        form.clear_value(0);
        assert_eq!(form.value(0), "");
        assert_eq!(form.value(99), "");
    }

    #[test]
    fn reset_clears_values_errors_and_focus() {
        let mut form = make_form();
        form.insert_char('X');
        form.set_focus(2);
        form.set_error(0, "err".into());
        form.reset();
        assert_eq!(form.value(0), "");
        assert_eq!(form.focus(), 0);
        assert!(!form.has_errors());
    }

    // --- Scrolling ---

    #[test]
    fn scroll_keeps_focus_visible() {
        let mut form = make_form();
        assert_eq!(form.scroll_offset(2), 0);
        form.set_focus(2);
        assert_eq!(form.scroll_offset(2), 1);
        assert_eq!(form.scroll_offset(3), 0);
    }
}
