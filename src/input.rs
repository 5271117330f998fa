use chrono::NaiveTime;

/// Four-slot HH:MM entry buffer. Digits are vetted position by position so
/// the buffer can only ever extend into a valid 24-hour time; anything else
/// is silently refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeField {
    digits: String,
}

impl TimeField {
    pub fn new() -> Self {
        TimeField::default()
    }

    /// Pre-filled buffer for editing an existing event's time.
    pub fn with_time(time: NaiveTime) -> Self {
        TimeField {
            digits: time.format("%H%M").to_string(),
        }
    }

    /// Append a digit if the position rules allow it. Returns whether the
    /// digit was taken.
    pub fn accept_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() {
            return false;
        }
        let accepted = match self.digits.len() {
            // First hour digit: hours 00-09 are typed as 1x/2x only.
            0 => digit == '1' || digit == '2',
            1 => match self.digits.as_bytes()[0] {
                b'1' => true,
                b'2' => ('0'..='3').contains(&digit),
                _ => false,
            },
            2 => ('0'..='5').contains(&digit),
            3 => true,
            _ => false,
        };
        if accepted {
            self.digits.push(digit);
        }
        accepted
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == 4
    }

    /// Colon-separated display with `_` placeholders for missing digits.
    pub fn display(&self) -> String {
        match self.digits.len() {
            0 => String::new(),
            1 => format!("{}_", self.digits),
            2 => format!("{}:__", self.digits),
            3 => format!("{}:{}_", &self.digits[..2], &self.digits[2..]),
            _ => format!("{}:{}", &self.digits[..2], &self.digits[2..4]),
        }
    }

    /// The entered time, available once all four digits are in. Acceptance
    /// rules guarantee the value parses.
    pub fn value(&self) -> Option<NaiveTime> {
        if !self.is_complete() {
            return None;
        }
        let hour: u32 = self.digits[..2].parse().ok()?;
        let minute: u32 = self.digits[2..4].parse().ok()?;
        NaiveTime::from_hms_opt(hour, minute, 0)
    }
}

/// Single-line text entry with a movable cursor, used for descriptions and
/// search queries.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new(value: &str) -> Self {
        TextField {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_char_boundary(self.cursor, &self.value);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = next_char_boundary(self.cursor, &self.value);
        }
    }

    pub fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

fn prev_char_boundary(cursor: usize, text: &str) -> usize {
    let mut prev = 0;
    for (idx, _) in text.char_indices() {
        if idx >= cursor {
            break;
        }
        prev = idx;
    }
    prev
}

fn next_char_boundary(cursor: usize, text: &str) -> usize {
    for (idx, ch) in text.char_indices() {
        if idx == cursor {
            return cursor + ch.len_utf8();
        }
        if idx > cursor {
            return idx;
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(sequence: &str) -> TimeField {
        let mut field = TimeField::new();
        for ch in sequence.chars() {
            field.accept_digit(ch);
        }
        field
    }

    #[test]
    fn first_digit_must_start_a_valid_hour() {
        let mut field = TimeField::new();
        assert!(!field.accept_digit('0'));
        assert!(!field.accept_digit('3'));
        assert!(!field.accept_digit('9'));
        assert!(field.accept_digit('1'));
    }

    #[test]
    fn second_digit_depends_on_the_first() {
        let mut field = typed("2");
        assert!(!field.accept_digit('5'));
        assert!(field.accept_digit('3'));

        let mut field = typed("1");
        assert!(field.accept_digit('9'));
        assert_eq!(field.display(), "19:__");
    }

    #[test]
    fn minute_digits_follow_their_own_rules() {
        let mut field = typed("14");
        assert!(!field.accept_digit('6'));
        assert!(field.accept_digit('5'));
        assert!(field.accept_digit('9'));
        assert_eq!(field.display(), "14:59");
    }

    #[test]
    fn full_buffer_refuses_further_digits() {
        let mut field = typed("1430");
        assert!(!field.accept_digit('0'));
        assert_eq!(field.display(), "14:30");
    }

    #[test]
    fn non_digits_are_refused() {
        let mut field = TimeField::new();
        assert!(!field.accept_digit('a'));
        assert!(!field.accept_digit(':'));
        assert!(field.is_empty());
    }

    #[test]
    fn display_pads_missing_digits() {
        assert_eq!(typed("").display(), "");
        assert_eq!(typed("1").display(), "1_");
        assert_eq!(typed("14").display(), "14:__");
        assert_eq!(typed("143").display(), "14:3_");
        assert_eq!(typed("1430").display(), "14:30");
    }

    #[test]
    fn completion_yields_a_parsed_time() {
        let field = typed("1430");
        assert!(field.is_complete());
        assert_eq!(
            field.value(),
            Some(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
        );
        assert_eq!(typed("143").value(), None);
    }

    #[test]
    fn backspace_always_removes_the_last_digit() {
        let mut field = typed("1430");
        field.backspace();
        assert_eq!(field.display(), "14:3_");
        field.backspace();
        field.backspace();
        field.backspace();
        assert!(field.is_empty());
        field.backspace();
        assert!(field.is_empty());
    }

    #[test]
    fn prefill_round_trips_an_event_time() {
        let field = TimeField::with_time(NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert!(field.is_complete());
        assert_eq!(field.display(), "09:05");
        assert_eq!(
            field.value(),
            Some(NaiveTime::from_hms_opt(9, 5, 0).unwrap())
        );
    }

    #[test]
    fn text_field_edits_at_the_cursor() {
        let mut field = TextField::new("lunch");
        field.move_left();
        field.insert_char('!');
        assert_eq!(field.value(), "lunc!h");
        field.backspace();
        field.move_right();
        field.insert_char('?');
        assert_eq!(field.value(), "lunch?");
        assert!(!field.is_blank());
        assert!(TextField::new("   ").is_blank());
    }
}
