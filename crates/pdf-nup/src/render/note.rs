//! Companion notes drawn from extracted names

use crate::constants::{
    NOTE_BORDER_DASH, NOTE_BORDER_WIDTH, NOTE_INSET_TOP_MM, NOTE_INSET_X_MM, mm_to_pt,
};
use crate::layout::Rect;
use crate::options::NoteOptions;

use super::PageSurface;

/// Draws the note that accompanies one item.
///
/// Implementations only draw inside `rect`; they never change page state
/// outside a `q ... Q` pair.
pub trait NoteRenderer {
    fn draw_note(&self, surface: &mut PageSurface, name: &str, rect: &Rect);
}

/// Thank-you card with a dashed cutting border
#[derive(Debug, Clone, Default)]
pub struct ThankYouNote {
    options: NoteOptions,
}

impl ThankYouNote {
    pub fn new(options: NoteOptions) -> Self {
        Self { options }
    }

    /// Text lines with the name filled in
    pub fn lines_for(&self, name: &str) -> Vec<String> {
        self.options
            .lines
            .iter()
            .map(|line| line.replace("{name}", name))
            .collect()
    }
}

impl NoteRenderer for ThankYouNote {
    fn draw_note(&self, surface: &mut PageSurface, name: &str, rect: &Rect) {
        if self.options.border {
            let (dash_on, dash_off) = NOTE_BORDER_DASH;
            surface.push_op(format!(
                "q 0 0 0 RG [{} {}] 0 d {} w {} {} {} {} re S Q\n",
                dash_on,
                dash_off,
                NOTE_BORDER_WIDTH,
                rect.x,
                rect.y,
                rect.width,
                rect.height
            ));
        }

        let font = surface.use_font();
        let x = rect.x + mm_to_pt(NOTE_INSET_X_MM);
        let y = rect.top() - mm_to_pt(NOTE_INSET_TOP_MM);

        let mut ops = format!(
            "q BT /{} {} Tf {} TL {} {} Td\n",
            font, self.options.font_size_pt, self.options.leading_pt, x, y
        );
        for (i, line) in self.lines_for(name).iter().enumerate() {
            if i > 0 {
                ops.push_str("T* ");
            }
            ops.push_str(&format!("({}) Tj\n", escape_pdf_string(line)));
        }
        ops.push_str("ET Q\n");
        surface.push_op(ops);
    }
}

/// Escape text for a PDF literal string in a single-byte font.
///
/// Characters outside Latin-1 have no glyph there and become `?`.
pub fn escape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            c if (c as u32) >= 0xA0 && (c as u32) <= 0xFF => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_specials_and_non_latin() {
        assert_eq!(escape_pdf_string("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(escape_pdf_string("Zoë"), "Zo\\353");
        assert_eq!(escape_pdf_string("राम"), "???");
        assert_eq!(escape_pdf_string("Thank you!"), "Thank you!");
    }

    #[test]
    fn test_name_substituted_into_lines() {
        let note = ThankYouNote::new(NoteOptions {
            lines: vec!["Dear {name},".to_string(), "thanks".to_string()],
            ..NoteOptions::default()
        });
        assert_eq!(note.lines_for("Asha Rao"), vec!["Dear Asha Rao,", "thanks"]);
    }

    #[test]
    fn test_draw_note_stays_balanced() {
        let note = ThankYouNote::default();
        let mut surface = PageSurface::default();
        note.draw_note(&mut surface, "Asha", &Rect::new(10.0, 10.0, 200.0, 150.0));

        let content = surface.content();
        assert!(content.contains("re S"));
        assert!(content.contains("(Thank you Asha ji!) Tj"));
        assert_eq!(content.matches("q ").count(), content.matches(" Q\n").count());
        assert_eq!(content.matches("BT").count(), content.matches("ET").count());
    }

    #[test]
    fn test_border_can_be_disabled() {
        let note = ThankYouNote::new(NoteOptions {
            border: false,
            ..NoteOptions::default()
        });
        let mut surface = PageSurface::default();
        note.draw_note(&mut surface, "Asha", &Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!surface.content().contains("re S"));
    }
}
