use std::io::{self, Write};
use crate::enums::note_field::NoteField;
use crate::structs::note_progress::NoteProgress;

/// Prints notes as they stream in, emitting only the newly arrived suffix
/// of a field whenever it extends what is already on screen.
pub struct NotePrinter<W: Write> {
    out: W,
    current: Option<NoteField>,
    developer_printed: String,
    marketing_printed: String,
}

impl NotePrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> NotePrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            current: None,
            developer_printed: String::new(),
            marketing_printed: String::new(),
        }
    }

    pub fn on_progress(&mut self, progress: &NoteProgress) {
        for field in &progress.changed {
            if let Err(e) = self.print_field(*field, progress.value(*field)) {
                log::debug!("Could not print progress: {}", e);
            }
        }
    }

    pub fn finish(&mut self) -> io::Result<()> {
        if self.current.take().is_some() {
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_field(&mut self, field: NoteField, value: &str) -> io::Result<()> {
        let printed = match field {
            NoteField::Developer => &mut self.developer_printed,
            NoteField::Marketing => &mut self.marketing_printed,
        };

        let suffix = match value.strip_prefix(printed.as_str()) {
            Some(suffix) if self.current == Some(field) => suffix,
            _ => {
                if self.current.is_some() {
                    writeln!(self.out)?;
                }
                writeln!(self.out, "{} {}:", field.emoji(), field.label())?;
                self.current = Some(field);
                value
            }
        };

        write!(self.out, "{}", suffix)?;
        printed.clear();
        printed.push_str(value);
        self.out.flush()
    }
}
