pub mod note_printer;
