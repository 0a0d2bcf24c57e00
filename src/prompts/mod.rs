pub mod release_notes_system_prompt;
