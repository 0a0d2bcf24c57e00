use crate::structs::notes_request::NotesRequest;

pub fn generate_prompt(request: &NotesRequest) -> String {
    let mut prompt = String::with_capacity(request.description.len() + request.diff_text.len() + 128);

    prompt.push_str(&format!("Change: {}\n\n", request.id));
    prompt.push_str("## Description\n");
    prompt.push_str(request.description.trim());
    prompt.push_str("\n\n## Diff\n```diff\n");
    prompt.push_str(&request.diff_text);
    if !request.diff_text.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str("```\n");

    prompt
}
