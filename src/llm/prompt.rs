use crate::serpapi::SearchResult;

pub const DEFAULT_TARGET: &str = "the email address";

/// Builds the extraction prompt: one instruction line naming the entity, then each
/// result as `title: snippet`, separated by blank lines.
pub fn build_prompt(target: &str, entity: &str, results: &[SearchResult]) -> String {
    let mut prompt = format!("Extract {target} of {entity} from the following web results:\n\n");
    let body = results
        .iter()
        .map(|r| format!("{}: {}", r.title, r.snippet))
        .collect::<Vec<_>>()
        .join("\n\n");
    prompt.push_str(&body);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_instruction_and_results() {
        let results = vec![
            SearchResult::new("A", "alice@x.com"),
            SearchResult::new("Team page", "Contact Alice"),
        ];
        let prompt = build_prompt(DEFAULT_TARGET, "Alice", &results);
        assert_eq!(
            prompt,
            "Extract the email address of Alice from the following web results:\n\n\
             A: alice@x.com\n\nTeam page: Contact Alice"
        );
    }

    #[test]
    fn empty_results_leave_only_instruction() {
        let prompt = build_prompt(DEFAULT_TARGET, "Test Entity", &[]);
        assert_eq!(
            prompt,
            "Extract the email address of Test Entity from the following web results:\n\n"
        );
    }

    #[test]
    fn custom_target_replaces_default() {
        let prompt = build_prompt("the phone number", "Bob", &[SearchResult::new("t", "s")]);
        assert!(prompt.starts_with("Extract the phone number of Bob from"));
        assert!(prompt.ends_with("t: s"));
    }
}
