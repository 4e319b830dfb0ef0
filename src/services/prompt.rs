//! Prompt construction for code translation

/// Prompt for the synchronous route: the raw reply is returned as-is, so no
/// output convention is requested.
pub fn direct_translation_prompt(source_language: &str, target_language: &str, code: &str) -> String {
    format!(
        "Convert the following {source_language} code into {target_language}:\n\n\
         ```{source_language}\n{code}\n```"
    )
}

/// Prompt for the event path. Asks the model to prefix its answer with
/// `Code:` so [`crate::services::extract_code_block`] can find it.
pub fn marked_translation_prompt(source_language: &str, target_language: &str, code: &str) -> String {
    format!(
        "Convert the following {source_language} code to {target_language}:\n\n\
         ```{source_language}\n{code}\n```\n\n\
         Please reply with only the converted code, and prefix it with 'Code:'."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_prompt() {
        let prompt = direct_translation_prompt("python", "go", "print(1)");
        assert_eq!(
            prompt,
            "Convert the following python code into go:\n\n```python\nprint(1)\n```"
        );
    }

    #[test]
    fn test_marked_prompt() {
        let prompt = marked_translation_prompt("python", "rust", "x = [1, 2]\nprint(x)");
        assert_eq!(
            prompt,
            "Convert the following python code to rust:\n\n```python\nx = [1, 2]\nprint(x)\n```\n\n\
             Please reply with only the converted code, and prefix it with 'Code:'."
        );
    }
}
