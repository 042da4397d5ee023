//! Prompt construction for the completion service

/// Build the instruction sent to the model.
///
/// Language names are upper-cased; the source code is embedded untouched.
pub fn build_prompt(source_code: &str, source_language: &str, target_language: &str) -> String {
    let source = source_language.to_uppercase();
    let target = target_language.to_uppercase();

    format!(
        "You are an expert programmer. Convert this {source} code to {target}.\n\
         \n\
         IMPORTANT: Return ONLY the converted code. No explanations, no comments about the conversion process, no markdown formatting.\n\
         \n\
         {source} code:\n\
         {source_code}\n\
         \n\
         {target} code:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_uppercases_languages() {
        let prompt = build_prompt("print('hi')", "python", "java");
        assert!(prompt.starts_with("You are an expert programmer. Convert this PYTHON code to JAVA."));
        assert!(prompt.contains("PYTHON code:\n"));
        assert!(prompt.ends_with("JAVA code:"));
        assert!(!prompt.contains("python"));
    }

    #[test]
    fn test_prompt_embeds_code_verbatim() {
        let code = "  #include <stdio.h>\n\tint main() { printf(\"%d\\n\", 1); }\n```\n";
        let prompt = build_prompt(code, "c", "python");
        assert!(prompt.contains(code));
        assert!(prompt.contains(&format!("C code:\n{}\n\nPYTHON code:", code)));
    }

    #[test]
    fn test_prompt_forbids_commentary() {
        let prompt = build_prompt("x = 1", "python", "c");
        assert!(prompt.contains("Return ONLY the converted code"));
        assert!(prompt.contains("no markdown formatting"));
    }

    #[test]
    fn test_prompt_with_empty_code() {
        let prompt = build_prompt("", "java", "c");
        assert!(prompt.contains("JAVA code:\n\n\nC code:"));
        assert_eq!(prompt, build_prompt("", "java", "c"));

        let blank = build_prompt("   ", "java", "c");
        assert!(blank.contains("JAVA code:\n   \n\nC code:"));
    }
}
