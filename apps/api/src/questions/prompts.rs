use crate::llm_client::prompts::JSON_ONLY_REMINDER;

/// Question analysis prompt. Replace `{question}` before sending.
pub const QUESTION_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following interview question:

"{question}"

Return a JSON object with these fields:
- "type": one of "Behavioral", "Technical", "HR", "Situational" or "Other".
- "difficulty": one of "Easy", "Medium" or "Hard".
- "explanation": 2 to 3 sentences on what the question evaluates and why interviewers ask it.
- "expected_length": how many minutes the interviewee should take to answer, e.g. "2-3 minutes".
- "ideal_answer": an object with
    - "structure": the best format to answer it (STAR, technical breakdown, ...).
    - "key_points": the most important points the answer should include.
    - "example": a sample answer of 5 to 8 lines that would score highly in a real interview.

OUTPUT SCHEMA:
{
  "type": "string",
  "difficulty": "string",
  "explanation": "string",
  "expected_length": "string",
  "ideal_answer": {"structure": "string", "key_points": ["string"], "example": "string"}
}
"#;

pub fn build_question_analysis_prompt(question: &str) -> String {
    let mut prompt = QUESTION_ANALYSIS_PROMPT_TEMPLATE.replace("{question}", question);
    prompt.push('\n');
    prompt.push_str(JSON_ONLY_REMINDER);
    prompt
}
