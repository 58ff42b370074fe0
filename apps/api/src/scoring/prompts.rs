// Prompt templates for attempt scoring.

use crate::llm_client::prompts::JSON_ONLY_REMINDER;
use crate::scoring::submission::InterviewResponse;

/// Interview feedback prompt. Replace `{count}` and `{responses_json}` before sending.
pub const INTERVIEW_FEEDBACK_PROMPT_TEMPLATE: &str = r#"Give feedback on how the interviewee answered the following {count} questions.

QUESTIONS AND ANSWERS (JSON):
{responses_json}

For EACH question, in the same order, provide:
- "feedback": 3 to 5 sentences on how well the question was answered, considering vocabulary,
  technical terminology, structure, depth of knowledge and relevance.
  If the answer is empty, say exactly: "This question was not answered."
- "score": a number from 0 to 100 (0 = not answered or entirely wrong, 100 = excellent).
- "suggestion": direct, practical advice for improving the answer.

Then provide an overall analysis of 5 to 8 sentences covering use of domain vocabulary,
clarity and confidence, repetition, filler words and overall ability to communicate.
Also list strengths and areas to improve.

OUTPUT SCHEMA (the "feedbacks" array MUST contain exactly {count} items):
{
  "feedbacks": [
    {"feedback": "string", "score": 0, "suggestion": "string"}
  ],
  "analysis": "string",
  "strengths": ["string"],
  "areas_to_improve": ["string"]
}
"#;

pub fn build_interview_feedback_prompt(responses: &[InterviewResponse]) -> String {
    let responses_json =
        serde_json::to_string_pretty(responses).unwrap_or_else(|_| "[]".to_string());
    let mut prompt = INTERVIEW_FEEDBACK_PROMPT_TEMPLATE
        .replace("{count}", &responses.len().to_string())
        .replace("{responses_json}", &responses_json);
    prompt.push('\n');
    prompt.push_str(JSON_ONLY_REMINDER);
    prompt
}
