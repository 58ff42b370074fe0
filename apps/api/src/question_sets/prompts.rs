// Prompt templates for question-set generation.

use crate::llm_client::prompts::JSON_ONLY_REMINDER;

/// Exam generation prompt. Replace `{exam_type}`, `{subject}`, `{difficulty}`
/// and `{count}` before sending.
pub const EXAM_PROMPT_TEMPLATE: &str = r#"Generate a {exam_type} exam on the topic "{subject}" with {difficulty} difficulty.

Generate exactly {count} questions.
- If the exam type is multiple choice, give every question exactly 4 options.
- If the exam type is true/false, give every question exactly 2 options: "True" and "False".

For each question:
- Shuffle the options so the correct one is not always at the same position.
- "correct" is the 0-based index of the correct option AFTER shuffling.
- "explanation" explains in 3 to 4 lines why the correct option is correct.

Also give the exam a short descriptive title.

OUTPUT SCHEMA:
{
  "title": "string",
  "questions": [
    {"question": "string", "options": ["string"], "correct": 0, "explanation": "string"}
  ]
}
"#;

/// Interview generation prompt. Replace `{job_role}`, `{job_level}`,
/// `{topics}` and `{count}` before sending.
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"Generate {count} job interview questions for a {job_level} {job_role} position, and a title for the interview.

Interview topics: {topics}

For each question provide:
- "question": the question itself.
- "hint": a short text that helps the interviewee get started.
- "type": the question category ("Behavioral", "Technical", "HR", ...).

OUTPUT SCHEMA:
{
  "title": "string",
  "questions": [
    {"question": "string", "hint": "string", "type": "string"}
  ]
}
"#;

pub const INTERVIEW_QUESTION_COUNT: usize = 5;

/// Question count by difficulty. Unknown difficulties get the medium count.
pub fn exam_question_count(difficulty: &str) -> usize {
    match difficulty.trim().to_lowercase().as_str() {
        "easy" => 10,
        "hard" => 20,
        _ => 15,
    }
}

pub fn build_exam_prompt(subject: &str, difficulty: &str, exam_type: &str) -> String {
    let mut prompt = EXAM_PROMPT_TEMPLATE
        .replace("{exam_type}", exam_type)
        .replace("{subject}", subject)
        .replace("{difficulty}", difficulty)
        .replace("{count}", &exam_question_count(difficulty).to_string());
    prompt.push('\n');
    prompt.push_str(JSON_ONLY_REMINDER);
    prompt
}

pub fn build_interview_prompt(job_role: &str, job_level: &str, topics: &[String]) -> String {
    let mut prompt = INTERVIEW_PROMPT_TEMPLATE
        .replace("{job_role}", job_role)
        .replace("{job_level}", job_level)
        .replace("{topics}", &topics.join(", "))
        .replace("{count}", &INTERVIEW_QUESTION_COUNT.to_string());
    prompt.push('\n');
    prompt.push_str(JSON_ONLY_REMINDER);
    prompt
}
