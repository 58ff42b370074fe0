use crate::llm_client::prompts::JSON_ONLY_REMINDER;

/// Resume review prompt. Replace `{job_description}` and `{resume_text}` before sending.
pub const RESUME_REVIEW_PROMPT_TEMPLATE: &str = r#"You are an expert technical recruiter and resume reviewer.
Analyze the resume below in relation to the job description. Be objective and precise,
and address the candidate directly.

JOB DESCRIPTION:
"{job_description}"

RESUME (extracted text):
"""
{resume_text}
"""

OUTPUT SCHEMA:
{
  "title": "string (one line title for this analysis)",
  "overall_score": 0,
  "analysis_summary": "string (5 to 8 lines on resume quality and fit)",
  "metrics": {
    "ats_match_score": 0,
    "clarity_score": 0,
    "grammar_issues": 0,
    "soft_vs_hard_skill_balance": "Balanced | Too much soft | Too technical",
    "resume_length_feedback": "Appropriate | Too long for a junior | Too short",
    "filler_word_usage": "Minimal | Moderate | Heavy use of vague language"
  },
  "improvement_suggestions": "string"
}

Scales:
- overall_score: 1 to 100, how well the resume fits the job.
- ats_match_score: 1 to 100, keyword and structure match with the job description.
- clarity_score: 1 to 10, grammar, conciseness and readability.
- grammar_issues: total count of grammar or spelling problems.
"#;

pub fn build_resume_review_prompt(job_description: &str, resume_text: &str) -> String {
    let mut prompt = RESUME_REVIEW_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text);
    prompt.push('\n');
    prompt.push_str(JSON_ONLY_REMINDER);
    prompt
}
