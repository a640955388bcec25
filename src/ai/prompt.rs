/// Problem statements are embedded as a bounded prefix to cap token usage
pub const PROBLEM_PREFIX_LIMIT: usize = 700;

fn problem_prefix(problem: &str) -> &str {
    match problem.char_indices().nth(PROBLEM_PREFIX_LIMIT) {
        Some((idx, _)) => &problem[..idx],
        None => problem,
    }
}

/// Prompt for the analysis path. The two literal header lines are the
/// markers the extraction scanner looks for in the reply.
pub fn analysis_prompt(problem: &str) -> String {
    format!(
        "You are a programming tutor. Analyze the following coding problem.\n\
         \n\
         Problem:\n{}\n\
         \n\
         Respond with exactly two sections, delimited by these literal header lines:\n\
         \n\
         Math Explanation:\n\
         A plain-language explanation of the approach. State the time and space complexity.\n\
         \n\
         Pseudocode:\n\
         Textbook-style pseudocode only. Use uppercase keywords (FUNCTION, IF, WHILE, RETURN), \
         4-space indentation, and no braces or semicolons.",
        problem_prefix(problem)
    )
}

/// Prompt for follow-up questions about an earlier analysis. The answer must
/// stay grounded in the supplied context.
pub fn chat_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a programming tutor. Using only the context below, answer the \
         student's follow-up question directly. If the context does not contain \
         the answer, say so.\n\
         \n\
         Context:\n{context}\n\
         \n\
         Question:\n{question}"
    )
}

/// Prompt for step-by-step tutorial generation; the reply must be machine
/// parseable JSON.
pub fn tutorial_prompt(problem: &str) -> String {
    format!(
        "Generate a step-by-step tutorial for solving the coding problem: {problem}. \
         Provide 3-5 steps with text descriptions and corresponding Python code snippets \
         where applicable. Return as a JSON array of objects, each with 'text' and \
         optional 'code' fields, and include the problem in the first object's \
         'problem' field. Return only the JSON array, no surrounding prose."
    )
}
