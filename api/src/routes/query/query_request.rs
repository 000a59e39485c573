use serde::Deserialize;

/// Request payload for POST /query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Natural language question, e.g. "What is the GDP of Saudi Arabia in 2022?".
    pub question: String,
}

/// Query parameters for GET /ask.
#[derive(Debug, Deserialize)]
pub struct AskParams {
    /// Natural language question.
    pub q: String,
}
