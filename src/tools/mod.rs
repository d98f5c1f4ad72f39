pub mod llm;
pub mod tavily;
