// ABOUTME: AI summary generation for engagements and ideas
// ABOUTME: Talks to an external text-generation endpoint over HTTP

pub mod prompts;
pub mod service;

pub use prompts::{engagement_prompt, idea_prompt};
pub use service::{HttpSummarizer, Summarizer, SummaryError, SummaryResult};
