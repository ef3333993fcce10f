//! Remote generation service implementations

pub mod gemini;

// Re-export for convenience
pub use gemini::GeminiClient;
