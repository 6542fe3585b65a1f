pub mod assets;
pub mod lang;
pub mod tts;
